//! Tracks a purchase, the sold item and a later refund under one stable
//! client identifier. Provide your own tracking ID before running.

use universal_analytics_rs::{
    Analytics, AnalyticsOptions, ItemExtras, PurchaseExtras, RefundProduct,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analytics = Analytics::new(AnalyticsOptions {
        tracking_id: "UA-XXXXXXX-1".into(),
        // A fixed identifier keeps all three hits on the same reported user.
        client_id: Some("35009a79-1a05-49d7-b876-2b884d0f825b".into()),
        ..Default::default()
    })?;

    // Applied to every following hit until removed.
    analytics.set("cu", Some("EUR"));

    let purchase = PurchaseExtras {
        revenue: Some("29.99".into()),
        tax: Some(5.70),
        product_id: Some("SKU-42".into()),
        product_name: Some("T-Shirt".into()),
        ..Default::default()
    };
    analytics
        .purchase("shop.example.com", "/receipt", "Receipt", "T1001", &purchase, None)
        .await?;

    let item = ItemExtras {
        price: Some(29.99),
        quantity: Some(1),
        sku: Some("SKU-42".into()),
        ..Default::default()
    };
    analytics.item("T1001", "T-Shirt", &item, None).await?;

    let refund = RefundProduct {
        id: Some("SKU-42".into()),
        quantity: Some(1),
    };
    analytics
        .refund("T1001", None, None, None, &refund, None)
        .await?;

    println!("purchase, item and refund delivered");
    Ok(())
}
