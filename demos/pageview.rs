//! Sends a single pageview to the production collector.
//! Provide your own tracking ID before running.

use universal_analytics_rs::{Analytics, AnalyticsOptions};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analytics = Analytics::new(AnalyticsOptions {
        tracking_id: "UA-XXXXXXX-1".into(),
        user_agent: "universal-analytics-rs-demo/1.0".into(),
        ..Default::default()
    })?;

    let response = analytics
        .pageview("example.com", "/landing", "Landing page", None, None)
        .await?;
    println!("pageview delivered as client {}", response.client_id);

    Ok(())
}
