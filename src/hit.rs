use std::fmt;

use crate::params::Params;

/// The `t` field of a hit: which parameter schema the collector applies.
///
/// `Custom` backs the generic [`Analytics::send`](crate::Analytics::send)
/// escape hatch for hit types without a dedicated builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HitType {
    Pageview,
    Screenview,
    Event,
    Transaction,
    Item,
    Social,
    Exception,
    Timing,
    Custom(String),
}

impl HitType {
    pub fn as_str(&self) -> &str {
        match self {
            HitType::Pageview => "pageview",
            HitType::Screenview => "screenview",
            HitType::Event => "event",
            HitType::Transaction => "transaction",
            HitType::Item => "item",
            HitType::Social => "social",
            HitType::Exception => "exception",
            HitType::Timing => "timing",
            HitType::Custom(name) => name,
        }
    }
}

impl fmt::Display for HitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional fields of an [`event`](Hit::event) hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventExtras {
    pub label: Option<String>,
    pub value: Option<String>,
}

/// Optional fields of a [`transaction`](Hit::transaction) hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionExtras {
    pub affiliation: Option<String>,
    pub revenue: Option<String>,
    pub shipping: Option<f64>,
    pub tax: Option<f64>,
    pub currency: Option<String>,
}

/// Product slot of a [`refund`](Hit::refund) hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RefundProduct {
    pub id: Option<String>,
    pub quantity: Option<u32>,
}

/// Optional transaction and product fields of a [`purchase`](Hit::purchase)
/// hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PurchaseExtras {
    pub affiliation: Option<String>,
    pub revenue: Option<String>,
    pub tax: Option<f64>,
    pub shipping: Option<f64>,
    pub coupon: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
    pub product_brand: Option<String>,
    pub product_variant: Option<String>,
    pub product_position: Option<u32>,
}

/// Product slot of a [`checkout`](Hit::checkout) hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckoutProduct {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub variant: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

/// Promotion slot of the promotion hits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PromotionExtras {
    pub id: Option<String>,
    pub name: Option<String>,
    pub creative: Option<String>,
    pub position: Option<String>,
}

/// Optional fields of an [`item`](Hit::item) hit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemExtras {
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub sku: Option<String>,
    pub variation: Option<String>,
    pub currency: Option<String>,
}

/// Optional fields of a [`timing`](Hit::timing) hit, all in milliseconds
/// except the label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimingExtras {
    pub label: Option<String>,
    pub dns_time: Option<u64>,
    pub page_download_time: Option<u64>,
    pub redirect_time: Option<u64>,
    pub tcp_connect_time: Option<u64>,
    pub server_response_time: Option<u64>,
}

/// One tracked interaction: the wire hit type plus its parameter mapping.
///
/// Built fresh per call by the constructors below and never retained. The
/// constructors are pure; they perform no I/O. Required arguments are
/// inserted verbatim (even when empty), optional arguments go through the
/// [`ParamValue`](crate::ParamValue) presence test.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    hit_type: HitType,
    params: Params,
}

impl Hit {
    pub fn new(hit_type: HitType, params: Params) -> Self {
        Self { hit_type, params }
    }

    pub fn hit_type(&self) -> &HitType {
        &self.hit_type
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn pageview(hostname: &str, page: &str, title: &str, session_control: Option<&str>) -> Self {
        let mut params = Params::new();
        params.insert("dh", hostname);
        params.insert("dp", page);
        params.insert("dt", title);
        params.insert_provided("sc", session_control);
        Self::new(HitType::Pageview, params)
    }

    pub fn event(category: &str, action: &str, extras: &EventExtras) -> Self {
        let mut params = Params::new();
        params.insert("ec", category);
        params.insert("ea", action);
        params.insert_provided("el", extras.label.as_deref());
        params.insert_provided("ev", extras.value.as_deref());
        Self::new(HitType::Event, params)
    }

    /// App name, version and identifiers come from the client configuration
    /// overlay, so a screenview carries only the screen name itself.
    pub fn screenview(screen_name: &str) -> Self {
        let mut params = Params::new();
        params.insert("cd", screen_name);
        Self::new(HitType::Screenview, params)
    }

    pub fn transaction(transaction_id: &str, extras: &TransactionExtras) -> Self {
        let mut params = Params::new();
        params.insert("ti", transaction_id);
        params.insert_provided("ta", extras.affiliation.as_deref());
        params.insert_provided("tr", extras.revenue.as_deref());
        params.insert_provided("ts", extras.shipping);
        params.insert_provided("tt", extras.tax);
        params.insert_provided("cu", extras.currency.as_deref());
        Self::new(HitType::Transaction, params)
    }

    pub fn social(action: &str, network: &str, target: &str) -> Self {
        let mut params = Params::new();
        params.insert("sa", action);
        params.insert("sn", network);
        params.insert("st", target);
        Self::new(HitType::Social, params)
    }

    pub fn exception(description: &str, fatal: bool) -> Self {
        let mut params = Params::new();
        params.insert("exd", description);
        params.insert("exf", if fatal { "1" } else { "0" });
        Self::new(HitType::Exception, params)
    }

    /// Refunds ride on an `event` hit with product action `refund`.
    /// `category` defaults to `Ecommerce`, `action` to `Refund` and the
    /// non-interaction flag to set.
    pub fn refund(
        transaction_id: &str,
        category: Option<&str>,
        action: Option<&str>,
        non_interaction: Option<bool>,
        product: &RefundProduct,
    ) -> Self {
        let mut params = Params::new();
        params.insert("ec", category.unwrap_or("Ecommerce"));
        params.insert("ea", action.unwrap_or("Refund"));
        params.insert("ni", if non_interaction.unwrap_or(true) { "1" } else { "0" });
        params.insert("ti", transaction_id);
        params.insert("pa", "refund");
        params.insert_provided("pr1id", product.id.as_deref());
        params.insert_provided("pr1qt", product.quantity);
        Self::new(HitType::Event, params)
    }

    /// Purchases ride on a `pageview` hit with product action `purchase`.
    /// A single product occupies slot 1; multiple products per call are
    /// unsupported.
    pub fn purchase(
        hostname: &str,
        page: &str,
        title: &str,
        transaction_id: &str,
        extras: &PurchaseExtras,
    ) -> Self {
        let mut params = Params::new();
        params.insert("dh", hostname);
        params.insert("dp", page);
        params.insert("dt", title);
        params.insert("ti", transaction_id);
        params.insert("pa", "purchase");
        params.insert_provided("ta", extras.affiliation.as_deref());
        params.insert_provided("tr", extras.revenue.as_deref());
        params.insert_provided("tt", extras.tax);
        params.insert_provided("ts", extras.shipping);
        params.insert_provided("tcc", extras.coupon.as_deref());
        params.insert_provided("pr1id", extras.product_id.as_deref());
        params.insert_provided("pr1nm", extras.product_name.as_deref());
        params.insert_provided("pr1ca", extras.product_category.as_deref());
        params.insert_provided("pr1br", extras.product_brand.as_deref());
        params.insert_provided("pr1va", extras.product_variant.as_deref());
        params.insert_provided("pr1p", extras.product_position);
        Self::new(HitType::Pageview, params)
    }

    /// Checkout steps ride on a `pageview` hit with product action
    /// `checkout`.
    pub fn checkout(
        hostname: &str,
        page: &str,
        title: &str,
        step: &str,
        step_option: &str,
        product: &CheckoutProduct,
    ) -> Self {
        let mut params = Params::new();
        params.insert("dh", hostname);
        params.insert("dp", page);
        params.insert("dt", title);
        params.insert("pa", "checkout");
        params.insert("cos", step);
        params.insert("col", step_option);
        params.insert_provided("pr1id", product.id.as_deref());
        params.insert_provided("pr1nm", product.name.as_deref());
        params.insert_provided("pr1ca", product.category.as_deref());
        params.insert_provided("pr1br", product.brand.as_deref());
        params.insert_provided("pr1va", product.variant.as_deref());
        params.insert_provided("pr1pr", product.price);
        params.insert_provided("pr1qt", product.quantity);
        Self::new(HitType::Pageview, params)
    }

    pub fn checkout_option(
        category: &str,
        action: &str,
        step: Option<&str>,
        step_option: Option<&str>,
    ) -> Self {
        let mut params = Params::new();
        params.insert("ec", category);
        params.insert("ea", action);
        params.insert("pa", "checkout_option");
        params.insert_provided("cos", step);
        params.insert_provided("col", step_option);
        Self::new(HitType::Event, params)
    }

    pub fn promotion_impression(
        hostname: &str,
        page: &str,
        title: &str,
        promotion: &PromotionExtras,
    ) -> Self {
        let mut params = Params::new();
        params.insert("dh", hostname);
        params.insert("dp", page);
        params.insert("dt", title);
        params.insert_provided("promo1id", promotion.id.as_deref());
        params.insert_provided("promo1nm", promotion.name.as_deref());
        params.insert_provided("promo1cr", promotion.creative.as_deref());
        params.insert_provided("promo1ps", promotion.position.as_deref());
        Self::new(HitType::Pageview, params)
    }

    pub fn promotion_click(
        category: &str,
        action: &str,
        label: Option<&str>,
        promotion: &PromotionExtras,
    ) -> Self {
        let mut params = Params::new();
        params.insert("ec", category);
        params.insert("ea", action);
        params.insert("promos", "click");
        params.insert_provided("el", label);
        params.insert_provided("promo1id", promotion.id.as_deref());
        params.insert_provided("promo1nm", promotion.name.as_deref());
        params.insert_provided("promo1cr", promotion.creative.as_deref());
        params.insert_provided("promo1ps", promotion.position.as_deref());
        Self::new(HitType::Event, params)
    }

    pub fn item(transaction_id: &str, name: &str, extras: &ItemExtras) -> Self {
        let mut params = Params::new();
        params.insert("ti", transaction_id);
        params.insert("in", name);
        params.insert_provided("ip", extras.price);
        params.insert_provided("iq", extras.quantity);
        params.insert_provided("ic", extras.sku.as_deref());
        params.insert_provided("iv", extras.variation.as_deref());
        params.insert_provided("cu", extras.currency.as_deref());
        Self::new(HitType::Item, params)
    }

    pub fn timing(category: &str, variable: &str, time_ms: u64, extras: &TimingExtras) -> Self {
        let mut params = Params::new();
        params.insert("utc", category);
        params.insert("utv", variable);
        params.insert("utt", time_ms.to_string());
        params.insert_provided("utl", extras.label.as_deref());
        params.insert_provided("dns", extras.dns_time);
        params.insert_provided("pdt", extras.page_download_time);
        params.insert_provided("rrt", extras.redirect_time);
        params.insert_provided("tcp", extras.tcp_connect_time);
        params.insert_provided("srt", extras.server_response_time);
        Self::new(HitType::Timing, params)
    }
}
