use std::fmt;
use std::sync::{Arc, Mutex};

use crate::config::AnalyticsOptions;
use crate::error::AnalyticsResult;
use crate::hit::{
    CheckoutProduct, EventExtras, Hit, HitType, ItemExtras, PromotionExtras, PurchaseExtras,
    RefundProduct, TimingExtras, TransactionExtras,
};
use crate::params::Params;
use crate::transport::{Dispatcher, HitResponse};

/// Measurement Protocol client.
///
/// One public operation per hit type plus a generic [`send`](Self::send)
/// escape hatch. Every operation issues at most one POST and resolves to the
/// client identifier the hit was reported under, or to a classified
/// [`AnalyticsError`](crate::AnalyticsError). There is no batching, no
/// retrying and no queueing; a failure is scoped to the call that produced
/// it.
///
/// Cheap to clone: clones share the configuration, the HTTP connection pool
/// and the custom-parameter store, so a clone per task is the expected way
/// to send concurrently.
#[derive(Clone)]
pub struct Analytics {
    inner: Arc<AnalyticsInner>,
}

struct AnalyticsInner {
    dispatcher: Dispatcher,
    custom_params: Mutex<Params>,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("tracking_id", &self.inner.dispatcher.options().tracking_id)
            .field("debug", &self.inner.dispatcher.options().debug)
            .finish()
    }
}

impl Analytics {
    pub fn new(options: AnalyticsOptions) -> AnalyticsResult<Self> {
        let dispatcher = Dispatcher::new(options)?;
        Ok(Self {
            inner: Arc::new(AnalyticsInner {
                dispatcher,
                custom_params: Mutex::new(Params::new()),
            }),
        })
    }

    pub fn options(&self) -> &AnalyticsOptions {
        self.inner.dispatcher.options()
    }

    /// Upserts (`Some`) or removes (`None`) a custom parameter applied to
    /// every subsequent hit.
    ///
    /// Custom parameters are merged after the built-in fields, so a custom
    /// key such as `cid` or `dt` overrides the value the client would have
    /// sent. Mind the ordering when shadowing built-in keys.
    pub fn set(&self, key: &str, value: Option<&str>) {
        let mut params = self.inner.custom_params.lock().unwrap();
        match value {
            Some(value) => params.insert(key, value),
            None => {
                params.remove(key);
            }
        }
    }

    /// Snapshot of the custom parameters currently applied to every hit.
    pub fn custom_params(&self) -> Params {
        self.inner.custom_params.lock().unwrap().clone()
    }

    pub async fn pageview(
        &self,
        hostname: &str,
        page: &str,
        title: &str,
        session_control: Option<&str>,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::pageview(hostname, page, title, session_control), client_id)
            .await
    }

    pub async fn event(
        &self,
        category: &str,
        action: &str,
        extras: &EventExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::event(category, action, extras), client_id)
            .await
    }

    /// Reports a screen of the application named in the configuration; the
    /// `an`/`av`/`aid`/`aiid` fields ride in from
    /// [`AnalyticsOptions`](crate::AnalyticsOptions).
    pub async fn screenview(
        &self,
        screen_name: &str,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::screenview(screen_name), client_id).await
    }

    pub async fn transaction(
        &self,
        transaction_id: &str,
        extras: &TransactionExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::transaction(transaction_id, extras), client_id)
            .await
    }

    pub async fn social(
        &self,
        action: &str,
        network: &str,
        target: &str,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::social(action, network, target), client_id)
            .await
    }

    pub async fn exception(
        &self,
        description: &str,
        fatal: bool,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::exception(description, fatal), client_id)
            .await
    }

    pub async fn refund(
        &self,
        transaction_id: &str,
        category: Option<&str>,
        action: Option<&str>,
        non_interaction: Option<bool>,
        product: &RefundProduct,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::refund(transaction_id, category, action, non_interaction, product),
            client_id,
        )
        .await
    }

    pub async fn purchase(
        &self,
        hostname: &str,
        page: &str,
        title: &str,
        transaction_id: &str,
        extras: &PurchaseExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::purchase(hostname, page, title, transaction_id, extras),
            client_id,
        )
        .await
    }

    pub async fn checkout(
        &self,
        hostname: &str,
        page: &str,
        title: &str,
        step: &str,
        step_option: &str,
        product: &CheckoutProduct,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::checkout(hostname, page, title, step, step_option, product),
            client_id,
        )
        .await
    }

    pub async fn checkout_option(
        &self,
        category: &str,
        action: &str,
        step: Option<&str>,
        step_option: Option<&str>,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::checkout_option(category, action, step, step_option),
            client_id,
        )
        .await
    }

    pub async fn promotion_impression(
        &self,
        hostname: &str,
        page: &str,
        title: &str,
        promotion: &PromotionExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::promotion_impression(hostname, page, title, promotion),
            client_id,
        )
        .await
    }

    pub async fn promotion_click(
        &self,
        category: &str,
        action: &str,
        label: Option<&str>,
        promotion: &PromotionExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(
            Hit::promotion_click(category, action, label, promotion),
            client_id,
        )
        .await
    }

    pub async fn item(
        &self,
        transaction_id: &str,
        name: &str,
        extras: &ItemExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::item(transaction_id, name, extras), client_id)
            .await
    }

    pub async fn timing(
        &self,
        category: &str,
        variable: &str,
        time_ms: u64,
        extras: &TimingExtras,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::timing(category, variable, time_ms, extras), client_id)
            .await
    }

    /// Escape hatch for hit types without a dedicated operation: the tag and
    /// parameter mapping are sent as given, merged with the client-wide
    /// fields like any other hit.
    pub async fn send(
        &self,
        hit_type: HitType,
        params: Params,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        self.dispatch(Hit::new(hit_type, params), client_id).await
    }

    async fn dispatch(&self, hit: Hit, client_id: Option<&str>) -> AnalyticsResult<HitResponse> {
        // Snapshot under the lock; the send itself must not hold it.
        let custom_params = self.inner.custom_params.lock().unwrap().clone();
        self.inner.dispatcher.send(&hit, &custom_params, client_id).await
    }
}
