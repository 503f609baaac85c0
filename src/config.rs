use std::time::Duration;

use crate::constants::{COLLECT_PATH, DEBUG_PATH, DEFAULT_BASE_URL, DEFAULT_PROTOCOL_VERSION};

/// Collector endpoint: a base URL plus the debug and collect path suffixes.
///
/// The default points at the hosted collector; [`Endpoint::with_base_url`]
/// reroutes hits to a local server for tests and emulators while keeping the
/// standard paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    base_url: String,
    debug_path: String,
    collect_path: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            debug_path: DEBUG_PATH.to_owned(),
            collect_path: COLLECT_PATH.to_owned(),
        }
    }
}

impl Endpoint {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolved POST target: the validation endpoint when `debug` is set,
    /// the production collector otherwise.
    pub(crate) fn collect_url(&self, debug: bool) -> String {
        if debug {
            format!("{}{}{}", self.base_url, self.debug_path, self.collect_path)
        } else {
            format!("{}{}", self.base_url, self.collect_path)
        }
    }
}

/// Client construction options.
///
/// This is the single configuration contract; fill the fields you need and
/// take the rest from `Default`:
///
/// ```
/// use universal_analytics_rs::AnalyticsOptions;
///
/// let options = AnalyticsOptions {
///     tracking_id: "UA-XXXXXXX-1".into(),
///     debug: true,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyticsOptions {
    /// Property identifier, the `tid` field. Required for real delivery;
    /// the collector rejects hits without one.
    pub tracking_id: String,
    /// Fixed client identifier reported for every hit. When unset (and no
    /// per-call identifier is given) each call generates a fresh UUID v4,
    /// so consecutive calls report under different identities.
    pub client_id: Option<String>,
    /// Sent as the `User-Agent` header when non-empty.
    pub user_agent: String,
    /// Application name, the `an` field.
    pub app_name: Option<String>,
    /// Application version, the `av` field.
    pub app_version: Option<String>,
    /// Application identifier, the `aid` field.
    pub app_id: Option<String>,
    /// Application installer identifier, the `aiid` field.
    pub app_installer_id: Option<String>,
    /// Routes hits to the validation endpoint, which reports whether the
    /// hit parses instead of recording it.
    pub debug: bool,
    /// Measurement Protocol version, the `v` field.
    pub version: u32,
    pub endpoint: Endpoint,
    /// Optional request timeout. `None` leaves the transport unbounded;
    /// cancellation is then the calling context's responsibility.
    pub timeout: Option<Duration>,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            tracking_id: String::new(),
            client_id: None,
            user_agent: String::new(),
            app_name: None,
            app_version: None,
            app_id: None,
            app_installer_id: None,
            debug: false,
            version: DEFAULT_PROTOCOL_VERSION,
            endpoint: Endpoint::default(),
            timeout: None,
        }
    }
}

impl AnalyticsOptions {
    pub fn new(tracking_id: impl Into<String>) -> Self {
        Self {
            tracking_id: tracking_id.into(),
            ..Self::default()
        }
    }
}
