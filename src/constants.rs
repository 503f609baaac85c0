pub(crate) const DEFAULT_BASE_URL: &str = "https://www.google-analytics.com";
pub(crate) const DEBUG_PATH: &str = "/debug";
pub(crate) const COLLECT_PATH: &str = "/collect";

/// Measurement Protocol version sent as the `v` field.
pub(crate) const DEFAULT_PROTOCOL_VERSION: u32 = 1;

pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
