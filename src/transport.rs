use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded::Serializer;
use url::Url;
use uuid::Uuid;

use crate::config::AnalyticsOptions;
use crate::constants::FORM_CONTENT_TYPE;
use crate::error::{
    internal_error, network_error, protocol_error, server_error, validation_error, AnalyticsResult,
};
use crate::hit::Hit;
use crate::params::Params;

/// Delivery outcome of a single hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitResponse {
    /// The client identifier the hit was reported under. When the caller
    /// supplied none, this is the generated one.
    pub client_id: String,
}

/// Owns the HTTP client and turns one hit at a time into a collect request.
///
/// Stateless across calls: each send builds its own merge mapping and
/// interprets its own response.
#[derive(Clone, Debug)]
pub(crate) struct Dispatcher {
    http: Client,
    options: AnalyticsOptions,
}

impl Dispatcher {
    pub(crate) fn new(options: AnalyticsOptions) -> AnalyticsResult<Self> {
        Url::parse(options.endpoint.base_url()).map_err(|err| {
            internal_error(format!(
                "invalid collect endpoint '{}': {err}",
                options.endpoint.base_url()
            ))
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| internal_error(format!("failed to build HTTP client: {err}")))?;

        Ok(Self { http, options })
    }

    pub(crate) fn options(&self) -> &AnalyticsOptions {
        &self.options
    }

    /// Merges, encodes and posts one hit, then normalizes the response.
    pub(crate) async fn send(
        &self,
        hit: &Hit,
        custom_params: &Params,
        client_id: Option<&str>,
    ) -> AnalyticsResult<HitResponse> {
        let (params, client_id) = merge_params(&self.options, hit, custom_params, client_id);
        let body = encode_form(&params);
        let url = self.options.endpoint.collect_url(self.options.debug);

        log::debug!(
            "posting {} hit ({} fields) to {url}",
            hit.hit_type(),
            params.len()
        );

        let mut request = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body);
        if !self.options.user_agent.is_empty() {
            request = request.header(USER_AGENT, self.options.user_agent.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|err| network_error(format!("failed to deliver hit: {err}")))?;

        self.normalize(response, client_id).await
    }

    async fn normalize(
        &self,
        response: reqwest::Response,
        client_id: String,
    ) -> AnalyticsResult<HitResponse> {
        let status = response.status();

        // The production collector answers with a tracking pixel. Its body
        // is not JSON and carries no per-hit verdict, so a gif content type
        // counts as delivered no matter what the body holds.
        let is_pixel = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("image/gif"))
            .unwrap_or(false);
        if is_pixel {
            return Ok(HitResponse { client_id });
        }

        let text = response
            .text()
            .await
            .map_err(|err| network_error(format!("failed to read response body: {err}")))?;
        let parsed: Value = serde_json::from_str(&text)
            .map_err(|err| protocol_error(format!("response was not valid JSON: {err}"), text.clone()))?;

        if !status.is_success() {
            return Err(server_error(
                format!("collect request failed with status {status}"),
                parsed,
            ));
        }

        if self.options.debug {
            return check_validation(parsed, text, client_id);
        }

        Ok(HitResponse { client_id })
    }
}

/// Interprets the validation endpoint's verdict for the first (only) hit of
/// the request. The full body rides on the error so callers can inspect
/// which fields were rejected.
fn check_validation(parsed: Value, text: String, client_id: String) -> AnalyticsResult<HitResponse> {
    let report: ValidationReport = match serde_json::from_value(parsed.clone()) {
        Ok(report) => report,
        Err(err) => {
            return Err(protocol_error(
                format!("debug response is missing a hit validation result: {err}"),
                text,
            ))
        }
    };

    match report.hit_parsing_result.first() {
        Some(verdict) if verdict.valid => {
            log::debug!("validation endpoint accepted the hit");
            Ok(HitResponse { client_id })
        }
        Some(_) => {
            log::warn!("validation endpoint rejected the hit: {parsed}");
            Err(validation_error(
                "validation endpoint reported the hit as invalid",
                parsed,
            ))
        }
        None => Err(protocol_error(
            "debug response contained no hit validation entries",
            text,
        )),
    }
}

/// Builds the merged wire mapping for one hit and resolves the client
/// identifier it is reported under.
///
/// Later layers overwrite earlier ones: client-wide fields, then app
/// metadata, then the hit's own parameters, then custom parameters. Custom
/// parameters are applied last and can therefore override built-in keys.
pub(crate) fn merge_params(
    options: &AnalyticsOptions,
    hit: &Hit,
    custom_params: &Params,
    client_id: Option<&str>,
) -> (Params, String) {
    // Per-call identifier wins over the configured one; with neither, every
    // call reports under a fresh identity. No generated identifier is cached
    // across calls.
    let client_id = client_id
        .map(str::to_owned)
        .or_else(|| options.client_id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut params = Params::new();
    params.insert("v", options.version.to_string());
    params.insert("tid", options.tracking_id.clone());
    params.insert("cid", client_id.clone());
    params.insert("t", hit.hit_type().as_str());

    params.insert_provided("an", options.app_name.as_deref());
    params.insert_provided("av", options.app_version.as_deref());
    params.insert_provided("aid", options.app_id.as_deref());
    params.insert_provided("aiid", options.app_installer_id.as_deref());

    params.overlay(hit.params());
    params.overlay(custom_params);

    (params, client_id)
}

/// Serializes `params` as an `application/x-www-form-urlencoded` body, in
/// insertion order.
pub(crate) fn encode_form(params: &Params) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in params.iter() {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

#[derive(Deserialize)]
struct ValidationReport {
    #[serde(rename = "hitParsingResult")]
    hit_parsing_result: Vec<HitVerdict>,
}

#[derive(Deserialize)]
struct HitVerdict {
    valid: bool,
}
