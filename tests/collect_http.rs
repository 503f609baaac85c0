//! End-to-end behavior of the public client against a local collector.

use std::panic::{self, AssertUnwindSafe};

use httpmock::prelude::*;
use serde_json::json;
use universal_analytics_rs::{
    Analytics, AnalyticsErrorKind, AnalyticsOptions, Endpoint, EventExtras, HitType, Params,
};

fn try_start_server() -> Option<MockServer> {
    panic::catch_unwind(AssertUnwindSafe(|| MockServer::start())).ok()
}

fn client(server: &MockServer, debug: bool) -> Analytics {
    let options = AnalyticsOptions {
        tracking_id: "UA-TEST-1".into(),
        debug,
        endpoint: Endpoint::with_base_url(server.base_url()),
        ..Default::default()
    };
    Analytics::new(options).unwrap()
}

fn looks_like_uuid_v4(id: &str) -> bool {
    id.len() == 36 && id.as_bytes()[14] == b'4' && id.chars().filter(|c| *c == '-').count() == 4
}

#[tokio::test(flavor = "current_thread")]
async fn exact_wire_body_reaches_the_collector() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping exact_wire_body_reaches_the_collector: unable to start mock server");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/collect")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("v=1&tid=UA-TEST-1&cid=fixed-client&t=pageview&dh=example.com&dp=%2Ftest&dt=Test");
        then.status(200)
            .header("content-type", "image/gif")
            .body("GIF89a");
    });

    let analytics = client(&server, false);
    let response = analytics
        .pageview("example.com", "/test", "Test", None, Some("fixed-client"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.client_id, "fixed-client");
}

#[tokio::test(flavor = "current_thread")]
async fn pixel_response_counts_as_delivered() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping pixel_response_counts_as_delivered: unable to start mock server");
        return;
    };
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(200)
            .header("content-type", "image/gif")
            .body("GIF89a not json at all");
    });

    let analytics = client(&server, false);
    let response = analytics
        .event("category", "view", &EventExtras::default(), None)
        .await
        .unwrap();

    assert!(looks_like_uuid_v4(&response.client_id));
}

#[tokio::test(flavor = "current_thread")]
async fn generated_identifiers_differ_between_calls() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping generated_identifiers_differ_between_calls: unable to start mock server");
        return;
    };
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(200).header("content-type", "image/gif").body("GIF89a");
    });

    let analytics = client(&server, false);
    let first = analytics
        .pageview("example.com", "/", "Home", None, None)
        .await
        .unwrap();
    let second = analytics
        .pageview("example.com", "/", "Home", None, None)
        .await
        .unwrap();

    assert_ne!(first.client_id, second.client_id);
    assert!(looks_like_uuid_v4(&first.client_id));
    assert!(looks_like_uuid_v4(&second.client_id));
}

#[tokio::test(flavor = "current_thread")]
async fn debug_endpoint_accepts_a_valid_hit() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping debug_endpoint_accepts_a_valid_hit: unable to start mock server");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST).path("/debug/collect");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"hitParsingResult": [{"valid": true}]}));
    });

    let analytics = client(&server, true);
    let response = analytics
        .pageview("example.com", "/test", "Test", None, Some("debug-client"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.client_id, "debug-client");
}

#[tokio::test(flavor = "current_thread")]
async fn debug_endpoint_rejection_is_a_validation_error() {
    let Some(server) = try_start_server() else {
        eprintln!(
            "Skipping debug_endpoint_rejection_is_a_validation_error: unable to start mock server"
        );
        return;
    };
    let body = json!({
        "hitParsingResult": [{
            "valid": false,
            "hit": "/debug/collect",
            "parserMessage": [{
                "messageType": "ERROR",
                "description": "The value provided for parameter 'tid' is invalid."
            }]
        }]
    });
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/debug/collect");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body.clone());
    });

    let analytics = client(&server, true);
    let err = analytics
        .social("like", "facebook", "home", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &AnalyticsErrorKind::Validation);
    assert_eq!(err.payload(), Some(&body));
}

#[tokio::test(flavor = "current_thread")]
async fn missing_tracking_id_fails_with_a_classified_error() {
    let Some(server) = try_start_server() else {
        eprintln!(
            "Skipping missing_tracking_id_fails_with_a_classified_error: unable to start mock server"
        );
        return;
    };
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/debug/collect").body_contains("tid=&");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "hitParsingResult": [{
                    "valid": false,
                    "parserMessage": [{
                        "messageType": "ERROR",
                        "description": "Tracking Id is a required field for this request."
                    }]
                }]
            }));
    });

    let options = AnalyticsOptions {
        tracking_id: String::new(),
        debug: true,
        endpoint: Endpoint::with_base_url(server.base_url()),
        ..Default::default()
    };
    let analytics = Analytics::new(options).unwrap();
    let err = analytics
        .pageview("example.com", "/test", "Test", None, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &AnalyticsErrorKind::Validation);
}

#[tokio::test(flavor = "current_thread")]
async fn server_error_carries_the_parsed_body() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping server_error_carries_the_parsed_body: unable to start mock server");
        return;
    };
    let body = json!({"error": "quota exceeded"});
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(500)
            .header("content-type", "application/json")
            .json_body(body.clone());
    });

    let analytics = client(&server, false);
    let err = analytics
        .exception("IOException", true, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &AnalyticsErrorKind::Server);
    assert_eq!(err.payload(), Some(&body));
}

#[tokio::test(flavor = "current_thread")]
async fn non_json_response_is_a_protocol_error() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping non_json_response_is_a_protocol_error: unable to start mock server");
        return;
    };
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/collect");
        then.status(200)
            .header("content-type", "text/html")
            .body("<html>not json</html>");
    });

    let analytics = client(&server, false);
    let err = analytics
        .screenview("Home", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), &AnalyticsErrorKind::Protocol);
    assert_eq!(
        err.payload(),
        Some(&serde_json::Value::String("<html>not json</html>".into()))
    );
}

#[tokio::test(flavor = "current_thread")]
async fn custom_parameters_ride_on_every_hit() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping custom_parameters_ride_on_every_hit: unable to start mock server");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST).path("/collect").body_contains("cd1=beta");
        then.status(200).header("content-type", "image/gif").body("GIF89a");
    });

    let analytics = client(&server, false);
    analytics.set("cd1", Some("beta"));
    analytics
        .timing("deps", "load", 314, &Default::default(), None)
        .await
        .unwrap();
    analytics
        .social("like", "facebook", "home", None)
        .await
        .unwrap();

    assert_eq!(mock.hits(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn user_agent_override_is_forwarded() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping user_agent_override_is_forwarded: unable to start mock server");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/collect")
            .header("user-agent", "ua-rs-test/1.0");
        then.status(200).header("content-type", "image/gif").body("GIF89a");
    });

    let options = AnalyticsOptions {
        tracking_id: "UA-TEST-1".into(),
        user_agent: "ua-rs-test/1.0".into(),
        endpoint: Endpoint::with_base_url(server.base_url()),
        ..Default::default()
    };
    let analytics = Analytics::new(options).unwrap();
    analytics
        .pageview("example.com", "/", "Home", None, None)
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test(flavor = "current_thread")]
async fn generic_send_delivers_custom_hit_types() {
    let Some(server) = try_start_server() else {
        eprintln!("Skipping generic_send_delivers_custom_hit_types: unable to start mock server");
        return;
    };
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/collect")
            .body_contains("t=ding")
            .body_contains("cm1=5");
        then.status(200).header("content-type", "image/gif").body("GIF89a");
    });

    let analytics = client(&server, false);
    let params: Params = [("cm1", "5")].into_iter().collect();
    analytics
        .send(HitType::Custom("ding".into()), params, None)
        .await
        .unwrap();

    mock.assert();
}
