//! Runs a hit against the validation endpoint and prints the verdict.
//! Useful while wiring up a new property: the collector reports which
//! fields it would reject instead of recording the hit.

use universal_analytics_rs::{Analytics, AnalyticsErrorKind, AnalyticsOptions, EventExtras};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let analytics = Analytics::new(AnalyticsOptions {
        tracking_id: "UA-XXXXXXX-1".into(),
        debug: true,
        ..Default::default()
    })?;

    let extras = EventExtras {
        label: Some("signup-button".into()),
        ..Default::default()
    };
    match analytics.event("onboarding", "click", &extras, None).await {
        Ok(response) => println!("hit is valid, reported as {}", response.client_id),
        Err(err) if err.kind() == &AnalyticsErrorKind::Validation => {
            println!("hit was rejected:");
            if let Some(payload) = err.payload() {
                println!("{payload:#}");
            }
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
