//! Venmo experiment enrollment command.

use std::sync::Arc;

use anyhow::Result;
use buttonkit_lib::config::{FundingEligibility, SdkConfig, SdkPlatform};
use buttonkit_lib::platform::PlatformProbe;
use buttonkit_lib::{ButtonContext, FundingSource};

use crate::ui;

#[tracing::instrument]
pub fn run(
    platform: &str,
    eligible: bool,
    enable: bool,
    session: &str,
    _verbose: bool,
) -> Result<()> {
    let probe = super::platform_preset(platform)?;

    let sdk_platform = if probe.is_device() {
        SdkPlatform::Mobile
    } else {
        SdkPlatform::Desktop
    };
    let mut config = SdkConfig::default()
        .with_platform(sdk_platform)
        .with_funding_eligibility(
            FundingEligibility::new().with_source(FundingSource::Venmo, eligible),
        );
    if enable {
        config = config.with_enabled_funding(vec![FundingSource::Venmo]);
    }

    let service = Arc::new(super::DemoExperimentService::new(session));
    let ctx = ButtonContext::new(
        Arc::new(probe),
        service.clone(),
        Arc::new(super::DemoFundingResolver),
        config,
    );

    ui::header("Venmo Experiment");
    ui::key_value("Platform", platform);
    ui::key_value("Session", session);
    ui::key_value("Venmo eligible", if eligible { "yes" } else { "no" });
    ui::key_value("Venmo enabled", if enable { "yes" } else { "no" });
    ui::separator();

    match ctx.venmo_experiment() {
        Some(experiment) => {
            ui::key_value("Enrollment", experiment.name());
            ui::key_value(
                "Bucket",
                if experiment.is_enabled() {
                    "enabled"
                } else {
                    "control"
                },
            );
        }
        None => ui::info("This environment does not enroll in a Venmo experiment"),
    }
    ui::key_value(
        "enable_venmo flag",
        &ctx.experiment_flags().enable_venmo.to_string(),
    );

    // Read again: the context memoizes the selection, so the service is
    // consulted at most once no matter how often callers ask.
    let _ = ctx.venmo_experiment();
    ui::key_value("Service draws", &service.draws().to_string());
    ui::success("Repeated lookups reuse the memoized selection");

    Ok(())
}
