//! Render-decision command: which buttons show up for a merchant setup.

use std::sync::Arc;

use anyhow::{Context, Result};
use buttonkit_lib::config::{FundingEligibility, SdkConfig, SdkPlatform};
use buttonkit_lib::platform::PlatformProbe;
use buttonkit_lib::render::ButtonProps;
use buttonkit_lib::{determine_flow, ButtonContext, FundingSource};

use crate::ui;

#[tracing::instrument(skip(eligible, enable, config_file))]
#[allow(clippy::too_many_arguments)]
pub fn run(
    platform: &str,
    eligible: &[String],
    enable: &[String],
    funding_source: Option<&str>,
    apple_pay: bool,
    billing_agreement: bool,
    subscription: bool,
    config_file: Option<&str>,
    session: &str,
    verbose: bool,
) -> Result<()> {
    let probe = super::platform_preset(platform)?;

    let config = match config_file {
        Some(path) => {
            tracing::debug!("Loading SDK config from {}", path);
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{path}'"))?;
            SdkConfig::from_json(&json)?
        }
        None => flag_config(&probe, eligible, enable)?,
    };

    let ctx = ButtonContext::new(
        Arc::new(probe),
        Arc::new(super::DemoExperimentService::new(session)),
        Arc::new(super::DemoFundingResolver),
        config,
    );

    let mut props = ButtonProps::default().with_apple_pay_support(apple_pay);
    if let Some(name) = funding_source {
        props = props.with_funding_source(name.parse::<FundingSource>()?);
    }
    if billing_agreement {
        props = props.with_billing_agreement();
    }
    if subscription {
        props = props.with_subscription();
    }

    ui::header("Environment");
    ui::key_value("Platform", platform);
    ui::key_value(
        "Native browser",
        if ctx.is_supported_native_browser() {
            "supported"
        } else {
            "unsupported"
        },
    );
    ui::key_value(
        "QR pay (venmo)",
        if ctx.supports_qr_pay(FundingSource::Venmo) {
            "available"
        } else {
            "unavailable"
        },
    );
    ui::key_value(
        "Flow",
        determine_flow(billing_agreement, subscription).as_str(),
    );

    match ctx.venmo_experiment() {
        Some(experiment) => ui::key_value(
            "Venmo experiment",
            &format!(
                "{} ({})",
                experiment.name(),
                if experiment.is_enabled() {
                    "enabled"
                } else {
                    "control"
                }
            ),
        ),
        None => ui::key_value("Venmo experiment", "none"),
    }
    ui::key_value(
        "enable_venmo flag",
        &ctx.experiment_flags().enable_venmo.to_string(),
    );

    if verbose {
        ui::separator();
        ui::json(&serde_json::to_value(ctx.config())?);
    }

    ui::header("Rendered buttons");
    let buttons = ctx.rendered_buttons(props);
    if buttons.is_empty() {
        ui::warning("No button is eligible for this setup");
    } else {
        for (index, funding) in buttons.iter().enumerate() {
            println!("  {}. {}", index + 1, funding);
        }
        ui::success(&format!("{} button(s) would render", buttons.len()));
    }

    Ok(())
}

fn flag_config(
    probe: &dyn PlatformProbe,
    eligible: &[String],
    enable: &[String],
) -> Result<SdkConfig> {
    let eligible = if eligible.is_empty() {
        vec![
            FundingSource::Paypal,
            FundingSource::Venmo,
            FundingSource::Card,
        ]
    } else {
        super::parse_funding(eligible)?
    };

    let mut table = FundingEligibility::new();
    for funding in eligible {
        table = table.with_source(funding, true);
    }

    let platform = if probe.is_device() {
        SdkPlatform::Mobile
    } else {
        SdkPlatform::Desktop
    };

    Ok(SdkConfig::default()
        .with_platform(platform)
        .with_funding_eligibility(table)
        .with_enabled_funding(super::parse_funding(enable)?))
}
