//! End-to-end render decisions.
//!
//! These tests drive [`ButtonContext::rendered_buttons`] through realistic
//! merchant configurations and emulated environments, with a resolver that
//! behaves like a production eligibility service.
//!
//! ```bash
//! cargo test -p buttonkit-lib --test render_pipeline
//! ```


use std::sync::Arc;

use buttonkit_lib::config::{FundingEligibility, SdkConfig, SdkPlatform};
use buttonkit_lib::platform::EmulatedPlatform;
use buttonkit_lib::render::ButtonProps;
use buttonkit_lib::{ButtonContext, FundingSource};
use mock_implementations::{FixedExperiments, ScenarioResolver};

fn checkout_config(platform: SdkPlatform) -> SdkConfig {
    SdkConfig::default().with_platform(platform).with_funding_eligibility(
        FundingEligibility::new()
            .with_source(FundingSource::Paypal, true)
            .with_source(FundingSource::Venmo, true)
            .with_source(FundingSource::Applepay, true)
            .with_source(FundingSource::Card, true),
    )
}

fn checkout(
    platform: EmulatedPlatform,
    experiments: FixedExperiments,
    config: SdkConfig,
) -> ButtonContext {
    ButtonContext::new(
        Arc::new(platform),
        Arc::new(experiments),
        Arc::new(ScenarioResolver),
        config,
    )
}

#[test]
fn test_mobile_safari_renders_venmo_for_enrolled_shoppers() {
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::enrolled(),
        checkout_config(SdkPlatform::Mobile),
    );

    let buttons = ctx.rendered_buttons(ButtonProps::default());
    assert!(buttons.contains(&FundingSource::Venmo));
}

#[test]
fn test_venmo_needs_enrollment_or_explicit_enable() {
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::not_enrolled(),
        checkout_config(SdkPlatform::Mobile),
    );

    let buttons = ctx.rendered_buttons(ButtonProps::default());
    assert!(!buttons.contains(&FundingSource::Venmo));
    assert!(buttons.contains(&FundingSource::Paypal));
}

#[test]
fn test_enabled_funding_substitutes_for_enrollment() {
    let config =
        checkout_config(SdkPlatform::Mobile).with_enabled_funding(vec![FundingSource::Venmo]);
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::not_enrolled(),
        config,
    );

    let buttons = ctx.rendered_buttons(ButtonProps::default());
    assert!(buttons.contains(&FundingSource::Venmo));
}

#[test]
fn test_restricted_webview_blocks_venmo() {
    let config =
        checkout_config(SdkPlatform::Mobile).with_enabled_funding(vec![FundingSource::Venmo]);
    let ctx = checkout(
        EmulatedPlatform::ios_safari().with_restricted_webview(true),
        FixedExperiments::enrolled(),
        config,
    );

    let buttons = ctx.rendered_buttons(ButtonProps::default());
    assert!(!buttons.contains(&FundingSource::Venmo));
}

#[test]
fn test_desktop_venmo_follows_enrollment_only() {
    let enrolled = checkout(
        EmulatedPlatform::desktop(),
        FixedExperiments::enrolled(),
        checkout_config(SdkPlatform::Desktop),
    );
    assert!(enrolled
        .rendered_buttons(ButtonProps::default())
        .contains(&FundingSource::Venmo));

    // On desktop an explicit enable does not substitute for enrollment.
    let config =
        checkout_config(SdkPlatform::Desktop).with_enabled_funding(vec![FundingSource::Venmo]);
    let outside = checkout(
        EmulatedPlatform::desktop(),
        FixedExperiments::not_enrolled(),
        config,
    );
    assert!(!outside
        .rendered_buttons(ButtonProps::default())
        .contains(&FundingSource::Venmo));
}

#[test]
fn test_apple_pay_needs_the_host_flag() {
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::enrolled(),
        checkout_config(SdkPlatform::Mobile),
    );

    let without_flag = ctx.rendered_buttons(ButtonProps::default());
    assert!(!without_flag.contains(&FundingSource::Applepay));

    let with_flag = ctx.rendered_buttons(ButtonProps::default().with_apple_pay_support(true));
    assert!(with_flag.contains(&FundingSource::Applepay));
}

#[test]
fn test_pinned_funding_source_leads_the_list() {
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::enrolled(),
        checkout_config(SdkPlatform::Mobile),
    );

    let buttons =
        ctx.rendered_buttons(ButtonProps::default().with_funding_source(FundingSource::Card));
    assert_eq!(buttons.first(), Some(&FundingSource::Card));
}

#[test]
fn test_rendered_order_is_canonical() {
    let ctx = checkout(
        EmulatedPlatform::ios_safari(),
        FixedExperiments::enrolled(),
        checkout_config(SdkPlatform::Mobile),
    );

    let buttons = ctx.rendered_buttons(ButtonProps::default());
    assert_eq!(
        buttons,
        vec![
            FundingSource::Paypal,
            FundingSource::Venmo,
            FundingSource::Card
        ]
    );
}
