//! Smoke tests for buttonkit-demo-cli
//!
//! These tests verify basic functionality of the CLI without requiring
//! a browser host or a native wallet.

use std::process::Command;

/// Test that the CLI can show help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "buttonkit-demo-cli", "--", "--help"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    // Print output for debugging if test fails
    if !output.status.success() {
        eprintln!("stdout: {}", stdout);
        eprintln!("stderr: {}", stderr);
    }

    // The help should contain key commands
    assert!(
        stdout.contains("buttons") || stderr.contains("buttons"),
        "Help should mention 'buttons' command"
    );
}

/// Test that version is shown
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "buttonkit-demo-cli", "--", "--version"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    // Should output version info
    assert!(
        stdout.contains("buttonkit") || output.status.success(),
        "Version command should succeed"
    );
}

/// Test that the flow command resolves the precedence rule
#[test]
fn test_cli_flow_precedence() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "buttonkit-demo-cli",
            "--",
            "flow",
            "--billing-agreement",
            "--subscription",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let combined = format!("{}{}", stdout, stderr);
    assert!(
        combined.contains("billing_agreement") || output.status.success(),
        "Flow should resolve billing_agreement when both intents are set"
    );
}

/// Test that the scripted Apple Pay walk reaches the native layer
#[test]
fn test_cli_apple_pay_walk() {
    let output = Command::new("cargo")
        .args(["run", "-p", "buttonkit-demo-cli", "--", "apple-pay"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let combined = format!("{}{}", stdout, stderr);
    assert!(
        combined.contains("completeMerchantValidation") || output.status.success(),
        "Apple Pay walk should log the forwarded native calls"
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests that don't require running the binary

    use buttonkit_lib::test_utils::venmo_checkout_config;
    use buttonkit_lib::{determine_flow, ButtonFlow, FundingSource};

    #[test]
    fn test_flow_precedence() {
        assert_eq!(determine_flow(true, true), ButtonFlow::BillingSetup);
        assert_eq!(determine_flow(false, true), ButtonFlow::SubscriptionSetup);
        assert_eq!(determine_flow(false, false), ButtonFlow::Purchase);
    }

    #[test]
    fn test_funding_source_parses_cli_names() {
        let funding: FundingSource = "venmo".parse().unwrap();
        assert_eq!(funding, FundingSource::Venmo);
        assert!("venom".parse::<FundingSource>().is_err());
    }

    #[test]
    fn test_fixture_config_marks_venmo_eligible() {
        let config = venmo_checkout_config();
        assert!(config.is_funding_eligible(FundingSource::Venmo));
        assert!(!config.is_funding_eligible(FundingSource::Boleto));
    }
}
