//! Checkout-flow resolution command.

use anyhow::Result;
use buttonkit_lib::determine_flow;

use crate::ui;

pub fn run(billing_agreement: bool, subscription: bool, _verbose: bool) -> Result<()> {
    let flow = determine_flow(billing_agreement, subscription);

    ui::header("Checkout Flow");
    ui::key_value(
        "Billing agreement",
        if billing_agreement { "yes" } else { "no" },
    );
    ui::key_value("Subscription", if subscription { "yes" } else { "no" });
    ui::separator();

    if billing_agreement && subscription {
        ui::info("Billing agreement takes precedence over subscription");
    }
    ui::success(&format!("Resolved flow: {flow}"));

    Ok(())
}
