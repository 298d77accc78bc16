//! Checkout Flow Resolution
//!
//! This module derives which checkout flow a button render represents from
//! the merchant's integration props.

use serde::{Deserialize, Serialize};

use crate::{ButtonError, Result};

/// The checkout flow a button render represents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonFlow {
    /// One-time purchase (default).
    #[default]
    Purchase,
    /// Vault a billing agreement for later charges.
    BillingSetup,
    /// Set up a recurring subscription.
    SubscriptionSetup,
}

impl ButtonFlow {
    /// Get the wire identifier for this flow.
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonFlow::Purchase => "purchase",
            ButtonFlow::BillingSetup => "billing_setup",
            ButtonFlow::SubscriptionSetup => "subscription_setup",
        }
    }
}

impl std::str::FromStr for ButtonFlow {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "purchase" => Ok(ButtonFlow::Purchase),
            "billing_setup" => Ok(ButtonFlow::BillingSetup),
            "subscription_setup" => Ok(ButtonFlow::SubscriptionSetup),
            other => Err(ButtonError::UnknownFlow(other.to_string())),
        }
    }
}

impl std::fmt::Display for ButtonFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Determine the checkout flow from the merchant's integration intents.
///
/// # Semantics
/// - A billing-agreement intent always wins, even when a subscription intent
///   is also present.
/// - A subscription intent wins over plain purchase.
/// - With neither intent, the flow is a one-time purchase.
pub fn determine_flow(has_billing_agreement: bool, has_subscription: bool) -> ButtonFlow {
    if has_billing_agreement {
        ButtonFlow::BillingSetup
    } else if has_subscription {
        ButtonFlow::SubscriptionSetup
    } else {
        ButtonFlow::Purchase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_agreement_takes_precedence() {
        assert_eq!(determine_flow(true, true), ButtonFlow::BillingSetup);
        assert_eq!(determine_flow(true, false), ButtonFlow::BillingSetup);
    }

    #[test]
    fn test_subscription_wins_over_purchase() {
        assert_eq!(determine_flow(false, true), ButtonFlow::SubscriptionSetup);
    }

    #[test]
    fn test_no_intent_defaults_to_purchase() {
        assert_eq!(determine_flow(false, false), ButtonFlow::Purchase);
    }

    #[test]
    fn test_flow_wire_names() {
        assert_eq!(ButtonFlow::BillingSetup.as_str(), "billing_setup");
        assert_eq!(
            "subscription_setup".parse::<ButtonFlow>().unwrap(),
            ButtonFlow::SubscriptionSetup
        );
        assert!("checkout".parse::<ButtonFlow>().is_err());
    }

    #[test]
    fn test_flow_serde_uses_snake_case() {
        let json = serde_json::to_string(&ButtonFlow::SubscriptionSetup).unwrap();
        assert_eq!(json, "\"subscription_setup\"");
    }
}
