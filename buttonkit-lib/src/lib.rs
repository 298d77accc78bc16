//! Buttonkit library.
//!
//! Decision core for a payment-button widget: which checkout flow applies,
//! which funding sources are eligible to render on this device and browser,
//! and a thin adapter over the native Apple Pay wallet session. The crate
//! intentionally owns no I/O; every host capability (platform probes, the
//! experiment service, the funding-eligibility resolver, the native wallet
//! runtime, the page document) is injected through trait-based dependency
//! injection.
//!
//! # Features
//!
//! - **Flow Resolution**: Derive purchase / billing-setup / subscription-setup
//!   intent from merchant props
//! - **Eligibility Gates**: QR-pay support and native-browser capability checks
//! - **Venmo Experiments**: Memoized per-context experiment enrollment with
//!   platform-specific traffic allocations
//! - **Wallet Sessions**: Event-driven Apple Pay session adapter with typed
//!   completion payloads
//!
//! # Example
//!
//! ```ignore
//! use buttonkit_lib::prelude::*;
//! use std::sync::Arc;
//!
//! // Wire the host capabilities into a context
//! let platform = Arc::new(EmulatedPlatform::ios_safari());
//! let config = SdkConfig::default().with_enabled_funding(vec![FundingSource::Venmo]);
//! let ctx = ButtonContext::new(platform, experiments, resolver, config);
//!
//! // Decide what to render
//! let buttons = ctx.rendered_buttons(ButtonProps::default());
//! for funding in &buttons {
//!     println!("render {funding}");
//! }
//! ```

pub mod applepay;
pub mod config;
pub mod context;
pub mod dom;
pub mod eligibility;
pub mod errors;
pub mod experiments;
pub mod flow;
pub mod platform;
pub mod prelude;
pub mod render;

/// Test utilities for decision and session testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use context::ButtonContext;
pub use errors::ButtonError;
pub use flow::{determine_flow, ButtonFlow};

/// Common result alias for buttonkit operations.
pub type Result<T> = std::result::Result<T, ButtonError>;

/// A funding source a payment button can render for.
///
/// This is the closed set of wallet and payment-method identifiers the SDK
/// ships; serialized names are the lowercase wire identifiers.
///
/// # Example
///
/// ```
/// use buttonkit_lib::FundingSource;
///
/// // Parse from the wire identifier
/// let funding: FundingSource = "venmo".parse().unwrap();
/// assert_eq!(funding, FundingSource::Venmo);
///
/// // Access the wire identifier
/// assert_eq!(FundingSource::Paylater.as_str(), "paylater");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingSource {
    Paypal,
    Venmo,
    Applepay,
    Card,
    Credit,
    Paylater,
    Ideal,
    Sepa,
    Bancontact,
    Giropay,
    Sofort,
    Eps,
    Mybank,
    P24,
    Blik,
    Wechatpay,
    Mercadopago,
    Boleto,
    Oxxo,
    Trustly,
    Satispay,
    Multibanco,
    Paidy,
}

impl FundingSource {
    /// Every funding source, in the SDK's canonical order.
    pub const ALL: [FundingSource; 23] = [
        FundingSource::Paypal,
        FundingSource::Venmo,
        FundingSource::Applepay,
        FundingSource::Card,
        FundingSource::Credit,
        FundingSource::Paylater,
        FundingSource::Ideal,
        FundingSource::Sepa,
        FundingSource::Bancontact,
        FundingSource::Giropay,
        FundingSource::Sofort,
        FundingSource::Eps,
        FundingSource::Mybank,
        FundingSource::P24,
        FundingSource::Blik,
        FundingSource::Wechatpay,
        FundingSource::Mercadopago,
        FundingSource::Boleto,
        FundingSource::Oxxo,
        FundingSource::Trustly,
        FundingSource::Satispay,
        FundingSource::Multibanco,
        FundingSource::Paidy,
    ];

    /// Get the wire identifier for this funding source.
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingSource::Paypal => "paypal",
            FundingSource::Venmo => "venmo",
            FundingSource::Applepay => "applepay",
            FundingSource::Card => "card",
            FundingSource::Credit => "credit",
            FundingSource::Paylater => "paylater",
            FundingSource::Ideal => "ideal",
            FundingSource::Sepa => "sepa",
            FundingSource::Bancontact => "bancontact",
            FundingSource::Giropay => "giropay",
            FundingSource::Sofort => "sofort",
            FundingSource::Eps => "eps",
            FundingSource::Mybank => "mybank",
            FundingSource::P24 => "p24",
            FundingSource::Blik => "blik",
            FundingSource::Wechatpay => "wechatpay",
            FundingSource::Mercadopago => "mercadopago",
            FundingSource::Boleto => "boleto",
            FundingSource::Oxxo => "oxxo",
            FundingSource::Trustly => "trustly",
            FundingSource::Satispay => "satispay",
            FundingSource::Multibanco => "multibanco",
            FundingSource::Paidy => "paidy",
        }
    }
}

impl std::str::FromStr for FundingSource {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self> {
        FundingSource::ALL
            .iter()
            .copied()
            .find(|funding| funding.as_str() == s)
            .ok_or_else(|| ButtonError::UnknownFundingSource(s.to_string()))
    }
}

impl AsRef<str> for FundingSource {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for FundingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
