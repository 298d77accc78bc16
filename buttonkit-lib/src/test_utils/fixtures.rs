//! Test fixtures and data generators.

use crate::applepay::{LineItem, PaymentRequest};
use crate::config::{FundingEligibility, SdkConfig, SdkPlatform};
use crate::FundingSource;

/// Collection of commonly used test fixtures.
pub struct TestFixtures;

impl TestFixtures {
    /// Card networks accepted by the fixture merchant.
    pub const CARD_NETWORKS: &'static [&'static str] = &["visa", "masterCard", "amex"];

    /// Merchant capabilities advertised by the fixture merchant.
    pub const MERCHANT_CAPABILITIES: &'static [&'static str] = &["supports3DS"];

    /// Funding sources a typical US merchant keeps eligible.
    pub const COMMON_SOURCES: &'static [FundingSource] = &[
        FundingSource::Paypal,
        FundingSource::Venmo,
        FundingSource::Card,
        FundingSource::Credit,
        FundingSource::Paylater,
    ];

    /// Sample decimal amount strings for sheet totals.
    pub const SAMPLE_AMOUNTS: &'static [&'static str] = &["1.00", "10.00", "99.99", "1250.00"];

    /// Get a sample amount string.
    pub fn sample_amount(index: usize) -> &'static str {
        Self::SAMPLE_AMOUNTS[index % Self::SAMPLE_AMOUNTS.len()]
    }

    /// Eligibility table marking every common source eligible.
    pub fn common_eligibility() -> FundingEligibility {
        Self::COMMON_SOURCES
            .iter()
            .fold(FundingEligibility::new(), |table, &funding| {
                table.with_source(funding, true)
            })
    }
}

/// SDK config for a mobile checkout where Venmo is eligible.
pub fn venmo_checkout_config() -> SdkConfig {
    SdkConfig::default()
        .with_platform(SdkPlatform::Mobile)
        .with_funding_eligibility(TestFixtures::common_eligibility())
}

/// SDK config for a desktop checkout with the common sources eligible.
pub fn desktop_checkout_config() -> SdkConfig {
    SdkConfig::default()
        .with_platform(SdkPlatform::Desktop)
        .with_funding_eligibility(TestFixtures::common_eligibility())
}

/// Minimal wallet payment request for a US checkout.
pub fn test_payment_request() -> PaymentRequest {
    PaymentRequest {
        country_code: "US".to_string(),
        currency_code: "USD".to_string(),
        supported_networks: TestFixtures::CARD_NETWORKS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        merchant_capabilities: TestFixtures::MERCHANT_CAPABILITIES
            .iter()
            .map(|s| s.to_string())
            .collect(),
        total: LineItem::new("Demo Store", TestFixtures::sample_amount(1)),
        ..Default::default()
    }
}
