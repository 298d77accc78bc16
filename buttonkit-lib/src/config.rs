//! SDK Configuration
//!
//! This module defines the configuration the decision core reads: the
//! merchant's explicitly enabled funding sources, the SDK's per-source
//! eligibility table, the platform bucket, and the loaded components.
//! Configuration is plain owned data resolved by the embedder before any
//! decision call; absent table entries read as not-eligible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{FundingSource, Result};

/// Which platform bucket the SDK classified the session into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkPlatform {
    /// Desktop browser session (default).
    #[default]
    Desktop,
    /// Mobile or tablet browser session.
    Mobile,
}

impl SdkPlatform {
    /// Get the wire identifier for this platform bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            SdkPlatform::Desktop => "desktop",
            SdkPlatform::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for SdkPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-source entry in the funding-eligibility table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingSourceEligibility {
    /// Whether the SDK considers this source renderable at all.
    #[serde(default)]
    pub eligible: bool,
}

impl FundingSourceEligibility {
    /// Create an entry with the given eligibility.
    pub fn new(eligible: bool) -> Self {
        Self { eligible }
    }
}

/// The SDK's funding-eligibility table, keyed by funding source.
///
/// Sources absent from the table are not eligible.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundingEligibility {
    /// Map of funding source to its eligibility entry.
    pub entries: HashMap<FundingSource, FundingSourceEligibility>,
}

impl FundingEligibility {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the table marks `funding` eligible.
    ///
    /// Absent entries read as `false`.
    pub fn is_eligible(&self, funding: FundingSource) -> bool {
        self.entries
            .get(&funding)
            .map(|entry| entry.eligible)
            .unwrap_or(false)
    }

    /// Add or replace an entry.
    pub fn with_source(mut self, funding: FundingSource, eligible: bool) -> Self {
        self.entries
            .insert(funding, FundingSourceEligibility::new(eligible));
        self
    }

    /// Funding sources the table marks eligible, in canonical order.
    pub fn eligible_sources(&self) -> Vec<FundingSource> {
        FundingSource::ALL
            .iter()
            .copied()
            .filter(|funding| self.is_eligible(*funding))
            .collect()
    }
}

/// SDK configuration the decision core reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Funding sources the merchant explicitly enabled on the SDK URL.
    #[serde(default)]
    pub enabled_funding: Vec<FundingSource>,
    /// The SDK's funding-eligibility table.
    #[serde(default)]
    pub funding_eligibility: FundingEligibility,
    /// Platform bucket for this session.
    #[serde(default)]
    pub platform: SdkPlatform,
    /// SDK components loaded on the page.
    #[serde(default = "default_components")]
    pub components: Vec<String>,
}

fn default_components() -> Vec<String> {
    vec!["buttons".to_string()]
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            enabled_funding: Vec::new(),
            funding_eligibility: FundingEligibility::default(),
            platform: SdkPlatform::default(),
            components: default_components(),
        }
    }
}

impl SdkConfig {
    /// Replace the enabled-funding list.
    pub fn with_enabled_funding(mut self, funding: Vec<FundingSource>) -> Self {
        self.enabled_funding = funding;
        self
    }

    /// Replace the funding-eligibility table.
    pub fn with_funding_eligibility(mut self, table: FundingEligibility) -> Self {
        self.funding_eligibility = table;
        self
    }

    /// Set the platform bucket.
    pub fn with_platform(mut self, platform: SdkPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Replace the component list.
    pub fn with_components(mut self, components: Vec<String>) -> Self {
        self.components = components;
        self
    }

    /// Whether the merchant explicitly enabled `funding` on the SDK URL.
    pub fn is_funding_enabled(&self, funding: FundingSource) -> bool {
        self.enabled_funding.contains(&funding)
    }

    /// Whether the eligibility table marks `funding` eligible.
    pub fn is_funding_eligible(&self, funding: FundingSource) -> bool {
        self.funding_eligibility.is_eligible(funding)
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads_buttons_component() {
        let config = SdkConfig::default();
        assert_eq!(config.components, vec!["buttons".to_string()]);
        assert_eq!(config.platform, SdkPlatform::Desktop);
        assert!(config.enabled_funding.is_empty());
    }

    #[test]
    fn test_absent_table_entry_reads_not_eligible() {
        let table = FundingEligibility::new().with_source(FundingSource::Paypal, true);
        assert!(table.is_eligible(FundingSource::Paypal));
        assert!(!table.is_eligible(FundingSource::Venmo));
    }

    #[test]
    fn test_ineligible_entry_stays_ineligible() {
        let table = FundingEligibility::new().with_source(FundingSource::Venmo, false);
        assert!(!table.is_eligible(FundingSource::Venmo));
        assert!(table.eligible_sources().is_empty());
    }

    #[test]
    fn test_eligible_sources_follow_canonical_order() {
        let table = FundingEligibility::new()
            .with_source(FundingSource::Venmo, true)
            .with_source(FundingSource::Paypal, true);
        assert_eq!(
            table.eligible_sources(),
            vec![FundingSource::Paypal, FundingSource::Venmo]
        );
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SdkConfig::default()
            .with_enabled_funding(vec![FundingSource::Venmo])
            .with_funding_eligibility(
                FundingEligibility::new()
                    .with_source(FundingSource::Paypal, true)
                    .with_source(FundingSource::Venmo, true),
            )
            .with_platform(SdkPlatform::Mobile);

        let json = config.to_json().unwrap();
        let parsed = SdkConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_json_fills_missing_fields() {
        let parsed = SdkConfig::from_json("{}").unwrap();
        assert_eq!(parsed, SdkConfig::default());

        let parsed = SdkConfig::from_json(r#"{"platform":"mobile"}"#).unwrap();
        assert_eq!(parsed.platform, SdkPlatform::Mobile);
        assert_eq!(parsed.components, vec!["buttons".to_string()]);
    }
}
