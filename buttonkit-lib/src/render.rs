//! Render Decision Aggregation
//!
//! This module assembles every input the external funding resolver needs to
//! decide which buttons render: merchant props with eagerly resolved
//! defaults, the computed checkout flow, and the SDK's platform and component
//! reads. The ranking algorithm itself lives behind the [`FundingResolver`]
//! seam; this crate forwards its ordered result verbatim.

use serde::{Deserialize, Serialize};

use crate::config::{FundingEligibility, SdkPlatform};
use crate::context::ButtonContext;
use crate::experiments::ExperimentFlags;
use crate::flow::{determine_flow, ButtonFlow};
use crate::FundingSource;

/// Button arrangement requested by the merchant's style options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLayout {
    /// Buttons side by side.
    Horizontal,
    /// Buttons stacked.
    Vertical,
}

/// Merchant style options that participate in the render decision.
///
/// Only the layout matters here; visual styling is out of scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonStyle {
    /// Requested button arrangement, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<ButtonLayout>,
}

/// Merchant integration props for a button render.
///
/// Every optional field has a documented default resolved eagerly by
/// [`ButtonProps::resolve`]; nothing downstream sees an unset input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonProps {
    /// Single funding source the merchant pinned, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_source: Option<FundingSource>,
    /// Whether the merchant registered a shipping-change callback.
    pub on_shipping_change: bool,
    /// Style options.
    pub style: ButtonStyle,
    /// Override for the SDK's funding-eligibility table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_eligibility: Option<FundingEligibility>,
    /// Override for the resolved experiment flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment: Option<ExperimentFlags>,
    /// Host-reported Apple Pay support flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apple_pay_support: Option<bool>,
    /// Override for the popup-support probe.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_popups: Option<bool>,
    /// Override for the native-browser capability check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_native_browser: Option<bool>,
    /// Merchant intends to vault a billing agreement.
    pub create_billing_agreement: bool,
    /// Merchant intends to set up a subscription.
    pub create_subscription: bool,
}

impl ButtonProps {
    /// Pin a single funding source.
    pub fn with_funding_source(mut self, funding: FundingSource) -> Self {
        self.funding_source = Some(funding);
        self
    }

    /// Request a button arrangement.
    pub fn with_layout(mut self, layout: ButtonLayout) -> Self {
        self.style.layout = Some(layout);
        self
    }

    /// Mark the shipping-change callback as registered.
    pub fn with_shipping_change(mut self) -> Self {
        self.on_shipping_change = true;
        self
    }

    /// Override the funding-eligibility table for this render.
    pub fn with_funding_eligibility(mut self, table: FundingEligibility) -> Self {
        self.funding_eligibility = Some(table);
        self
    }

    /// Override the resolved experiment flags for this render.
    pub fn with_experiment(mut self, flags: ExperimentFlags) -> Self {
        self.experiment = Some(flags);
        self
    }

    /// Set the host-reported Apple Pay support flag.
    pub fn with_apple_pay_support(mut self, supported: bool) -> Self {
        self.apple_pay_support = Some(supported);
        self
    }

    /// Override the popup-support probe for this render.
    pub fn with_popup_support(mut self, supported: bool) -> Self {
        self.supports_popups = Some(supported);
        self
    }

    /// Override the native-browser capability check for this render.
    pub fn with_native_browser_support(mut self, supported: bool) -> Self {
        self.supported_native_browser = Some(supported);
        self
    }

    /// Declare a billing-agreement intent.
    pub fn with_billing_agreement(mut self) -> Self {
        self.create_billing_agreement = true;
        self
    }

    /// Declare a subscription intent.
    pub fn with_subscription(mut self) -> Self {
        self.create_subscription = true;
        self
    }

    /// Resolve every unset optional input against the context, eagerly.
    ///
    /// Default resolution per field:
    /// - `funding_eligibility`: the SDK config's table
    /// - `experiment`: memoized Venmo enrollment, resolved to flags
    /// - `supports_popups`: the platform probe
    /// - `supported_native_browser`: the capability check
    /// - `apple_pay_support`: `false` (host passthrough; there is no probe)
    ///
    /// The checkout flow, the empty remembered list, and the platform and
    /// component reads are computed here as well, so the returned request is
    /// complete.
    pub fn resolve(self, ctx: &ButtonContext) -> FundingRequest {
        let flow = determine_flow(self.create_billing_agreement, self.create_subscription);

        let funding_eligibility = self
            .funding_eligibility
            .unwrap_or_else(|| ctx.config().funding_eligibility.clone());
        let experiment = self.experiment.unwrap_or_else(|| ctx.experiment_flags());
        let supports_popups = self
            .supports_popups
            .unwrap_or_else(|| ctx.platform().supports_popups());
        let supported_native_browser = self
            .supported_native_browser
            .unwrap_or_else(|| ctx.is_supported_native_browser());

        FundingRequest {
            funding_source: self.funding_source,
            remembered: Vec::new(),
            layout: self.style.layout,
            platform: ctx.config().platform,
            funding_eligibility,
            components: ctx.config().components.clone(),
            on_shipping_change: self.on_shipping_change,
            flow,
            apple_pay_support: self.apple_pay_support.unwrap_or(false),
            supports_popups,
            supported_native_browser,
            experiment,
        }
    }
}

/// Fully resolved inputs handed to the external funding resolver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundingRequest {
    /// Funding source the merchant pinned, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_source: Option<FundingSource>,
    /// Funding sources remembered from prior sessions. Always empty today;
    /// the field rides along for resolver compatibility.
    pub remembered: Vec<FundingSource>,
    /// Requested button arrangement, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ButtonLayout>,
    /// Platform bucket from the SDK config.
    pub platform: SdkPlatform,
    /// Resolved funding-eligibility table.
    pub funding_eligibility: FundingEligibility,
    /// SDK components loaded on the page.
    pub components: Vec<String>,
    /// Whether a shipping-change callback is registered.
    pub on_shipping_change: bool,
    /// Computed checkout flow.
    pub flow: ButtonFlow,
    /// Host-reported Apple Pay support.
    pub apple_pay_support: bool,
    /// Resolved popup support.
    pub supports_popups: bool,
    /// Resolved native-browser capability.
    pub supported_native_browser: bool,
    /// Resolved experiment flags.
    pub experiment: ExperimentFlags,
}

/// External resolver that ranks eligible funding sources for a render.
///
/// Implementations receive a fully resolved [`FundingRequest`] and return the
/// ordered list of buttons to render. The list is forwarded to callers
/// verbatim; this crate never reorders or filters it.
pub trait FundingResolver: Send + Sync {
    /// Rank the funding sources to render for `request`.
    fn determine_eligible_funding(&self, request: &FundingRequest) -> Vec<FundingSource>;
}
