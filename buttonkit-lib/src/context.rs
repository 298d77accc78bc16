//! Button Decision Context
//!
//! The context bundles the injected host capabilities (platform probe,
//! experiment service, funding resolver) with the SDK configuration and the
//! per-context experiment memo cell. Hosts build one context per page render;
//! every decision entry point hangs off it.

use std::sync::Arc;

use crate::config::SdkConfig;
use crate::eligibility;
use crate::experiments::{
    select_venmo_experiment, venmo_experiment_flags, Experiment, ExperimentCell, ExperimentFlags,
    ExperimentService,
};
use crate::platform::PlatformProbe;
use crate::render::{ButtonProps, FundingResolver};
use crate::FundingSource;

/// Decision context for one button integration.
pub struct ButtonContext {
    platform: Arc<dyn PlatformProbe>,
    experiments: Arc<dyn ExperimentService>,
    resolver: Arc<dyn FundingResolver>,
    config: SdkConfig,
    venmo_cell: ExperimentCell,
}

impl ButtonContext {
    /// Create a context from the injected capabilities and configuration.
    pub fn new(
        platform: Arc<dyn PlatformProbe>,
        experiments: Arc<dyn ExperimentService>,
        resolver: Arc<dyn FundingResolver>,
        config: SdkConfig,
    ) -> Self {
        Self {
            platform,
            experiments,
            resolver,
            config,
            venmo_cell: ExperimentCell::new(),
        }
    }

    /// The SDK configuration this context reads.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// The injected platform probe.
    pub fn platform(&self) -> &dyn PlatformProbe {
        self.platform.as_ref()
    }

    /// Whether `funding` can be presented as a scan-to-pay QR code here.
    pub fn supports_qr_pay(&self, funding: FundingSource) -> bool {
        eligibility::supports_qr_pay(self.platform.as_ref(), funding)
    }

    /// Whether this browser can host the native app-switch checkout.
    ///
    /// Recomputed from the probe on every call.
    pub fn is_supported_native_browser(&self) -> bool {
        eligibility::is_supported_native_browser(self.platform.as_ref())
    }

    /// The memoized Venmo experiment enrollment for this context.
    ///
    /// The first call decides (and, when a branch matches, registers the
    /// experiment with the service); every later call returns that first
    /// result unchanged, even if probe or config state shifted in between.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn venmo_experiment(&self) -> Option<Arc<dyn Experiment>> {
        self.venmo_cell.get_or_init(|| {
            select_venmo_experiment(
                self.platform.as_ref(),
                &self.config,
                self.experiments.as_ref(),
            )
        })
    }

    /// Forget the memoized enrollment so the next call recomputes.
    ///
    /// Test-isolation hook; production hosts never call this.
    pub fn reset_venmo_experiment(&self) {
        self.venmo_cell.reset();
    }

    /// Resolve the Venmo flag from a given enrollment.
    ///
    /// Enablement and native-browser support are recomputed fresh here.
    pub fn venmo_experiment_flags(
        &self,
        experiment: Option<&Arc<dyn Experiment>>,
    ) -> ExperimentFlags {
        venmo_experiment_flags(self.platform.as_ref(), &self.config, experiment)
    }

    /// Enroll (memoized) and resolve the Venmo flag in one step.
    pub fn experiment_flags(&self) -> ExperimentFlags {
        let enrollment = self.venmo_experiment();
        self.venmo_experiment_flags(enrollment.as_ref())
    }

    /// Decide the ordered list of buttons to render for `props`.
    ///
    /// Defaults are resolved eagerly (see [`ButtonProps::resolve`]) and the
    /// external resolver's ordering is returned verbatim.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, props), fields(platform = %self.config.platform))
    )]
    pub fn rendered_buttons(&self, props: ButtonProps) -> Vec<FundingSource> {
        let request = props.resolve(self);
        self.resolver.determine_eligible_funding(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FundingEligibility;
    use crate::platform::EmulatedPlatform;
    use crate::test_utils::{MockExperimentService, RecordingResolver, SwitchablePlatform};

    fn venmo_mobile_config() -> SdkConfig {
        SdkConfig::default().with_funding_eligibility(
            FundingEligibility::new().with_source(FundingSource::Venmo, true),
        )
    }

    #[test]
    fn test_enrollment_is_memoized_across_probe_changes() {
        let platform = Arc::new(SwitchablePlatform::new(EmulatedPlatform::ios_safari()));
        let service = Arc::new(MockExperimentService::enabled());
        let ctx = ButtonContext::new(
            platform.clone(),
            service.clone(),
            Arc::new(RecordingResolver::returning(Vec::new())),
            venmo_mobile_config(),
        );

        let first = ctx.venmo_experiment().unwrap();
        assert_eq!(first.name(), "enable_venmo_ios");

        // Flip the environment under the context; the memo must hold.
        platform.switch_to(EmulatedPlatform::android_chrome());
        let second = ctx.venmo_experiment().unwrap();
        assert_eq!(second.name(), "enable_venmo_ios");
        assert_eq!(service.created().len(), 1);
    }

    #[test]
    fn test_reset_rearms_enrollment() {
        let platform = Arc::new(SwitchablePlatform::new(EmulatedPlatform::ios_safari()));
        let service = Arc::new(MockExperimentService::enabled());
        let ctx = ButtonContext::new(
            platform.clone(),
            service.clone(),
            Arc::new(RecordingResolver::returning(Vec::new())),
            venmo_mobile_config(),
        );

        ctx.venmo_experiment();
        platform.switch_to(EmulatedPlatform::android_chrome());
        ctx.reset_venmo_experiment();

        let recomputed = ctx.venmo_experiment().unwrap();
        assert_eq!(recomputed.name(), "enable_venmo_android");
        assert_eq!(service.created().len(), 2);
    }

    #[test]
    fn test_experiment_flags_compose_enrollment_and_resolution() {
        let ctx = ButtonContext::new(
            Arc::new(EmulatedPlatform::ios_safari()),
            Arc::new(MockExperimentService::enabled()),
            Arc::new(RecordingResolver::returning(Vec::new())),
            venmo_mobile_config(),
        );

        assert!(ctx.experiment_flags().enable_venmo);
    }

    #[test]
    fn test_qr_pay_delegates_to_probe() {
        let ctx = ButtonContext::new(
            Arc::new(EmulatedPlatform::desktop()),
            Arc::new(MockExperimentService::disabled()),
            Arc::new(RecordingResolver::returning(Vec::new())),
            SdkConfig::default(),
        );

        assert!(ctx.supports_qr_pay(FundingSource::Venmo));
        assert!(!ctx.supports_qr_pay(FundingSource::Paypal));
    }
}
