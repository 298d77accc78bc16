//! Venmo Experiment Enrollment
//!
//! This module decides whether the current render participates in a Venmo
//! rollout experiment, and what flag the decision produces. The experiment
//! service itself is external; requesting an experiment from it has a
//! bucketing side effect, so enrollment must happen at most once per context.
//!
//! # Memoization
//!
//! Enrollment is memoized through an explicit [`ExperimentCell`] owned by the
//! [`ButtonContext`](crate::ButtonContext), never through process globals.
//! The first computed result (including "no experiment") sticks for the life
//! of the context even when probe or config state changes afterwards; tests
//! re-arm a cell with [`ExperimentCell::reset`].

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::config::SdkConfig;
use crate::eligibility::is_supported_native_browser;
use crate::platform::PlatformProbe;
use crate::FundingSource;

/// Experiment name for the Venmo rollout on iOS Safari.
pub const VENMO_EXPERIMENT_IOS: &str = "enable_venmo_ios";

/// Experiment name for the Venmo rollout on Android Chrome.
pub const VENMO_EXPERIMENT_ANDROID: &str = "enable_venmo_android";

/// Experiment name for the Venmo rollout on desktop.
pub const VENMO_EXPERIMENT_DESKTOP: &str = "enable_venmo_desktop";

/// Traffic allocation (percent) for the iOS Safari rollout.
pub const VENMO_TRAFFIC_IOS: u8 = 90;

/// Traffic allocation (percent) for the Android Chrome rollout.
pub const VENMO_TRAFFIC_ANDROID: u8 = 90;

/// Traffic allocation (percent) for the desktop rollout.
pub const VENMO_TRAFFIC_DESKTOP: u8 = 100;

/// A created experiment enrollment.
///
/// The handle is opaque: the only queries are the experiment's name and
/// whether this session landed in the enabled bucket.
pub trait Experiment: Send + Sync {
    /// The experiment name this enrollment belongs to.
    fn name(&self) -> &str;

    /// Whether this session is in the enabled bucket.
    fn is_enabled(&self) -> bool;
}

/// External experiment service.
///
/// Creating an experiment registers this session with the service's bucketing
/// infrastructure, which is a side effect. Callers must not create the same
/// experiment repeatedly; route enrollment through an [`ExperimentCell`].
pub trait ExperimentService: Send + Sync {
    /// Create (and bucket) an experiment enrollment.
    ///
    /// `traffic_percent` is the share of sessions the service should place in
    /// the enabled bucket.
    fn create_experiment(&self, name: &str, traffic_percent: u8) -> Arc<dyn Experiment>;
}

/// Flags produced by resolving experiment state for a render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentFlags {
    /// Whether Venmo may be presented for this render.
    pub enable_venmo: bool,
}

/// Option-typed memo cell for experiment enrollment.
///
/// Distinguishes "never computed" from "computed as no experiment", so a
/// `None` enrollment is also computed exactly once.
pub struct ExperimentCell {
    memo: RwLock<Option<Option<Arc<dyn Experiment>>>>,
}

impl ExperimentCell {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            memo: RwLock::new(None),
        }
    }

    /// Return the memoized enrollment, computing it on first use.
    ///
    /// The computation runs under the cell's write lock, so racing first
    /// calls still produce exactly one service registration. A re-entrant
    /// call from inside `compute` would deadlock; enrollment computations
    /// must not request themselves.
    pub fn get_or_init(
        &self,
        compute: impl FnOnce() -> Option<Arc<dyn Experiment>>,
    ) -> Option<Arc<dyn Experiment>> {
        if let Some(cached) = self
            .memo
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return cached.clone();
        }

        let mut memo = self.memo.write().unwrap_or_else(|e| e.into_inner());
        if let Some(cached) = memo.as_ref() {
            return cached.clone();
        }

        let enrollment = compute();
        *memo = Some(enrollment.clone());
        enrollment
    }

    /// Forget the memoized enrollment so the next call recomputes.
    ///
    /// Exists for test isolation. Production hosts build one context per
    /// page and never reset.
    pub fn reset(&self) {
        *self.memo.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Whether an enrollment (possibly "no experiment") has been computed.
    pub fn is_computed(&self) -> bool {
        self.memo.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

impl Default for ExperimentCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide which Venmo experiment (if any) this render enrolls in.
///
/// This is the uncached decision; callers go through
/// [`ButtonContext::venmo_experiment`](crate::ButtonContext::venmo_experiment),
/// which memoizes it.
///
/// # Semantics
/// On a device context, enrollment is skipped entirely when any of these hold:
/// - the eligibility table does not mark Venmo eligible
/// - the merchant explicitly enabled Venmo *and* the browser already supports
///   the native app-switch (no experiment needed to show the button)
/// - the browser does not support the native app-switch
///
/// Past the guards, iOS Safari enrolls in [`VENMO_EXPERIMENT_IOS`] and
/// Android Chrome in [`VENMO_EXPERIMENT_ANDROID`].
///
/// Desktop contexts always enroll in [`VENMO_EXPERIMENT_DESKTOP`], regardless
/// of eligibility or enablement.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, fields(device = platform.is_device()))
)]
pub fn select_venmo_experiment(
    platform: &dyn PlatformProbe,
    config: &SdkConfig,
    service: &dyn ExperimentService,
) -> Option<Arc<dyn Experiment>> {
    if !platform.is_device() {
        return Some(service.create_experiment(VENMO_EXPERIMENT_DESKTOP, VENMO_TRAFFIC_DESKTOP));
    }

    let eligible = config.is_funding_eligible(FundingSource::Venmo);
    let explicitly_enabled = config.is_funding_enabled(FundingSource::Venmo);
    let native_supported = is_supported_native_browser(platform);

    if !eligible || (explicitly_enabled && native_supported) || !native_supported {
        return None;
    }

    if platform.is_ios() && platform.is_safari() {
        return Some(service.create_experiment(VENMO_EXPERIMENT_IOS, VENMO_TRAFFIC_IOS));
    }

    if platform.is_android() && platform.is_chrome() {
        return Some(service.create_experiment(VENMO_EXPERIMENT_ANDROID, VENMO_TRAFFIC_ANDROID));
    }

    // The native-browser guard already rejected every other pairing.
    None
}

/// Resolve the Venmo flag from an enrollment (or the lack of one).
///
/// Enablement and native-browser support are recomputed here, fresh; nothing
/// is reused from the enrollment decision.
///
/// # Semantics
/// - Device: Venmo is enabled when (the experiment bucket is enabled *or* the
///   merchant explicitly enabled Venmo) *and* the browser supports the native
///   app-switch.
/// - Desktop: Venmo is enabled exactly when the experiment bucket is enabled.
///   Explicit enablement and native support play no part.
pub fn venmo_experiment_flags(
    platform: &dyn PlatformProbe,
    config: &SdkConfig,
    experiment: Option<&Arc<dyn Experiment>>,
) -> ExperimentFlags {
    let experiment_active = experiment.map(|e| e.is_enabled()).unwrap_or(false);

    let enable_venmo = if platform.is_device() {
        let explicitly_enabled = config.is_funding_enabled(FundingSource::Venmo);
        (experiment_active || explicitly_enabled) && is_supported_native_browser(platform)
    } else {
        experiment_active
    };

    ExperimentFlags { enable_venmo }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::config::FundingEligibility;
    use crate::platform::EmulatedPlatform;

    struct StubExperiment {
        name: String,
        enabled: bool,
    }

    impl Experiment for StubExperiment {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }
    }

    struct CountingService {
        enabled: bool,
        created: Mutex<Vec<(String, u8)>>,
    }

    impl CountingService {
        fn new(enabled: bool) -> Self {
            Self {
                enabled,
                created: Mutex::new(Vec::new()),
            }
        }

        fn created(&self) -> Vec<(String, u8)> {
            self.created.lock().unwrap().clone()
        }
    }

    impl ExperimentService for CountingService {
        fn create_experiment(&self, name: &str, traffic_percent: u8) -> Arc<dyn Experiment> {
            self.created
                .lock()
                .unwrap()
                .push((name.to_string(), traffic_percent));
            Arc::new(StubExperiment {
                name: name.to_string(),
                enabled: self.enabled,
            })
        }
    }

    fn create_test_config(venmo_eligible: bool, venmo_enabled: bool) -> SdkConfig {
        let mut config = SdkConfig::default().with_funding_eligibility(
            FundingEligibility::new().with_source(FundingSource::Venmo, venmo_eligible),
        );
        if venmo_enabled {
            config = config.with_enabled_funding(vec![FundingSource::Venmo]);
        }
        config
    }

    #[test]
    fn test_ios_safari_enrolls_ios_experiment() {
        let platform = EmulatedPlatform::ios_safari();
        let service = CountingService::new(true);
        let config = create_test_config(true, false);

        let experiment = select_venmo_experiment(&platform, &config, &service).unwrap();
        assert_eq!(experiment.name(), VENMO_EXPERIMENT_IOS);
        assert_eq!(service.created(), vec![(VENMO_EXPERIMENT_IOS.to_string(), 90)]);
    }

    #[test]
    fn test_android_chrome_enrolls_android_experiment() {
        let platform = EmulatedPlatform::android_chrome();
        let service = CountingService::new(true);
        let config = create_test_config(true, false);

        let experiment = select_venmo_experiment(&platform, &config, &service).unwrap();
        assert_eq!(experiment.name(), VENMO_EXPERIMENT_ANDROID);
        assert_eq!(
            service.created(),
            vec![(VENMO_EXPERIMENT_ANDROID.to_string(), 90)]
        );
    }

    #[test]
    fn test_desktop_always_enrolls_at_full_traffic() {
        let platform = EmulatedPlatform::desktop();
        let service = CountingService::new(false);
        // No eligibility, no enablement: the desktop branch ignores both.
        let config = create_test_config(false, false);

        let experiment = select_venmo_experiment(&platform, &config, &service).unwrap();
        assert_eq!(experiment.name(), VENMO_EXPERIMENT_DESKTOP);
        assert_eq!(
            service.created(),
            vec![(VENMO_EXPERIMENT_DESKTOP.to_string(), 100)]
        );
    }

    #[test]
    fn test_device_without_eligibility_skips_enrollment() {
        let platform = EmulatedPlatform::ios_safari();
        let service = CountingService::new(true);
        let config = create_test_config(false, false);

        assert!(select_venmo_experiment(&platform, &config, &service).is_none());
        assert!(service.created().is_empty());
    }

    #[test]
    fn test_device_already_enabled_and_native_skips_enrollment() {
        let platform = EmulatedPlatform::ios_safari();
        let service = CountingService::new(true);
        let config = create_test_config(true, true);

        assert!(select_venmo_experiment(&platform, &config, &service).is_none());
    }

    #[test]
    fn test_device_without_native_support_skips_enrollment() {
        let platform = EmulatedPlatform::ios_safari().with_popup_support(false);
        let service = CountingService::new(true);
        let config = create_test_config(true, false);

        assert!(select_venmo_experiment(&platform, &config, &service).is_none());
    }

    #[test]
    fn test_device_flags_require_native_support() {
        let config = create_test_config(true, true);
        let experiment: Arc<dyn Experiment> = Arc::new(StubExperiment {
            name: VENMO_EXPERIMENT_IOS.to_string(),
            enabled: true,
        });

        let native = EmulatedPlatform::ios_safari();
        let flags = venmo_experiment_flags(&native, &config, Some(&experiment));
        assert!(flags.enable_venmo);

        // Same inputs, but the browser cannot host the app-switch.
        let blocked = EmulatedPlatform::ios_safari().with_popup_support(false);
        let flags = venmo_experiment_flags(&blocked, &config, Some(&experiment));
        assert!(!flags.enable_venmo);
    }

    #[test]
    fn test_device_explicit_enablement_substitutes_for_bucket() {
        let config = create_test_config(true, true);
        let platform = EmulatedPlatform::android_chrome();

        let disabled_bucket: Arc<dyn Experiment> = Arc::new(StubExperiment {
            name: VENMO_EXPERIMENT_ANDROID.to_string(),
            enabled: false,
        });

        let flags = venmo_experiment_flags(&platform, &config, Some(&disabled_bucket));
        assert!(flags.enable_venmo);

        let flags = venmo_experiment_flags(&platform, &config, None);
        assert!(flags.enable_venmo);
    }

    #[test]
    fn test_desktop_flags_track_bucket_only() {
        // Explicit enablement is ignored off-device.
        let config = create_test_config(true, true);
        let platform = EmulatedPlatform::desktop();

        let flags = venmo_experiment_flags(&platform, &config, None);
        assert!(!flags.enable_venmo);

        let enabled_bucket: Arc<dyn Experiment> = Arc::new(StubExperiment {
            name: VENMO_EXPERIMENT_DESKTOP.to_string(),
            enabled: true,
        });
        let flags = venmo_experiment_flags(&platform, &config, Some(&enabled_bucket));
        assert!(flags.enable_venmo);
    }

    #[test]
    fn test_cell_computes_once() {
        let cell = ExperimentCell::new();
        let service = CountingService::new(true);
        let platform = EmulatedPlatform::desktop();
        let config = SdkConfig::default();

        let first =
            cell.get_or_init(|| select_venmo_experiment(&platform, &config, &service));
        let second =
            cell.get_or_init(|| select_venmo_experiment(&platform, &config, &service));

        assert_eq!(first.unwrap().name(), second.unwrap().name());
        assert_eq!(service.created().len(), 1);
    }

    #[test]
    fn test_cell_memoizes_absent_enrollment() {
        let cell = ExperimentCell::new();
        let mut calls = 0;

        assert!(cell.get_or_init(|| {
            calls += 1;
            None
        })
        .is_none());
        assert!(cell.is_computed());

        // A later call must not recompute, even though the value is "none".
        let second = cell.get_or_init(|| panic!("memo must not recompute"));
        assert!(second.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_cell_reset_rearms_computation() {
        let cell = ExperimentCell::new();
        let service = CountingService::new(true);
        let platform = EmulatedPlatform::desktop();
        let config = SdkConfig::default();

        cell.get_or_init(|| select_venmo_experiment(&platform, &config, &service));
        cell.reset();
        assert!(!cell.is_computed());

        cell.get_or_init(|| select_venmo_experiment(&platform, &config, &service));
        assert_eq!(service.created().len(), 2);
    }
}
