//! Mock collaborators with scripted behavior and call recording.

use std::sync::{Arc, Mutex, RwLock};

use serde_json::Value;

use crate::applepay::{
    ApplePayRuntime, Completion, NativeSession, PaymentAuthorizationUpdate, PaymentMethodUpdate,
    PaymentRequest, SessionEventDispatcher, ShippingContactUpdate, ShippingMethodUpdate,
};
use crate::experiments::{Experiment, ExperimentService};
use crate::platform::{EmulatedPlatform, PlatformProbe};
use crate::render::{FundingRequest, FundingResolver};
use crate::{ButtonError, FundingSource, Result};

/// An experiment handle with a fixed resolution.
struct MockExperiment {
    name: String,
    enabled: bool,
}

impl Experiment for MockExperiment {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Experiment service whose experiments all resolve to one bucket.
///
/// Records every `(name, traffic_percent)` pair passed to
/// [`create_experiment`](ExperimentService::create_experiment) so tests can
/// assert how often bucketing ran.
pub struct MockExperimentService {
    enabled: bool,
    created: Mutex<Vec<(String, u8)>>,
}

impl MockExperimentService {
    /// Every created experiment reports the caller enrolled.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Every created experiment reports the caller outside the treatment.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            created: Mutex::new(Vec::new()),
        }
    }

    /// Every creation recorded so far, in order.
    pub fn created(&self) -> Vec<(String, u8)> {
        self.created.lock().unwrap().clone()
    }
}

impl ExperimentService for MockExperimentService {
    fn create_experiment(&self, name: &str, traffic_percent: u8) -> Arc<dyn Experiment> {
        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), traffic_percent));
        Arc::new(MockExperiment {
            name: name.to_string(),
            enabled: self.enabled,
        })
    }
}

/// Funding resolver that returns a canned list and records every request.
pub struct RecordingResolver {
    response: Vec<FundingSource>,
    requests: Mutex<Vec<FundingRequest>>,
}

impl RecordingResolver {
    /// Resolver that answers every request with `response`.
    pub fn returning(response: Vec<FundingSource>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The most recent request, if any was made.
    pub fn last_request(&self) -> Option<FundingRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<FundingRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl FundingResolver for RecordingResolver {
    fn determine_eligible_funding(&self, request: &FundingRequest) -> Vec<FundingSource> {
        self.requests.lock().unwrap().push(request.clone());
        self.response.clone()
    }
}

/// Platform probe whose emulated environment can be swapped mid-test.
///
/// Useful for proving that a decision was memoized: swap the environment
/// under the context and assert the answer held.
pub struct SwitchablePlatform {
    inner: RwLock<EmulatedPlatform>,
}

impl SwitchablePlatform {
    /// Start probing against `initial`.
    pub fn new(initial: EmulatedPlatform) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Replace the emulated environment for all subsequent probes.
    pub fn switch_to(&self, platform: EmulatedPlatform) {
        *self.inner.write().unwrap() = platform;
    }

    fn current(&self) -> EmulatedPlatform {
        *self.inner.read().unwrap()
    }
}

impl PlatformProbe for SwitchablePlatform {
    fn has_window(&self) -> bool {
        self.current().has_window()
    }

    fn supports_popups(&self) -> bool {
        self.current().supports_popups()
    }

    fn is_restricted_webview(&self) -> bool {
        self.current().is_restricted_webview()
    }

    fn is_ios(&self) -> bool {
        self.current().is_ios()
    }

    fn is_android(&self) -> bool {
        self.current().is_android()
    }

    fn is_safari(&self) -> bool {
        self.current().is_safari()
    }

    fn is_chrome(&self) -> bool {
        self.current().is_chrome()
    }

    fn is_device(&self) -> bool {
        self.current().is_device()
    }
}

/// One call forwarded into a [`MockApplePayRuntime`] session.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeCall {
    /// `begin` was called.
    Begin,
    /// Merchant validation completed with the given merchant session blob.
    MerchantValidation(Value),
    /// Payment-method selection completed.
    PaymentMethodSelection(PaymentMethodUpdate),
    /// Shipping-method selection completed.
    ShippingMethodSelection(ShippingMethodUpdate),
    /// Shipping-contact selection completed, after error conversion.
    ShippingContactSelection(Completion<ShippingContactUpdate>),
    /// Payment authorization completed, after error conversion.
    Payment(Completion<PaymentAuthorizationUpdate>),
}

enum RuntimeScript {
    Available,
    Unavailable,
    ProbeFailure,
    FailingCreate,
    FailingNative,
}

/// Scripted native wallet runtime.
///
/// Created sessions record every forwarded call into a shared log, and the
/// dispatcher handed to the most recent session is exposed so tests can fire
/// native events back at the adapter.
pub struct MockApplePayRuntime {
    script: RuntimeScript,
    calls: Arc<Mutex<Vec<NativeCall>>>,
    dispatcher: Mutex<Option<SessionEventDispatcher>>,
}

impl MockApplePayRuntime {
    /// Capability present; sessions record and succeed.
    pub fn available() -> Self {
        Self::scripted(RuntimeScript::Available)
    }

    /// Capability absent.
    pub fn unavailable() -> Self {
        Self::scripted(RuntimeScript::Unavailable)
    }

    /// The availability probe itself fails.
    pub fn probe_failure() -> Self {
        Self::scripted(RuntimeScript::ProbeFailure)
    }

    /// Capability present, but session construction fails.
    pub fn failing_create() -> Self {
        Self::scripted(RuntimeScript::FailingCreate)
    }

    /// Sessions construct, but every forwarded call fails after recording.
    pub fn failing_native() -> Self {
        Self::scripted(RuntimeScript::FailingNative)
    }

    fn scripted(script: RuntimeScript) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
            dispatcher: Mutex::new(None),
        }
    }

    /// Every call the created sessions forwarded, in order.
    pub fn calls(&self) -> Vec<NativeCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The dispatcher handed to the most recent session.
    pub fn last_dispatcher(&self) -> Option<SessionEventDispatcher> {
        self.dispatcher.lock().unwrap().clone()
    }
}

impl ApplePayRuntime for MockApplePayRuntime {
    fn is_available(&self) -> Result<bool> {
        match self.script {
            RuntimeScript::Unavailable => Ok(false),
            RuntimeScript::ProbeFailure => {
                Err(ButtonError::session_unavailable("no wallet bridge"))
            }
            _ => Ok(true),
        }
    }

    fn create_session(
        &self,
        _version: u32,
        _request: PaymentRequest,
        dispatcher: SessionEventDispatcher,
    ) -> Result<Box<dyn NativeSession>> {
        if matches!(self.script, RuntimeScript::FailingCreate) {
            return Err(ButtonError::session("native session rejected"));
        }
        *self.dispatcher.lock().unwrap() = Some(dispatcher);
        Ok(Box::new(RecordingNativeSession {
            calls: self.calls.clone(),
            fail: matches!(self.script, RuntimeScript::FailingNative),
        }))
    }
}

struct RecordingNativeSession {
    calls: Arc<Mutex<Vec<NativeCall>>>,
    fail: bool,
}

impl RecordingNativeSession {
    fn record(&self, call: NativeCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ButtonError::session("native call failed"))
        } else {
            Ok(())
        }
    }
}

impl NativeSession for RecordingNativeSession {
    fn begin(&mut self) -> Result<()> {
        self.record(NativeCall::Begin)
    }

    fn complete_merchant_validation(&mut self, merchant_session: Value) -> Result<()> {
        self.record(NativeCall::MerchantValidation(merchant_session))
    }

    fn complete_payment_method_selection(&mut self, update: PaymentMethodUpdate) -> Result<()> {
        self.record(NativeCall::PaymentMethodSelection(update))
    }

    fn complete_shipping_method_selection(&mut self, update: ShippingMethodUpdate) -> Result<()> {
        self.record(NativeCall::ShippingMethodSelection(update))
    }

    fn complete_shipping_contact_selection(
        &mut self,
        completion: Completion<ShippingContactUpdate>,
    ) -> Result<()> {
        self.record(NativeCall::ShippingContactSelection(completion))
    }

    fn complete_payment(
        &mut self,
        completion: Completion<PaymentAuthorizationUpdate>,
    ) -> Result<()> {
        self.record(NativeCall::Payment(completion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_service_records_creations() {
        let service = MockExperimentService::enabled();
        let experiment = service.create_experiment("enable_venmo_ios", 90);

        assert!(experiment.is_enabled());
        assert_eq!(
            service.created(),
            vec![("enable_venmo_ios".to_string(), 90)]
        );
    }

    #[test]
    fn test_switchable_platform_swaps_probes() {
        let platform = SwitchablePlatform::new(EmulatedPlatform::ios_safari());
        assert!(platform.is_ios());

        platform.switch_to(EmulatedPlatform::desktop());
        assert!(!platform.is_ios());
        assert!(!platform.is_device());
    }

    #[test]
    fn test_failing_native_records_before_failing() {
        let runtime = Arc::new(MockApplePayRuntime::failing_native());
        let factory = crate::applepay::apple_pay_session(runtime.clone()).unwrap();
        let session = factory.create(3, PaymentRequest::default()).unwrap();

        assert!(session.begin().is_err());
        assert_eq!(runtime.calls(), vec![NativeCall::Begin]);
    }
}
