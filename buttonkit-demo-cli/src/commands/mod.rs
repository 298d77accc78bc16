//! CLI command implementations

pub mod apple_pay;
pub mod buttons;
pub mod experiment;
pub mod flow;

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use buttonkit_lib::applepay::{
    ApplePayRuntime, Completion, NativeSession, PaymentAuthorizationUpdate, PaymentMethodUpdate,
    PaymentRequest, SessionEventDispatcher, ShippingContactUpdate, ShippingMethodUpdate,
};
use buttonkit_lib::experiments::{Experiment, ExperimentService};
use buttonkit_lib::platform::EmulatedPlatform;
use buttonkit_lib::render::{FundingRequest, FundingResolver};
use buttonkit_lib::FundingSource;
use serde_json::Value;

/// Resolve a platform preset name to an emulated probe.
pub fn platform_preset(name: &str) -> Result<EmulatedPlatform> {
    match name {
        "desktop" => Ok(EmulatedPlatform::desktop()),
        "ios-safari" => Ok(EmulatedPlatform::ios_safari()),
        "android-chrome" => Ok(EmulatedPlatform::android_chrome()),
        "headless" => Ok(EmulatedPlatform::headless()),
        other => Err(anyhow!(
            "unknown platform preset '{other}' (expected desktop, ios-safari, android-chrome or headless)"
        )),
    }
}

/// Parse funding source names given on the command line.
pub fn parse_funding(names: &[String]) -> Result<Vec<FundingSource>> {
    names
        .iter()
        .map(|name| -> Result<FundingSource> { Ok(name.parse()?) })
        .collect()
}

/// djb2 hash used for deterministic demo bucketing.
fn simple_hash(data: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in data.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

/// Experiment service that buckets a session id deterministically.
///
/// The same `--session` value always lands in the same bucket, so demo runs
/// are reproducible; vary it to see both sides of an experiment.
pub struct DemoExperimentService {
    session: String,
    draws: Mutex<Vec<String>>,
}

impl DemoExperimentService {
    pub fn new(session: &str) -> Self {
        Self {
            session: session.to_string(),
            draws: Mutex::new(Vec::new()),
        }
    }

    /// How many experiments this service has been asked to create.
    pub fn draws(&self) -> usize {
        self.draws.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

struct DemoExperiment {
    name: String,
    enabled: bool,
}

impl Experiment for DemoExperiment {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl ExperimentService for DemoExperimentService {
    fn create_experiment(&self, name: &str, traffic_percent: u8) -> Arc<dyn Experiment> {
        self.draws
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name.to_string());
        let bucket = simple_hash(&format!("{}:{}", self.session, name)) % 100;
        Arc::new(DemoExperiment {
            name: name.to_string(),
            enabled: bucket < traffic_percent as u64,
        })
    }
}

/// Funding resolver standing in for the SDK's server-side ranking.
///
/// Keeps the eligibility table's canonical order, honors the Venmo and
/// Apple Pay flags on the request, and pins the merchant's preferred source
/// to the front.
pub struct DemoFundingResolver;

impl FundingResolver for DemoFundingResolver {
    fn determine_eligible_funding(&self, request: &FundingRequest) -> Vec<FundingSource> {
        let mut funding: Vec<FundingSource> = request
            .funding_eligibility
            .eligible_sources()
            .into_iter()
            .filter(|&source| match source {
                FundingSource::Venmo => request.experiment.enable_venmo,
                FundingSource::Applepay => request.apple_pay_support,
                _ => true,
            })
            .collect();
        if let Some(preferred) = request.funding_source {
            funding.retain(|&source| source != preferred);
            funding.insert(0, preferred);
        }
        funding
    }
}

/// Always-available wallet runtime that records every native call.
pub struct ScriptedApplePayRuntime {
    calls: Arc<Mutex<Vec<String>>>,
    dispatcher: Mutex<Option<SessionEventDispatcher>>,
}

impl ScriptedApplePayRuntime {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            dispatcher: Mutex::new(None),
        }
    }

    /// The dispatcher wired into the most recent session.
    pub fn dispatcher(&self) -> Option<SessionEventDispatcher> {
        self.dispatcher
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Native calls recorded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

struct ScriptedSession {
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSession {
    fn record(&self, call: impl Into<String>) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.into());
    }
}

impl NativeSession for ScriptedSession {
    fn begin(&mut self) -> buttonkit_lib::Result<()> {
        self.record("begin");
        Ok(())
    }

    fn complete_merchant_validation(
        &mut self,
        _merchant_session: Value,
    ) -> buttonkit_lib::Result<()> {
        self.record("completeMerchantValidation");
        Ok(())
    }

    fn complete_payment_method_selection(
        &mut self,
        _update: PaymentMethodUpdate,
    ) -> buttonkit_lib::Result<()> {
        self.record("completePaymentMethodSelection");
        Ok(())
    }

    fn complete_shipping_method_selection(
        &mut self,
        _update: ShippingMethodUpdate,
    ) -> buttonkit_lib::Result<()> {
        self.record("completeShippingMethodSelection");
        Ok(())
    }

    fn complete_shipping_contact_selection(
        &mut self,
        completion: Completion<ShippingContactUpdate>,
    ) -> buttonkit_lib::Result<()> {
        match completion {
            Completion::Update(_) => self.record("completeShippingContactSelection:update"),
            Completion::Errors(errors) => self.record(format!(
                "completeShippingContactSelection:errors[{}]",
                errors.len()
            )),
        }
        Ok(())
    }

    fn complete_payment(
        &mut self,
        completion: Completion<PaymentAuthorizationUpdate>,
    ) -> buttonkit_lib::Result<()> {
        match completion {
            Completion::Update(_) => self.record("completePayment:update"),
            Completion::Errors(errors) => {
                self.record(format!("completePayment:errors[{}]", errors.len()))
            }
        }
        Ok(())
    }
}

impl ApplePayRuntime for ScriptedApplePayRuntime {
    fn is_available(&self) -> buttonkit_lib::Result<bool> {
        Ok(true)
    }

    fn create_session(
        &self,
        _version: u32,
        _request: PaymentRequest,
        dispatcher: SessionEventDispatcher,
    ) -> buttonkit_lib::Result<Box<dyn NativeSession>> {
        *self.dispatcher.lock().unwrap_or_else(|e| e.into_inner()) = Some(dispatcher);
        Ok(Box::new(ScriptedSession {
            calls: Arc::clone(&self.calls),
        }))
    }
}
