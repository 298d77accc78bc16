//! Native wallet session adapter.
//!
//! The adapter owns two things: a listener registry keyed by the closed
//! [`SessionEvent`] set, and the forwarding of completion calls into the
//! injected native session. Two of the completion paths normalize the native
//! API's asymmetric error shape; everything else passes through unchanged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::wire::{
    ApplePayEvent, NativeApplePayError, PaymentAuthorizationUpdate, PaymentMethodUpdate,
    PaymentRequest, SessionEvent, ShippingContactUpdate, ShippingMethodUpdate, UpdateError,
};
use crate::{ButtonError, Result};

/// Callback invoked when the native session fires an event.
pub type SessionListener = Box<dyn FnMut(ApplePayEvent) + Send>;

type ListenerRegistry = Arc<Mutex<HashMap<SessionEvent, SessionListener>>>;

/// Payload forwarded to the native layer on the two completion paths that can
/// carry validation errors.
///
/// When the caller's update holds a non-empty `errors` list, the converted
/// native errors are forwarded *instead of* the update; otherwise the update
/// goes through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion<U> {
    /// Forward the update unchanged.
    Update(U),
    /// Forward converted native errors in place of the update.
    Errors(Vec<NativeApplePayError>),
}

fn convert_update_errors(errors: Vec<UpdateError>) -> Vec<NativeApplePayError> {
    errors.into_iter().map(NativeApplePayError::from).collect()
}

fn shipping_contact_completion(update: ShippingContactUpdate) -> Completion<ShippingContactUpdate> {
    if update.errors.is_empty() {
        Completion::Update(update)
    } else {
        Completion::Errors(convert_update_errors(update.errors))
    }
}

fn payment_completion(
    update: PaymentAuthorizationUpdate,
) -> Completion<PaymentAuthorizationUpdate> {
    if update.errors.is_empty() {
        Completion::Update(update)
    } else {
        Completion::Errors(convert_update_errors(update.errors))
    }
}

/// The injected native wallet runtime.
///
/// Real hosts wrap the platform's wallet API; tests and demos inject mocks.
pub trait ApplePayRuntime: Send + Sync {
    /// Probe whether the native wallet-session capability exists here.
    ///
    /// A probe failure is treated exactly like an absent capability by
    /// [`apple_pay_session`].
    fn is_available(&self) -> Result<bool>;

    /// Construct one native session for `request`.
    ///
    /// The runtime must deliver the session's events through `dispatcher`.
    fn create_session(
        &self,
        version: u32,
        request: PaymentRequest,
        dispatcher: SessionEventDispatcher,
    ) -> Result<Box<dyn NativeSession>>;
}

/// One native wallet session attempt.
///
/// Implementations own the platform sheet; the adapter forwards every call
/// and adds no state machine of its own.
pub trait NativeSession: Send {
    /// Present the payment sheet.
    fn begin(&mut self) -> Result<()>;

    /// Complete merchant validation with the opaque merchant session blob.
    fn complete_merchant_validation(&mut self, merchant_session: Value) -> Result<()>;

    /// Complete a payment-method selection.
    fn complete_payment_method_selection(&mut self, update: PaymentMethodUpdate) -> Result<()>;

    /// Complete a shipping-method selection.
    fn complete_shipping_method_selection(&mut self, update: ShippingMethodUpdate) -> Result<()>;

    /// Complete a shipping-contact selection.
    fn complete_shipping_contact_selection(
        &mut self,
        completion: Completion<ShippingContactUpdate>,
    ) -> Result<()>;

    /// Complete an authorized payment.
    fn complete_payment(&mut self, completion: Completion<PaymentAuthorizationUpdate>)
        -> Result<()>;
}

/// Delivers native events into a session's listener registry.
///
/// The runtime receives a dispatcher at session construction and calls
/// [`dispatch`](SessionEventDispatcher::dispatch) for every native callback.
#[derive(Clone)]
pub struct SessionEventDispatcher {
    listeners: ListenerRegistry,
}

impl SessionEventDispatcher {
    fn new(listeners: ListenerRegistry) -> Self {
        Self { listeners }
    }

    /// Deliver `event` to the listener registered for its kind.
    ///
    /// # Errors
    /// Returns [`ButtonError::MissingListener`] when no listener is
    /// registered for the event's kind; the event is dropped, not queued.
    ///
    /// The listener runs under the registry lock, so it must not register or
    /// dispatch further listeners from inside the callback.
    pub fn dispatch(&self, event: ApplePayEvent) -> Result<()> {
        let kind = event.kind();
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        match listeners.get_mut(&kind) {
            Some(listener) => {
                listener(event);
                Ok(())
            }
            None => Err(ButtonError::MissingListener(kind)),
        }
    }

    /// Whether a listener is registered for `event`.
    pub fn has_listener(&self, event: SessionEvent) -> bool {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&event)
    }
}

/// Probe the native wallet capability and hand back a session factory.
///
/// # Semantics
/// - `None` when the runtime reports the capability absent.
/// - `None` when the probe itself fails; probe exceptions never escape.
/// - `Some` factory otherwise. Construction failures *after* a successful
///   probe are real errors and propagate from [`SessionFactory::create`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(runtime)))]
pub fn apple_pay_session(runtime: Arc<dyn ApplePayRuntime>) -> Option<SessionFactory> {
    match runtime.is_available() {
        Ok(true) => Some(SessionFactory { runtime }),
        Ok(false) | Err(_) => None,
    }
}

/// Factory for native wallet sessions.
pub struct SessionFactory {
    runtime: Arc<dyn ApplePayRuntime>,
}

impl SessionFactory {
    /// Construct a session for `request` with an empty listener registry.
    pub fn create(&self, version: u32, request: PaymentRequest) -> Result<SessionHandle> {
        let listeners: ListenerRegistry = Arc::new(Mutex::new(HashMap::new()));
        let dispatcher = SessionEventDispatcher::new(listeners.clone());
        let native = self.runtime.create_session(version, request, dispatcher)?;

        Ok(SessionHandle {
            native: Mutex::new(native),
            listeners,
        })
    }
}

/// Handle over one native wallet session.
///
/// Listener registration is keyed by the closed [`SessionEvent`] enum, so an
/// unknown event name cannot be registered at all. Completion calls forward
/// to the native session; only the shipping-contact and payment paths apply
/// the error conversion.
pub struct SessionHandle {
    native: Mutex<Box<dyn NativeSession>>,
    listeners: ListenerRegistry,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").finish_non_exhaustive()
    }
}

impl SessionHandle {
    /// Register `listener` for `event`, replacing any existing listener.
    pub fn add_event_listener(
        &self,
        event: SessionEvent,
        listener: impl FnMut(ApplePayEvent) + Send + 'static,
    ) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(event, Box::new(listener));
    }

    /// Present the payment sheet.
    pub fn begin(&self) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .begin()
    }

    /// Forward merchant validation unchanged.
    pub fn complete_merchant_validation(&self, merchant_session: Value) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .complete_merchant_validation(merchant_session)
    }

    /// Forward a payment-method selection unchanged.
    pub fn complete_payment_method_selection(&self, update: PaymentMethodUpdate) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .complete_payment_method_selection(update)
    }

    /// Forward a shipping-method selection unchanged.
    pub fn complete_shipping_method_selection(&self, update: ShippingMethodUpdate) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .complete_shipping_method_selection(update)
    }

    /// Forward a shipping-contact selection, converting a non-empty `errors`
    /// list into native errors in place of the update.
    pub fn complete_shipping_contact_selection(&self, update: ShippingContactUpdate) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .complete_shipping_contact_selection(shipping_contact_completion(update))
    }

    /// Forward an authorization result, converting a non-empty `errors` list
    /// into native errors in place of the update.
    pub fn complete_payment(&self, update: PaymentAuthorizationUpdate) -> Result<()> {
        self.native
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .complete_payment(payment_completion(update))
    }
}
