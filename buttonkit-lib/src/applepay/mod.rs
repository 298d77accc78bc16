//! Apple Pay wallet-session adapter.
//!
//! This module wraps the host's native wallet API behind injected traits:
//! - Capability probing that can never throw into callers
//! - A listener registry keyed by the closed six-event set
//! - Completion forwarding, with native-error conversion on the two paths
//!   whose updates can carry validation errors
//!
//! ## Usage
//!
//! ```rust,ignore
//! use buttonkit_lib::applepay::{apple_pay_session, PaymentRequest, SessionEvent};
//!
//! let Some(factory) = apple_pay_session(runtime) else {
//!     return; // capability absent; render no Apple Pay button
//! };
//!
//! let session = factory.create(3, request)?;
//! session.add_event_listener(SessionEvent::ValidateMerchant, |event| {
//!     // fetch a merchant session, then complete_merchant_validation(...)
//! });
//! session.begin()?;
//! ```
//!
//! The adapter owns no payment state; the native session is the source of
//! truth and every completion call forwards to it directly.

mod session;
mod wire;

pub use session::{
    apple_pay_session, ApplePayRuntime, Completion, NativeSession, SessionEventDispatcher,
    SessionFactory, SessionHandle, SessionListener,
};
pub use wire::{
    ApplePayEvent, LineItem, NativeApplePayError, PaymentAuthorizationUpdate, PaymentMethodUpdate,
    PaymentRequest, SessionEvent, ShippingContactUpdate, ShippingMethodUpdate, UpdateError,
};
