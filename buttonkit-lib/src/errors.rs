//! Error types for buttonkit operations.
//!
//! The decision predicates never fail: malformed or unknown inputs degrade to
//! `false`/no-effect by design. Errors exist only at the edges (parsing wire
//! identifiers, serializing wire payloads) and inside the wallet-session
//! adapter, where caller misuse and native failures must be distinguishable.

use crate::applepay::SessionEvent;

#[derive(thiserror::Error, Debug)]
pub enum ButtonError {
    /// A string did not name a known funding source.
    #[error("unknown funding source: {0}")]
    UnknownFundingSource(String),
    /// A string did not name a known checkout flow.
    #[error("unknown checkout flow: {0}")]
    UnknownFlow(String),
    /// A wire payload failed to serialize or deserialize.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// The native wallet-session capability is absent or failed to probe.
    ///
    /// Consumers of [`applepay::apple_pay_session`](crate::applepay::apple_pay_session)
    /// never see this variant; the probe absorbs it into `None`.
    #[error("wallet session unavailable: {0}")]
    SessionUnavailable(String),
    /// The native session reported a failure after construction.
    #[error("wallet session error: {0}")]
    Session(String),
    /// An event fired with no listener registered for it.
    #[error("no listener registered for '{0}' event")]
    MissingListener(SessionEvent),
}

impl ButtonError {
    /// Create a session error from any displayable native failure.
    pub fn session(msg: impl Into<String>) -> Self {
        ButtonError::Session(msg.into())
    }

    /// Create an unavailability error for a failed capability probe.
    pub fn session_unavailable(msg: impl Into<String>) -> Self {
        ButtonError::SessionUnavailable(msg.into())
    }
}

impl From<serde_json::Error> for ButtonError {
    fn from(e: serde_json::Error) -> Self {
        ButtonError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_event() {
        let err = ButtonError::MissingListener(SessionEvent::Cancel);
        assert_eq!(err.to_string(), "no listener registered for 'cancel' event");
    }

    #[test]
    fn test_serde_errors_convert() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: ButtonError = bad.unwrap_err().into();
        assert!(matches!(err, ButtonError::Serialization(_)));
    }
}
