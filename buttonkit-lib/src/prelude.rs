//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits for
//! quick setup. Import everything with:
//!
//! ```rust,ignore
//! use buttonkit_lib::prelude::*;
//! ```
//!
//! ## What's Included
//!
//! - Core types: `FundingSource`, `ButtonContext`, `ButtonProps`
//! - Error types: `ButtonError`, `Result`
//! - Checkout flows: `ButtonFlow`, `determine_flow`
//! - Configuration: `SdkConfig`, `FundingEligibility`, `SdkPlatform`
//! - Experiments: `Experiment`, `ExperimentService`, `ExperimentFlags`
//! - Platform probing: `PlatformProbe`, `EmulatedPlatform`
//! - Apple Pay sessions: `apple_pay_session`, `SessionHandle`

// Core types
pub use crate::{ButtonContext, FundingSource};

// Error handling
pub use crate::errors::ButtonError;
pub use crate::Result;

// Checkout flows
pub use crate::flow::{determine_flow, ButtonFlow};

// Configuration
pub use crate::config::{FundingEligibility, FundingSourceEligibility, SdkConfig, SdkPlatform};

// Eligibility predicates
pub use crate::eligibility::{is_supported_native_browser, supports_qr_pay};

// Experiments
pub use crate::experiments::{
    select_venmo_experiment, Experiment, ExperimentCell, ExperimentFlags, ExperimentService,
};

// Platform probing
pub use crate::platform::{EmulatedPlatform, PlatformProbe};

// Render pipeline
pub use crate::render::{ButtonLayout, ButtonProps, ButtonStyle, FundingRequest, FundingResolver};

// Apple Pay sessions
pub use crate::applepay::{
    apple_pay_session, ApplePayEvent, ApplePayRuntime, PaymentRequest, SessionEvent, SessionHandle,
};

// Page document seam
pub use crate::dom::{hide_button_loading, show_button_loading, ButtonDocument};
