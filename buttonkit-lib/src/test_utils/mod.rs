//! Test utilities for buttonkit.
//!
//! This module provides testing infrastructure including:
//! - Mock collaborators with scripted behavior and call recording
//! - A platform probe whose environment can be swapped mid-test
//! - Fixtures for common SDK configurations and wallet requests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use buttonkit_lib::config::SdkConfig;
//! use buttonkit_lib::platform::EmulatedPlatform;
//! use buttonkit_lib::test_utils::{MockExperimentService, RecordingResolver};
//! use buttonkit_lib::ButtonContext;
//! use std::sync::Arc;
//!
//! let resolver = Arc::new(RecordingResolver::returning(Vec::new()));
//! let ctx = ButtonContext::new(
//!     Arc::new(EmulatedPlatform::ios_safari()),
//!     Arc::new(MockExperimentService::enabled()),
//!     resolver.clone(),
//!     SdkConfig::default(),
//! );
//!
//! ctx.rendered_buttons(Default::default());
//! assert!(resolver.last_request().is_some());
//! ```

mod fixtures;
mod mocks;

pub use fixtures::{
    desktop_checkout_config, test_payment_request, venmo_checkout_config, TestFixtures,
};

pub use mocks::{
    MockApplePayRuntime, MockExperimentService, NativeCall, RecordingResolver, SwitchablePlatform,
};
