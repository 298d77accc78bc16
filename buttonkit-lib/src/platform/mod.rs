//! Platform and browser environment probes.
//!
//! This module provides a host-agnostic trait describing the runtime
//! environment a button renders into, with implementations for:
//! - Emulated environments (for tests, demos, and server-side decisions)
//! - Real hosts, which implement [`PlatformProbe`] over their own
//!   user-agent and window plumbing
//!
//! ## Usage
//!
//! ```rust
//! use buttonkit_lib::platform::{EmulatedPlatform, PlatformProbe};
//!
//! let platform = EmulatedPlatform::ios_safari();
//! assert!(platform.is_device());
//! assert!(platform.supports_popups());
//! ```

mod emulated;
mod probe;

pub use emulated::EmulatedPlatform;
pub use probe::PlatformProbe;
