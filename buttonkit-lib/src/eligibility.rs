//! Funding Eligibility Gates
//!
//! Pure device/browser predicates consulted before rendering a button or
//! offering an app-switch checkout. Both predicates recompute from the
//! injected [`PlatformProbe`] on every call and never cache.

use crate::platform::PlatformProbe;
use crate::FundingSource;

/// Whether `funding` can be presented as a scan-to-pay QR code.
///
/// # Semantics
/// - Only the Venmo wallet renders as a QR code.
/// - QR presentation only applies outside a device context (the shopper
///   scans the code with their phone), so device contexts report `false`.
/// - Every other funding source reports `false` everywhere.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(platform), fields(funding = %funding)))]
pub fn supports_qr_pay(platform: &dyn PlatformProbe, funding: FundingSource) -> bool {
    funding == FundingSource::Venmo && !platform.is_device()
}

/// Whether this browser can host the native app-switch checkout.
///
/// # Semantics
/// The guards short-circuit in order:
/// - no browsing context at all (server-side render) reports `false`
/// - popups unsupported reports `false`
/// - a restricted in-app webview reports `false`, even on an otherwise
///   supported pairing
/// - iOS with Safari reports `true`; Android with Chrome reports `true`
/// - any other OS/browser pairing reports `false`
///
/// The verdict is recomputed on every call; probes may change between calls
/// (for example after a webview transition).
#[cfg_attr(feature = "tracing", tracing::instrument(skip(platform)))]
pub fn is_supported_native_browser(platform: &dyn PlatformProbe) -> bool {
    if !platform.has_window() {
        return false;
    }

    if !platform.supports_popups() {
        return false;
    }

    if platform.is_restricted_webview() {
        return false;
    }

    if platform.is_ios() && platform.is_safari() {
        return true;
    }

    if platform.is_android() && platform.is_chrome() {
        return true;
    }

    false
}
