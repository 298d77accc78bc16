//! Core trait for runtime environment probes.

/// Boolean probes describing the environment a button renders into.
///
/// Every query is answered fresh on each call; implementations must not
/// assume callers cache results. All probes are infallible by contract: an
/// implementation that cannot determine an answer reports the conservative
/// `false`.
pub trait PlatformProbe: Send + Sync {
    /// Whether a browsing context (window) exists at all.
    ///
    /// Server-side and headless hosts report `false`.
    fn has_window(&self) -> bool;

    /// Whether the environment can open popup windows.
    fn supports_popups(&self) -> bool;

    /// Whether the page is hosted inside a restricted in-app webview
    /// (an embedded "view controller" browser rather than the full browser).
    fn is_restricted_webview(&self) -> bool;

    /// Whether the operating system is iOS.
    fn is_ios(&self) -> bool;

    /// Whether the operating system is Android.
    fn is_android(&self) -> bool;

    /// Whether the browser is Safari.
    fn is_safari(&self) -> bool;

    /// Whether the browser is Chrome.
    fn is_chrome(&self) -> bool;

    /// Whether this is a mobile or tablet device context.
    ///
    /// `false` means a desktop context.
    fn is_device(&self) -> bool;
}
