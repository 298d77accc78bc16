//! Emulated platform probe implementation.
//!
//! This implementation answers every probe from plain fields and exists for
//! tests, demos, and server-side decision evaluation. Real hosts implement
//! [`PlatformProbe`] over their actual user-agent and window plumbing.

use super::probe::PlatformProbe;

/// A platform probe answered entirely from configured fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmulatedPlatform {
    window: bool,
    popups: bool,
    restricted_webview: bool,
    ios: bool,
    android: bool,
    safari: bool,
    chrome: bool,
    device: bool,
}

impl EmulatedPlatform {
    /// A desktop browser with a window and popup support.
    pub fn desktop() -> Self {
        Self {
            window: true,
            popups: true,
            restricted_webview: false,
            ios: false,
            android: false,
            safari: false,
            chrome: false,
            device: false,
        }
    }

    /// Safari on an iOS device.
    pub fn ios_safari() -> Self {
        Self {
            window: true,
            popups: true,
            restricted_webview: false,
            ios: true,
            android: false,
            safari: true,
            chrome: false,
            device: true,
        }
    }

    /// Chrome on an Android device.
    pub fn android_chrome() -> Self {
        Self {
            window: true,
            popups: true,
            restricted_webview: false,
            ios: false,
            android: true,
            safari: false,
            chrome: true,
            device: true,
        }
    }

    /// No browsing context at all (server-side render, tooling).
    pub fn headless() -> Self {
        Self {
            window: false,
            popups: false,
            restricted_webview: false,
            ios: false,
            android: false,
            safari: false,
            chrome: false,
            device: false,
        }
    }

    /// Override whether a window exists.
    pub fn with_window(mut self, window: bool) -> Self {
        self.window = window;
        self
    }

    /// Override popup support.
    pub fn with_popup_support(mut self, popups: bool) -> Self {
        self.popups = popups;
        self
    }

    /// Override the restricted in-app webview flag.
    pub fn with_restricted_webview(mut self, restricted: bool) -> Self {
        self.restricted_webview = restricted;
        self
    }

    /// Override the device-context flag.
    pub fn with_device(mut self, device: bool) -> Self {
        self.device = device;
        self
    }

    /// Override the browser identification flags.
    pub fn with_browser(mut self, safari: bool, chrome: bool) -> Self {
        self.safari = safari;
        self.chrome = chrome;
        self
    }

    /// Override the operating-system identification flags.
    pub fn with_os(mut self, ios: bool, android: bool) -> Self {
        self.ios = ios;
        self.android = android;
        self
    }
}

impl Default for EmulatedPlatform {
    fn default() -> Self {
        Self::desktop()
    }
}

impl PlatformProbe for EmulatedPlatform {
    fn has_window(&self) -> bool {
        self.window
    }

    fn supports_popups(&self) -> bool {
        self.popups
    }

    fn is_restricted_webview(&self) -> bool {
        self.restricted_webview
    }

    fn is_ios(&self) -> bool {
        self.ios
    }

    fn is_android(&self) -> bool {
        self.android
    }

    fn is_safari(&self) -> bool {
        self.safari
    }

    fn is_chrome(&self) -> bool {
        self.chrome
    }

    fn is_device(&self) -> bool {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_identify_their_environment() {
        let ios = EmulatedPlatform::ios_safari();
        assert!(ios.is_ios() && ios.is_safari() && ios.is_device());
        assert!(!ios.is_android() && !ios.is_chrome());

        let android = EmulatedPlatform::android_chrome();
        assert!(android.is_android() && android.is_chrome() && android.is_device());
        assert!(!android.is_ios() && !android.is_safari());

        let desktop = EmulatedPlatform::desktop();
        assert!(desktop.has_window() && !desktop.is_device());
    }

    #[test]
    fn test_headless_has_no_window() {
        let headless = EmulatedPlatform::headless();
        assert!(!headless.has_window());
        assert!(!headless.supports_popups());
    }

    #[test]
    fn test_overrides_compose() {
        let crossed = EmulatedPlatform::ios_safari().with_browser(false, true);
        assert!(crossed.is_ios() && crossed.is_chrome() && !crossed.is_safari());

        let blocked = EmulatedPlatform::android_chrome().with_popup_support(false);
        assert!(!blocked.supports_popups());
    }
}
