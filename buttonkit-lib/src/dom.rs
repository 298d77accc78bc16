//! Page Document Seam
//!
//! The decision core never touches a real page. The one write this layer
//! performs (swapping a button's label for a spinner while checkout spins up)
//! goes through the [`ButtonDocument`] trait so hosts own the actual DOM.

use crate::FundingSource;

/// Write access to the rendered button surface.
///
/// Implementations resolve `funding` to the matching rendered button;
/// unknown or unrendered buttons are a no-op.
pub trait ButtonDocument: Send + Sync {
    /// Show or hide the spinner inside the button for `funding`.
    fn set_spinner_visible(&self, funding: FundingSource, visible: bool);

    /// Show or hide the label inside the button for `funding`.
    fn set_label_visible(&self, funding: FundingSource, visible: bool);
}

/// Swap the button's label for a spinner while checkout is starting.
pub fn show_button_loading(document: &dyn ButtonDocument, funding: FundingSource) {
    document.set_spinner_visible(funding, true);
    document.set_label_visible(funding, false);
}

/// Restore the button's label once checkout startup finishes.
pub fn hide_button_loading(document: &dyn ButtonDocument, funding: FundingSource) {
    document.set_spinner_visible(funding, false);
    document.set_label_visible(funding, true);
}
