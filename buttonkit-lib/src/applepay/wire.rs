//! Apple Pay wire types.
//!
//! These shapes mirror the native Apple Pay JS API; serialized field and
//! event names are the native camelCase/lowercase identifiers. Fields this
//! crate does not interpret ride through the `extra` maps untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The closed set of events a native wallet session can fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionEvent {
    /// The session needs merchant validation against Apple's servers.
    ValidateMerchant,
    /// The shopper picked a payment method in the sheet.
    PaymentMethodSelected,
    /// The shopper picked a shipping method in the sheet.
    ShippingMethodSelected,
    /// The shopper picked or edited a shipping contact in the sheet.
    ShippingContactSelected,
    /// The shopper authorized the payment.
    PaymentAuthorized,
    /// The shopper dismissed the sheet.
    Cancel,
}

impl SessionEvent {
    /// Every session event, in sheet-lifecycle order.
    pub const ALL: [SessionEvent; 6] = [
        SessionEvent::ValidateMerchant,
        SessionEvent::PaymentMethodSelected,
        SessionEvent::ShippingMethodSelected,
        SessionEvent::ShippingContactSelected,
        SessionEvent::PaymentAuthorized,
        SessionEvent::Cancel,
    ];

    /// Get the native event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::ValidateMerchant => "validatemerchant",
            SessionEvent::PaymentMethodSelected => "paymentmethodselected",
            SessionEvent::ShippingMethodSelected => "shippingmethodselected",
            SessionEvent::ShippingContactSelected => "shippingcontactselected",
            SessionEvent::PaymentAuthorized => "paymentauthorized",
            SessionEvent::Cancel => "cancel",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A native session event together with its payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ApplePayEvent {
    /// Merchant validation is required; carries the validation URL to call.
    ValidateMerchant {
        #[serde(rename = "validationURL")]
        validation_url: String,
    },
    /// A payment method was selected.
    #[serde(rename_all = "camelCase")]
    PaymentMethodSelected { payment_method: Value },
    /// A shipping method was selected.
    #[serde(rename_all = "camelCase")]
    ShippingMethodSelected { shipping_method: Value },
    /// A shipping contact was selected or edited.
    #[serde(rename_all = "camelCase")]
    ShippingContactSelected { shipping_contact: Value },
    /// The payment was authorized; carries the payment token payload.
    PaymentAuthorized { payment: Value },
    /// The sheet was dismissed.
    Cancel,
}

impl ApplePayEvent {
    /// Which event kind this payload belongs to.
    pub fn kind(&self) -> SessionEvent {
        match self {
            ApplePayEvent::ValidateMerchant { .. } => SessionEvent::ValidateMerchant,
            ApplePayEvent::PaymentMethodSelected { .. } => SessionEvent::PaymentMethodSelected,
            ApplePayEvent::ShippingMethodSelected { .. } => SessionEvent::ShippingMethodSelected,
            ApplePayEvent::ShippingContactSelected { .. } => SessionEvent::ShippingContactSelected,
            ApplePayEvent::PaymentAuthorized { .. } => SessionEvent::PaymentAuthorized,
            ApplePayEvent::Cancel => SessionEvent::Cancel,
        }
    }
}

/// A labeled amount line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display label (merchant or item name).
    pub label: String,
    /// Decimal amount string, for example `"12.99"`.
    pub amount: String,
}

impl LineItem {
    /// Create a line item.
    pub fn new(label: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            amount: amount.into(),
        }
    }
}

/// The payment request handed to the native session at construction.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Two-letter merchant country code.
    pub country_code: String,
    /// Three-letter transaction currency code.
    pub currency_code: String,
    /// Card networks the merchant supports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supported_networks: Vec<String>,
    /// Capabilities the merchant supports (for example `"supports3DS"`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchant_capabilities: Vec<String>,
    /// The grand-total line shown on the sheet.
    pub total: LineItem,
    /// Itemized lines shown above the total.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,
    /// Native fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An error entry carried in a completion update's `errors` list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateError {
    /// Machine-readable error code.
    pub code: String,
    /// Contact field the error applies to, when contact-related.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_field: Option<String>,
    /// Shopper-facing message.
    pub message: String,
}

impl UpdateError {
    /// Create an error entry.
    pub fn new(
        code: impl Into<String>,
        contact_field: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            contact_field,
            message: message.into(),
        }
    }
}

/// The error object instantiated for the native layer.
///
/// Carries the same triple as [`UpdateError`]; the distinct type marks that
/// the value crossed into the native error shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeApplePayError {
    /// Machine-readable error code.
    pub code: String,
    /// Contact field the error applies to, when contact-related.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_field: Option<String>,
    /// Shopper-facing message.
    pub message: String,
}

impl NativeApplePayError {
    /// Instantiate a native error.
    pub fn new(
        code: impl Into<String>,
        contact_field: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            contact_field,
            message: message.into(),
        }
    }
}

impl From<UpdateError> for NativeApplePayError {
    fn from(error: UpdateError) -> Self {
        NativeApplePayError::new(error.code, error.contact_field, error.message)
    }
}

/// Update forwarded after a payment-method selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodUpdate {
    /// Replacement grand-total line, if the selection changed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_total: Option<LineItem>,
    /// Native fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Update forwarded after a shipping-method selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethodUpdate {
    /// Replacement grand-total line, if the selection changed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_total: Option<LineItem>,
    /// Native fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Update forwarded after a shipping-contact selection.
///
/// A non-empty `errors` list triggers the native-error conversion; see
/// [`SessionHandle::complete_shipping_contact_selection`](crate::applepay::SessionHandle::complete_shipping_contact_selection).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingContactUpdate {
    /// Validation problems with the selected contact.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<UpdateError>,
    /// Replacement grand-total line, if the contact changed it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_total: Option<LineItem>,
    /// Replacement shipping-method list, if the contact changed it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_shipping_methods: Vec<Value>,
    /// Native fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Authorization result forwarded after the shopper authorizes payment.
///
/// A non-empty `errors` list triggers the native-error conversion; see
/// [`SessionHandle::complete_payment`](crate::applepay::SessionHandle::complete_payment).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAuthorizationUpdate {
    /// Native status code, when the host supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    /// Validation problems with the authorized payment.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<UpdateError>,
    /// Native fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
