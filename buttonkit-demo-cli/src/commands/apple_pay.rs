//! Scripted Apple Pay session walk.
//!
//! Drives a full sheet lifecycle against an in-process wallet runtime and
//! prints the native calls the adapter forwarded.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use buttonkit_lib::applepay::{
    apple_pay_session, ApplePayEvent, LineItem, PaymentAuthorizationUpdate, PaymentRequest,
    SessionEvent, ShippingContactUpdate, ShippingMethodUpdate, UpdateError,
};
use colored::Colorize;
use serde_json::json;

use crate::ui;

const SHEET_VERSION: u32 = 3;

#[tracing::instrument]
pub fn run(
    country: &str,
    currency: &str,
    amount: &str,
    label: &str,
    reject_contact: bool,
    _verbose: bool,
) -> Result<()> {
    let runtime = Arc::new(super::ScriptedApplePayRuntime::new());

    let Some(factory) = apple_pay_session(runtime.clone()) else {
        ui::error("Apple Pay sessions are unavailable in this runtime");
        return Ok(());
    };

    let request = PaymentRequest {
        country_code: country.to_string(),
        currency_code: currency.to_string(),
        supported_networks: vec!["visa".to_string(), "masterCard".to_string()],
        merchant_capabilities: vec!["supports3DS".to_string()],
        total: LineItem::new(label, amount),
        ..PaymentRequest::default()
    };

    ui::header("Apple Pay Session");
    ui::key_value("Merchant", label);
    ui::key_value("Total", &format!("{amount} {currency}"));
    ui::key_value("Country", country);
    ui::separator();

    let session = Arc::new(factory.create(SHEET_VERSION, request)?);

    let handle = session.clone();
    session.add_event_listener(SessionEvent::ValidateMerchant, move |event| {
        if let ApplePayEvent::ValidateMerchant { validation_url } = event {
            ui::info(&format!("validatemerchant: {validation_url}"));
        }
        let merchant_session = json!({ "merchantSessionIdentifier": "demo-session" });
        if let Err(error) = handle.complete_merchant_validation(merchant_session) {
            ui::error(&format!("completeMerchantValidation failed: {error}"));
        }
    });

    let handle = session.clone();
    session.add_event_listener(SessionEvent::ShippingMethodSelected, move |_event| {
        ui::info("shippingmethodselected: keeping the sheet total");
        if let Err(error) = handle.complete_shipping_method_selection(ShippingMethodUpdate::default())
        {
            ui::error(&format!("completeShippingMethodSelection failed: {error}"));
        }
    });

    let handle = session.clone();
    session.add_event_listener(SessionEvent::ShippingContactSelected, move |_event| {
        let update = if reject_contact {
            ui::info("shippingcontactselected: rejecting the address");
            ShippingContactUpdate {
                errors: vec![UpdateError::new(
                    "shippingContactInvalid",
                    Some("postalAddress".to_string()),
                    "Shipping to this address is not available",
                )],
                ..ShippingContactUpdate::default()
            }
        } else {
            ui::info("shippingcontactselected: accepting the address");
            ShippingContactUpdate::default()
        };
        if let Err(error) = handle.complete_shipping_contact_selection(update) {
            ui::error(&format!("completeShippingContactSelection failed: {error}"));
        }
    });

    let handle = session.clone();
    session.add_event_listener(SessionEvent::PaymentAuthorized, move |_event| {
        ui::info("paymentauthorized: token received");
        let update = PaymentAuthorizationUpdate {
            status: Some(0),
            ..PaymentAuthorizationUpdate::default()
        };
        if let Err(error) = handle.complete_payment(update) {
            ui::error(&format!("completePayment failed: {error}"));
        }
    });

    session.add_event_listener(SessionEvent::Cancel, |_event| {
        ui::warning("Sheet dismissed by the shopper");
    });

    session.begin()?;

    let dispatcher = runtime
        .dispatcher()
        .ok_or_else(|| anyhow!("runtime produced no session dispatcher"))?;

    dispatcher.dispatch(ApplePayEvent::ValidateMerchant {
        validation_url: "https://apple-pay-gateway.example/paymentservices/startSession"
            .to_string(),
    })?;
    dispatcher.dispatch(ApplePayEvent::ShippingMethodSelected {
        shipping_method: json!({ "identifier": "ground", "label": "Ground Shipping" }),
    })?;
    dispatcher.dispatch(ApplePayEvent::ShippingContactSelected {
        shipping_contact: json!({ "countryCode": country, "postalCode": "00000" }),
    })?;
    if reject_contact {
        dispatcher.dispatch(ApplePayEvent::Cancel)?;
    } else {
        dispatcher.dispatch(ApplePayEvent::PaymentAuthorized {
            payment: json!({ "token": { "transactionIdentifier": "demo-txn" } }),
        })?;
    }

    ui::separator();
    println!("Native call log:");
    for call in runtime.calls() {
        println!("  {} {}", "→".dimmed(), call);
    }

    if reject_contact {
        ui::success("Contact errors were converted for the native layer");
    } else {
        ui::success("Sheet walk complete");
    }

    Ok(())
}
