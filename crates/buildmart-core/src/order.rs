//! # Order Hand-off
//!
//! Renders the WhatsApp order summary and the payment confirmation, and
//! builds the `wa.me` deep links that carry them.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CustomerDetails ──┐                                                    │
//! │                    ├──► Order::new ── validate fields                   │
//! │  Quote ────────────┘        │        ── distance resolved?              │
//! │                             ▼                                           │
//! │                     summary_message() ──► whatsapp_link(number, text)   │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                   https://wa.me/91...?text=...          │
//! │                                                                         │
//! │  After the external payment link:                                       │
//! │                     payment_confirmation() ──► whatsapp_link            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every amount is printed with [`Money`]'s `Display`, so the message shows
//! exactly the rounded figures held in the breakdowns.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quote::Quote;
use crate::types::{CustomerDetails, DistanceResult, TransportBreakdown};
use crate::validation::validate_customer;

const WHATSAPP_BASE: &str = "https://wa.me/";

// =============================================================================
// Order
// =============================================================================

/// A validated order ready to be handed off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub customer: CustomerDetails,
    pub quote: Quote,
    pub gst_invoice: bool,
}

impl Order {
    /// Validates the customer fields and checks that transport was priced.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for the first bad customer field
    /// - `CoreError::DistanceNotResolved` if the quote has no distance
    pub fn new(customer: CustomerDetails, quote: Quote, gst_invoice: bool) -> CoreResult<Self> {
        validate_customer(&customer)?;

        if quote.distance.is_none() || !quote.has_transport() {
            return Err(CoreError::DistanceNotResolved);
        }

        Ok(Order {
            customer,
            quote,
            gst_invoice,
        })
    }

    fn delivery(&self) -> CoreResult<(&DistanceResult, &TransportBreakdown)> {
        match (&self.quote.distance, &self.quote.transport) {
            (Some(distance), Some(transport)) => Ok((distance, transport)),
            _ => Err(CoreError::DistanceNotResolved),
        }
    }

    /// The order summary sent to the business on WhatsApp.
    pub fn summary_message(&self) -> CoreResult<String> {
        let (distance, transport) = self.delivery()?;
        let c = &self.customer;
        let q = &self.quote;

        let marker = if distance.is_fallback {
            "(Estimated)"
        } else {
            "(Calculated)"
        };

        let msg = format!(
            "*🏗 NEW ORDER - BUILDMART*\n\
             \n\
             *CUSTOMER DETAILS:*\n\
             👤 Name: {name}\n\
             📞 Phone: {phone}\n\
             📍 Address: {address}\n\
             📮 Pincode: {pincode}\n\
             \n\
             *PRODUCT DETAILS:*\n\
             📦 Product: {product}\n\
             📊 Quantity: {qty} {unit}\n\
             ⚖️ Est. Weight: {weight}kg\n\
             \n\
             *DELIVERY:*\n\
             🚗 Distance: {distance_text} {marker}\n\
             🚚 Vehicle: {vehicle}\n\
             \n\
             *COST BREAKDOWN:*\n\
             💰 Material: {material}\n\
             📄 GST ({rate}): {gst}\n\
             🚛 Base Charge: {base}\n\
             📏 Distance ({km}km × {per_km}): {distance_charge}\n\
             🚚 Transport Total: {transport_total}\n\
             \n\
             *💵 TOTAL: {total}*\n\
             \n\
             📋 GST Invoice: {invoice}\n\
             \n\
             _Payment pending. Link will be shared after confirmation._",
            name = c.name.trim(),
            phone = c.phone.trim(),
            address = c.address.trim(),
            pincode = c.pincode.trim(),
            product = q.product_name,
            qty = q.quantity,
            unit = q.unit,
            weight = q.weight_kg,
            distance_text = distance.distance_text,
            vehicle = transport.vehicle.name,
            material = q.tax.material_cost,
            rate = q.tax.tax_rate,
            gst = q.tax.tax_amount,
            base = transport.base_charge,
            km = transport.breakdown.distance_km,
            per_km = transport.breakdown.per_km_rate,
            distance_charge = transport.distance_charge,
            transport_total = transport.total_transport_cost,
            total = q.estimated_total,
            invoice = if self.gst_invoice { "Yes" } else { "No" },
        );
        Ok(msg)
    }

    /// The confirmation sent after the customer used the payment link.
    pub fn payment_confirmation(&self) -> String {
        payment_confirmation_message(
            &self.quote.product_name,
            &self.customer,
            self.quote.estimated_total,
        )
    }
}

/// Renders the "payment completed" message.
pub fn payment_confirmation_message(
    product_name: &str,
    customer: &CustomerDetails,
    amount: Money,
) -> String {
    format!(
        "✅ *PAYMENT COMPLETED*\n\
         \n\
         Order for: {}\n\
         Customer: {}\n\
         Phone: {}\n\
         Amount: {}\n\
         \n\
         Please confirm order processing. Thank you!",
        product_name,
        customer.name.trim(),
        customer.phone.trim(),
        amount
    )
}

// =============================================================================
// Deep Links
// =============================================================================

/// Percent-encodes `text` for a URL query value. Spaces become `%20`.
fn encode_component(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `https://wa.me/<number>?text=<encoded text>`
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!("{}{}?text={}", WHATSAPP_BASE, number, encode_component(text))
}

/// `https://wa.me/<number>`, used by the floating chat button.
pub fn whatsapp_chat_link(number: &str) -> String {
    format!("{}{}", WHATSAPP_BASE, number)
}

// =============================================================================
// Unit Tests
// =============================================================================
