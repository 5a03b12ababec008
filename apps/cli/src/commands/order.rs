//! # Order Hand-off Commands
//!
//! `order` renders the WhatsApp summary for the business number and prints
//! the link that opens it. `payment-confirmation` is the step after the
//! customer has paid through the external payment link.
//!
//! Customer fields are checked before the distance lookup, so a bad form
//! never costs a request.

use serde::Serialize;
use tracing::info;

use buildmart_core::order::{whatsapp_link, Order};
use buildmart_core::validation::{delivery_destination, validate_customer};
use buildmart_core::{CustomerDetails, Money, Quote};
use buildmart_maps::DistanceMatrixClient;

use super::{fallback_note, Render};
use crate::cli::OrderArgs;
use crate::error::AppError;
use crate::state::Settings;

/// Validates the form, resolves the distance and prices the order.
async fn build_order(
    settings: &Settings,
    client: &DistanceMatrixClient,
    args: OrderArgs,
) -> Result<(Order, Option<String>), AppError> {
    let product = settings.catalog.find_product(&args.id)?;
    let customer = CustomerDetails::from(args.customer);
    validate_customer(&customer)?;

    let destination = delivery_destination(&customer.address, &customer.pincode)?;
    let lookup = client.resolve(&destination).await;

    let quote = Quote::build(
        product,
        args.quantity.value(),
        Some(lookup.result()),
        settings.catalog.vehicles(),
    )?;
    let order = Order::new(customer, quote, !args.no_gst_invoice)?;

    Ok((order, fallback_note(&lookup)))
}

// =============================================================================
// order
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReport {
    pub order: Order,
    pub message: String,
    pub whatsapp_link: String,
    pub fallback_reason: Option<String>,
}

pub async fn place_order(
    settings: &Settings,
    client: &DistanceMatrixClient,
    args: OrderArgs,
) -> Result<OrderReport, AppError> {
    let (order, fallback_reason) = build_order(settings, client, args).await?;
    let message = order.summary_message()?;
    let link = whatsapp_link(&settings.contact.whatsapp_number, &message);

    info!(
        product = %order.quote.product_id,
        quantity = order.quote.quantity,
        total = order.quote.estimated_total.rupees(),
        "Order summary prepared"
    );

    Ok(OrderReport {
        order,
        message,
        whatsapp_link: link,
        fallback_reason,
    })
}

impl Render for OrderReport {
    fn render_text(&self) -> String {
        let mut out = String::new();
        if let Some(reason) = &self.fallback_reason {
            out.push_str(&format!("Note: {} (using estimated distance)\n\n", reason));
        }
        out.push_str(&self.message);
        out.push_str("\n\nSend on WhatsApp:\n");
        out.push_str(&self.whatsapp_link);
        out
    }
}

// =============================================================================
// payment-confirmation
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReport {
    pub amount: Money,
    pub payment_link: String,
    pub upi_id: String,
    pub message: String,
    pub whatsapp_link: String,
}

pub async fn payment_confirmation(
    settings: &Settings,
    client: &DistanceMatrixClient,
    args: OrderArgs,
) -> Result<PaymentReport, AppError> {
    let (order, _) = build_order(settings, client, args).await?;
    let message = order.payment_confirmation();
    let contact = &settings.contact;

    Ok(PaymentReport {
        amount: order.quote.estimated_total,
        payment_link: contact.payment_link.clone(),
        upi_id: contact.upi_id.clone(),
        whatsapp_link: whatsapp_link(&contact.whatsapp_number, &message),
        message,
    })
}

impl Render for PaymentReport {
    fn render_text(&self) -> String {
        format!(
            "Amount:        {}\n\
             Pay online:    {}\n\
             UPI:           {}\n\
             \n\
             {}\n\
             \n\
             After paying, confirm on WhatsApp:\n\
             {}",
            self.amount, self.payment_link, self.upi_id, self.message, self.whatsapp_link
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CustomerArgs, QuantityArg};
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use buildmart_maps::MapsConfig;

    fn offline_client() -> DistanceMatrixClient {
        DistanceMatrixClient::new(MapsConfig::new(None)).unwrap()
    }

    fn args(phone: &str) -> OrderArgs {
        OrderArgs {
            id: "steel-2".to_string(),
            quantity: QuantityArg {
                quantity: "200".to_string(),
            },
            customer: CustomerArgs {
                name: "Ravi Kumar".to_string(),
                phone: phone.to_string(),
                address: "Plot 14, Sector 62, Noida".to_string(),
                pincode: "201301".to_string(),
            },
            no_gst_invoice: false,
        }
    }

    #[tokio::test]
    async fn test_place_order() {
        let settings = Settings::defaults(&AppConfig::default());
        let report = place_order(&settings, &offline_client(), args("9812345678"))
            .await
            .unwrap();

        // 200 × 63 = 12,600; GST 18% = 2,268; Mini Truck 500 + 15 × 12 = 680
        assert_eq!(report.order.quote.estimated_total.rupees(), 12_600 + 2_268 + 680);
        assert!(report.message.contains("👤 Name: Ravi Kumar"));
        assert!(report.message.contains("15 km (estimated) (Estimated)"));
        assert!(report.message.contains("📋 GST Invoice: Yes"));
        assert!(report
            .whatsapp_link
            .starts_with("https://wa.me/919876543210?text="));
        assert!(!report.whatsapp_link.contains(' '));
        assert!(report.fallback_reason.is_some());
    }

    #[tokio::test]
    async fn test_order_rejects_short_phone() {
        let settings = Settings::defaults(&AppConfig::default());
        let err = place_order(&settings, &offline_client(), args("98123"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("phone"));
    }

    #[tokio::test]
    async fn test_order_uses_stored_number() {
        let mut settings = Settings::defaults(&AppConfig::default());
        settings.contact.whatsapp_number = "919000000001".to_string();

        let mut order_args = args("9812345678");
        order_args.no_gst_invoice = true;

        let report = place_order(&settings, &offline_client(), order_args)
            .await
            .unwrap();
        assert!(report.whatsapp_link.starts_with("https://wa.me/919000000001?"));
        assert!(report.message.contains("📋 GST Invoice: No"));
    }

    #[tokio::test]
    async fn test_payment_confirmation() {
        let settings = Settings::defaults(&AppConfig::default());
        let report = payment_confirmation(&settings, &offline_client(), args("9812345678"))
            .await
            .unwrap();

        assert_eq!(report.amount.rupees(), 15_548);
        assert_eq!(report.payment_link, "https://rzp.io/l/your-payment-link");
        assert_eq!(report.upi_id, "business@upi");
        assert!(report.message.contains("Amount: ₹15,548"));
        assert!(report.message.contains("Customer: Ravi Kumar"));
        assert!(report.render_text().contains("UPI:           business@upi"));
    }
}
