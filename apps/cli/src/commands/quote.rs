//! # Quote Command
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product + quantity ──► GST breakdown                                   │
//! │                              │                                          │
//! │  address / pincode given? ───┤                                          │
//! │        NO:  material total only                                         │
//! │        YES: distance lookup ──► tier ──► transport ──► estimated total  │
//! │                  │                                                      │
//! │                  └── failed? 15 km estimate, reason shown               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use buildmart_core::validation::delivery_destination;
use buildmart_core::Quote;
use buildmart_maps::DistanceMatrixClient;

use super::{fallback_note, Render};
use crate::cli::QuoteArgs;
use crate::error::AppError;
use crate::state::Settings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReport {
    pub quote: Quote,
    pub destination: Option<String>,
    /// Why the distance is an estimate, when it is one.
    pub fallback_reason: Option<String>,
}

pub async fn quote(
    settings: &Settings,
    client: &DistanceMatrixClient,
    args: &QuoteArgs,
) -> Result<QuoteReport, AppError> {
    let product = settings.catalog.find_product(&args.id)?;
    let quantity = args.quantity.value();

    if args.address.trim().is_empty() && args.pincode.trim().is_empty() {
        debug!(product = %product.id, quantity, "Quoting without delivery");
        let quote = Quote::build(product, quantity, None, settings.catalog.vehicles())?;
        return Ok(QuoteReport {
            quote,
            destination: None,
            fallback_reason: None,
        });
    }

    let destination = delivery_destination(&args.address, &args.pincode)?;
    let lookup = client.resolve(&destination).await;
    let quote = Quote::build(
        product,
        quantity,
        Some(lookup.result()),
        settings.catalog.vehicles(),
    )?;

    Ok(QuoteReport {
        quote,
        destination: Some(destination),
        fallback_reason: fallback_note(&lookup),
    })
}

impl Render for QuoteReport {
    fn render_text(&self) -> String {
        let q = &self.quote;
        let mut out = format!(
            "{} × {} {}\n\
             Material cost:     {}\n\
             GST ({}):         {}\n\
             Total with GST:    {}\n",
            q.product_name,
            q.quantity,
            q.unit,
            q.tax.material_cost,
            q.tax.tax_rate,
            q.tax.tax_amount,
            q.tax.total_with_tax
        );

        if let (Some(distance), Some(transport)) = (&q.distance, &q.transport) {
            out.push('\n');
            if let Some(destination) = &self.destination {
                out.push_str(&format!("Deliver to:        {}\n", destination));
            }
            out.push_str(&format!(
                "Distance:          {} ({})\n",
                distance.distance_text, distance.duration_text
            ));
            if let Some(reason) = &self.fallback_reason {
                out.push_str(&format!(
                    "Note:              {} (using estimated distance)\n",
                    reason
                ));
            }
            out.push_str(&format!(
                "Vehicle:           {} (est. weight {}kg)\n\
                 Base charge:       {}\n\
                 Distance ({}km × {}): {}\n\
                 Transport total:   {}\n",
                transport.vehicle.name,
                q.weight_kg,
                transport.base_charge,
                transport.breakdown.distance_km,
                transport.breakdown.per_km_rate,
                transport.distance_charge,
                transport.total_transport_cost
            ));
        }

        out.push_str(&format!("\nEstimated total:   {}", q.estimated_total));
        out
    }
}
