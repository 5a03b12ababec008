//! # Admin Commands
//!
//! Password-gated edits of prices, GST rates, vehicle charges and contact
//! details.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  --password ──► matches business.admin_password? ── NO ──► UNAUTHORIZED │
//! │                     │                                                   │
//! │                    YES                                                  │
//! │                     ▼                                                   │
//! │  validate the edit (0 ≤ price ≤ ₹1 crore, GST ≤ 100%, digits, ...)      │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  apply to the in-memory Settings                                        │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  save ALL override keys in one transaction                              │
//! │                                                                         │
//! │  reset: delete every override, settings fall back to config defaults    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use buildmart_core::validation::{
    validate_amount, validate_required, validate_payment_link, validate_tax_rate,
    validate_whatsapp_number,
};
use buildmart_core::{Money, TaxRate, ValidationError};

use super::Render;
use crate::cli::{AdminAction, AdminArgs};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::{AppContext, Settings};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReport {
    /// What was done ("show", "set-price", ...).
    pub action: String,
    pub settings: Settings,
    pub last_saved_at: Option<DateTime<Utc>>,
    /// Rows deleted by a reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<u64>,
}

/// Checks the admin password.
pub fn authorize(config: &AppConfig, password: &str) -> Result<(), AppError> {
    if password != config.business.admin_password {
        warn!("Rejected admin login");
        return Err(AppError::unauthorized());
    }
    Ok(())
}

pub async fn run(ctx: &mut AppContext, args: AdminArgs) -> Result<AdminReport, AppError> {
    authorize(&ctx.config, &args.password)?;

    let mut removed = None;
    let action = match args.action {
        AdminAction::Show => "show",
        AdminAction::SetPrice { id, price } => {
            validate_amount("price", Money::from_rupees(price))?;
            ctx.settings.catalog.product_mut(&id)?.base_price = price;
            ctx.save_settings().await?;
            info!(product = %id, price, "Price updated");
            "set-price"
        }
        AdminAction::SetGst { id, percent } => {
            let rate = parse_gst_percent(percent)?;
            ctx.settings.catalog.product_mut(&id)?.gst_rate_bps = rate.bps();
            ctx.save_settings().await?;
            info!(product = %id, rate = %rate, "GST rate updated");
            "set-gst"
        }
        AdminAction::SetVehicle {
            id,
            base_charge,
            per_km_rate,
        } => {
            if base_charge.is_none() && per_km_rate.is_none() {
                return Err(AppError::validation(
                    "Give --base-charge and/or --per-km-rate",
                ));
            }

            if let Some(charge) = base_charge {
                validate_amount("base_charge", Money::from_rupees(charge))?;
            }
            if let Some(rate) = per_km_rate {
                validate_amount("per_km_rate", Money::from_rupees(rate))?;
            }

            let vehicle = ctx.settings.catalog.vehicle_mut(&id)?;
            if let Some(charge) = base_charge {
                vehicle.base_charge = charge;
            }
            if let Some(rate) = per_km_rate {
                vehicle.per_km_rate = rate;
            }
            ctx.save_settings().await?;
            info!(vehicle = %id, "Vehicle tier updated");
            "set-vehicle"
        }
        AdminAction::SetContact {
            whatsapp_number,
            upi_id,
            payment_link,
        } => {
            let contact = &mut ctx.settings.contact;
            if let Some(number) = whatsapp_number {
                validate_whatsapp_number(&number)?;
                contact.whatsapp_number = number;
            }
            if let Some(upi) = upi_id {
                validate_required("upi_id", &upi)?;
                contact.upi_id = upi;
            }
            if let Some(link) = payment_link {
                validate_payment_link(&link)?;
                contact.payment_link = link;
            }
            ctx.save_settings().await?;
            info!("Contact details updated");
            "set-contact"
        }
        AdminAction::Reset => {
            removed = Some(ctx.db.settings().reset().await?);
            ctx.settings = Settings::defaults(&ctx.config);
            "reset"
        }
    };

    let last_saved_at = ctx.db.settings().last_saved_at().await?;
    Ok(AdminReport {
        action: action.to_string(),
        settings: ctx.settings.clone(),
        last_saved_at,
        removed,
    })
}

fn parse_gst_percent(percent: f64) -> Result<TaxRate, ValidationError> {
    if !percent.is_finite() || percent < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "gst_rate".to_string(),
            min: 0,
            max: 100,
        });
    }
    let rate = TaxRate::from_percentage(percent);
    validate_tax_rate(rate)?;
    Ok(rate)
}

impl Render for AdminReport {
    fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(removed) = self.removed {
            out.push_str(&format!("Reset: {} stored override(s) removed\n\n", removed));
        }

        out.push_str("Products:\n");
        for p in self.settings.catalog.products() {
            out.push_str(&format!(
                "  {:<12} {:<28} {:>8}  GST {}\n",
                p.id,
                p.name,
                p.price().to_string(),
                p.gst_rate()
            ));
        }

        out.push_str("\nVehicles:\n");
        for v in self.settings.catalog.vehicles() {
            out.push_str(&format!(
                "  {:<12} {:<12} up to {:>6}kg  base {}  {}/km\n",
                v.id,
                v.name,
                v.max_capacity_kg,
                v.base_charge(),
                v.per_km_rate()
            ));
        }

        let contact = &self.settings.contact;
        let saved = match &self.last_saved_at {
            Some(at) => at.to_rfc3339(),
            None => "never (defaults in use)".to_string(),
        };
        out.push_str(&format!(
            "\nWhatsApp:      {}\n\
             UPI:           {}\n\
             Payment link:  {}\n\
             Last saved:    {}",
            contact.whatsapp_number, contact.upi_id, contact.payment_link, saved
        ));
        out
    }
}
