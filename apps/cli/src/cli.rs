//! Command line definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use buildmart_core::validation::clamp_quantity;
use buildmart_core::CustomerDetails;

#[derive(Debug, Parser)]
#[command(name = "buildmart")]
#[command(about = "BuildMart construction materials storefront", version)]
pub struct Cli {
    /// Print command output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the catalog
    Products {
        /// Category to show ("Cement", "Steel", ...). All when omitted.
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one product
    Product { id: String },

    /// Price a product, with delivery when a destination is given
    Quote(QuoteArgs),

    /// Build the WhatsApp order summary and link
    Order(OrderArgs),

    /// Payment link and the "payment completed" WhatsApp link
    PaymentConfirmation(OrderArgs),

    /// Edit prices, tiers and contact details
    Admin(AdminArgs),
}

/// Quantity as typed; anything that is not a positive number counts as 1.
#[derive(Debug, Clone, Args)]
pub struct QuantityArg {
    #[arg(long, short, default_value = "1")]
    pub quantity: String,
}

impl QuantityArg {
    pub fn value(&self) -> u32 {
        clamp_quantity(&self.quantity)
    }
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Product id ("cement-1")
    pub id: String,

    #[command(flatten)]
    pub quantity: QuantityArg,

    /// Delivery address
    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub pincode: String,
}

#[derive(Debug, Clone, Args)]
pub struct CustomerArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "")]
    pub pincode: String,
}

impl From<CustomerArgs> for CustomerDetails {
    fn from(args: CustomerArgs) -> Self {
        CustomerDetails {
            name: args.name,
            phone: args.phone,
            address: args.address,
            pincode: args.pincode,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct OrderArgs {
    /// Product id
    pub id: String,

    #[command(flatten)]
    pub quantity: QuantityArg,

    #[command(flatten)]
    pub customer: CustomerArgs,

    /// Do not ask for a GST invoice
    #[arg(long)]
    pub no_gst_invoice: bool,
}

#[derive(Debug, Args)]
pub struct AdminArgs {
    #[arg(long)]
    pub password: String,

    #[command(subcommand)]
    pub action: AdminAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminAction {
    /// Effective settings and when they were last saved
    Show,

    /// Set a product's unit price in rupees
    SetPrice { id: String, price: i64 },

    /// Set a product's GST rate in percent
    SetGst { id: String, percent: f64 },

    /// Change a vehicle tier's charges
    SetVehicle {
        id: String,

        #[arg(long)]
        base_charge: Option<i64>,

        #[arg(long)]
        per_km_rate: Option<i64>,
    },

    /// Change the business contact details
    SetContact {
        #[arg(long)]
        whatsapp_number: Option<String>,

        #[arg(long)]
        upi_id: Option<String>,

        #[arg(long)]
        payment_link: Option<String>,
    },

    /// Delete every stored override
    Reset,
}
