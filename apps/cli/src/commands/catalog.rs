//! Catalog browsing: `products` and `product`.

use serde::Serialize;

use buildmart_core::order::whatsapp_chat_link;
use buildmart_core::tax::compute_tax;
use buildmart_core::{Catalog, CategoryFilter, Money, Product};

use super::Render;
use crate::error::AppError;
use crate::state::Settings;

// =============================================================================
// products
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    pub category: String,
    pub categories: Vec<String>,
    pub products: Vec<Product>,
}

pub fn list_products(settings: &Settings, category: Option<&str>) -> ProductList {
    let filter = category.map(CategoryFilter::parse).unwrap_or_default();

    ProductList {
        category: filter.label().to_string(),
        categories: Catalog::categories()
            .iter()
            .map(|c| c.label().to_string())
            .collect(),
        products: settings
            .catalog
            .filter(&filter)
            .into_iter()
            .cloned()
            .collect(),
    }
}

impl Render for ProductList {
    fn render_text(&self) -> String {
        let mut out = format!("Category: {}\n", self.category);
        if self.products.is_empty() {
            out.push_str("No products in this category.");
            return out;
        }
        for p in &self.products {
            out.push_str(&format!(
                "{:<12} {:<28} {:>8} / {:<12} GST {}\n",
                p.id,
                p.name,
                p.price().to_string(),
                p.unit,
                p.gst_rate()
            ));
        }
        out.trim_end().to_string()
    }
}

// =============================================================================
// product
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    /// Price of one unit including GST.
    pub unit_price_with_gst: Money,
    /// Chat link for questions about the product.
    pub chat_link: String,
}

pub fn show_product(settings: &Settings, id: &str) -> Result<ProductDetail, AppError> {
    let product = settings.catalog.find_product(id)?;
    let unit = compute_tax(product.price(), 1, product.gst_rate())?;

    Ok(ProductDetail {
        product: product.clone(),
        unit_price_with_gst: unit.total_with_tax,
        chat_link: whatsapp_chat_link(&settings.contact.whatsapp_number),
    })
}

impl Render for ProductDetail {
    fn render_text(&self) -> String {
        let p = &self.product;
        format!(
            "{name}\n\
             {description}\n\
             \n\
             Category:   {category}\n\
             Price:      {price} / {unit}\n\
             GST:        {rate}\n\
             With GST:   {with_gst} / {unit}\n\
             Questions:  {chat}",
            name = p.name,
            description = p.description,
            category = p.category,
            price = p.price(),
            unit = p.unit,
            rate = p.gst_rate(),
            with_gst = self.unit_price_with_gst,
            chat = self.chat_link,
        )
    }
}
