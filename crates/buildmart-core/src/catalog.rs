//! # Catalog
//!
//! The product list and the vehicle tiers, plus the lookups the storefront
//! performs on them.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Startup                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Catalog::default() ◄── static data below                              │
//! │     │                                                                   │
//! │     ├── stored product override? ──► replace products                  │
//! │     ├── stored vehicle override? ──► replace vehicles                  │
//! │     ▼                                                                   │
//! │  Catalog::new(products, vehicles) ◄── rejects an empty vehicle list    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  read-only for the rest of the session (admin edits rebuild it)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, Product, VehicleTier};

// =============================================================================
// Category Filter
// =============================================================================

/// Filter applied to the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parses a filter label; `"All"` (any case) selects everything.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(label))
        }
    }

    /// Returns true if the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &product.category == category,
        }
    }

    /// Display label ("All", "Cement", ...).
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Products and vehicle tiers in effect for this session.
///
/// Serialize-only: the one way in is `Catalog::new`, which rejects an empty
/// tier list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    products: Vec<Product>,
    vehicles: Vec<VehicleTier>,
}

impl Catalog {
    /// Creates a catalog. Vehicle order is kept as given.
    ///
    /// ## Errors
    /// `CoreError::NoVehicleTiers` if `vehicles` is empty, since transport
    /// pricing needs at least one tier to fall back to.
    pub fn new(products: Vec<Product>, vehicles: Vec<VehicleTier>) -> CoreResult<Self> {
        if vehicles.is_empty() {
            return Err(CoreError::NoVehicleTiers);
        }
        Ok(Catalog { products, vehicles })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn vehicles(&self) -> &[VehicleTier] {
        &self.vehicles
    }

    /// Finds a product by id.
    pub fn find_product(&self, id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Mutable lookup used by the admin editing flow.
    pub fn product_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Mutable vehicle lookup used by the admin editing flow.
    pub fn vehicle_mut(&mut self, id: &str) -> CoreResult<&mut VehicleTier> {
        self.vehicles
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| CoreError::VehicleNotFound(id.to_string()))
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Filter options in display order, starting with "All".
    pub fn categories() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::KNOWN.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn into_parts(self) -> (Vec<Product>, Vec<VehicleTier>) {
        (self.products, self.vehicles)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog {
            products: default_products(),
            vehicles: default_vehicles(),
        }
    }
}

// =============================================================================
// Static Data
// =============================================================================

const CEMENT_IMAGE: &str =
    "https://images.unsplash.com/photo-1590501593272-a8a6e1b3e2d3?w=400&h=300&fit=crop";
const STEEL_IMAGE: &str =
    "https://images.unsplash.com/photo-1587293852726-70cdb56c2866?w=400&h=300&fit=crop";
const BRICKS_IMAGE: &str =
    "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?w=400&h=300&fit=crop";
const SAND_IMAGE: &str =
    "https://images.unsplash.com/photo-1595246140625-573b715d11dc?w=400&h=300&fit=crop";

fn product(
    id: &str,
    category: Category,
    name: &str,
    base_price: i64,
    unit: &str,
    gst_percent: u32,
    description: &str,
    image: &str,
) -> Product {
    Product {
        id: id.to_string(),
        category,
        name: name.to_string(),
        base_price,
        unit: unit.to_string(),
        gst_rate_bps: gst_percent * 100,
        description: description.to_string(),
        image: image.to_string(),
    }
}

/// The shipped product list.
#[rustfmt::skip]
pub fn default_products() -> Vec<Product> {
    use Category::*;

    vec![
        product("cement-1", Cement, "ACC Cement OPC 53 Grade", 380, "bag (50kg)", 28,
            "High strength cement for structural work", CEMENT_IMAGE),
        product("cement-2", Cement, "Ultratech PPC Cement", 350, "bag (50kg)", 28,
            "Portland Pozzolana Cement for general construction", CEMENT_IMAGE),
        product("steel-1", Steel, "TMT Steel Bars 8mm", 65, "kg", 18,
            "Fe 500D grade TMT bars", STEEL_IMAGE),
        product("steel-2", Steel, "TMT Steel Bars 12mm", 63, "kg", 18,
            "Fe 500D grade TMT bars", STEEL_IMAGE),
        product("steel-3", Steel, "TMT Steel Bars 16mm", 62, "kg", 18,
            "Fe 500D grade TMT bars", STEEL_IMAGE),
        product("bricks-1", Bricks, "Red Clay Bricks", 8, "piece", 12,
            "Standard 9x4x3 inch bricks", BRICKS_IMAGE),
        product("bricks-2", Bricks, "Fly Ash Bricks", 6, "piece", 12,
            "Eco-friendly lightweight bricks", BRICKS_IMAGE),
        product("sand-1", SandAndAggregates, "River Sand", 1800, "ton", 5,
            "Natural river sand for construction", SAND_IMAGE),
        product("sand-2", SandAndAggregates, "M-Sand (Manufactured Sand)", 1600, "ton", 5,
            "Crushed granite sand alternative", SAND_IMAGE),
        product("aggregate-1", SandAndAggregates, "20mm Aggregate", 1400, "ton", 5,
            "Coarse aggregate for concrete", SAND_IMAGE),
    ]
}

/// The shipped vehicle tiers, ascending by capacity.
pub fn default_vehicles() -> Vec<VehicleTier> {
    let tier = |id: &str, name: &str, cap: u64, base: i64, rate: i64, desc: &str| VehicleTier {
        id: id.to_string(),
        name: name.to_string(),
        max_capacity_kg: cap,
        base_charge: base,
        per_km_rate: rate,
        description: desc.to_string(),
    };

    vec![
        tier("mini-truck", "Mini Truck", 1000, 500, 12, "Up to 1 ton"),
        tier("lorry", "Lorry", 5000, 1200, 18, "1-5 tons"),
        tier("tipper", "Tipper", 15000, 2500, 25, "5-15 tons"),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = Catalog::default();
        assert_eq!(catalog.products().len(), 10);
        assert_eq!(catalog.vehicles().len(), 3);

        let ids: Vec<&str> = catalog.vehicles().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["mini-truck", "lorry", "tipper"]);
    }

    #[test]
    fn test_vehicles_ascend_by_capacity() {
        let vehicles = default_vehicles();
        assert!(vehicles
            .windows(2)
            .all(|pair| pair[0].max_capacity_kg < pair[1].max_capacity_kg));
    }

    #[test]
    fn test_find_product() {
        let catalog = Catalog::default();
        let cement = catalog.find_product("cement-1").unwrap();
        assert_eq!(cement.base_price, 380);
        assert_eq!(cement.gst_rate_bps, 2800);

        let err = catalog.find_product("cement-99").unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(id) if id == "cement-99"));
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = Catalog::default();

        assert_eq!(catalog.filter(&CategoryFilter::All).len(), 10);
        assert_eq!(catalog.filter(&CategoryFilter::parse("Steel")).len(), 3);
        assert_eq!(
            catalog.filter(&CategoryFilter::parse("Sand & Aggregates")).len(),
            3
        );
        assert!(catalog.filter(&CategoryFilter::parse("Tiles")).is_empty());
    }

    #[test]
    fn test_filter_parse_all() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Bricks"),
            CategoryFilter::Only(Category::Bricks)
        );
    }

    #[test]
    fn test_categories_in_display_order() {
        let labels: Vec<String> = Catalog::categories()
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        assert_eq!(
            labels,
            ["All", "Cement", "Steel", "Bricks", "Sand & Aggregates"]
        );
    }

    #[test]
    fn test_empty_vehicle_list_rejected() {
        let err = Catalog::new(default_products(), Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::NoVehicleTiers));
    }

    #[test]
    fn test_serialized_lists_rebuild_through_new() {
        let json = serde_json::to_value(Catalog::default()).unwrap();
        assert_eq!(json["vehicles"].as_array().unwrap().len(), 3);

        // Lists come back as plain vectors and must pass Catalog::new again
        let products: Vec<Product> = serde_json::from_value(json["products"].clone()).unwrap();
        let err = Catalog::new(products.clone(), Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::NoVehicleTiers));

        let vehicles: Vec<VehicleTier> = serde_json::from_value(json["vehicles"].clone()).unwrap();
        assert_eq!(Catalog::new(products, vehicles).unwrap(), Catalog::default());
    }

    #[test]
    fn test_admin_edit_through_product_mut() {
        let mut catalog = Catalog::default();
        catalog.product_mut("bricks-2").unwrap().base_price = 7;
        assert_eq!(catalog.find_product("bricks-2").unwrap().base_price, 7);

        assert!(catalog.vehicle_mut("helicopter").is_err());
    }
}
