//! Material inventory: entity, form validation, low-stock policy, and
//! summaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::datekey::lenient_date;
use crate::error::CoreError;
use crate::numeric::{parse_positive, RawAmount};
use crate::types::Keyed;
use crate::view::{RecordFilter, SortValue, ViewRecord};

/// Quantity threshold below which an item counts as low stock when the
/// session does not configure one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 10.0;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A material document under `projects/{id}/materials`. Quantity and unit
/// price stay in raw stored form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    pub quantity: RawAmount,
    pub unit: String,
    pub price: RawAmount,
    #[serde(default)]
    pub supplier: String,
    /// Purchase date, when recorded.
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Material {
    /// Extended cost of the line. Either field failing to parse makes the
    /// whole line contribute zero, never a partial product.
    pub fn line_total(&self) -> f64 {
        match (self.quantity.parse(), self.price.parse()) {
            (Some(quantity), Some(price)) => quantity * price,
            _ => 0.0,
        }
    }

    /// Low stock is a strict comparison; a malformed quantity counts as
    /// zero and therefore reads as low.
    pub fn is_low_stock(&self, threshold: f64) -> bool {
        self.quantity.or_zero() < threshold
    }
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub price: String,
    pub supplier: String,
    pub date: Option<NaiveDate>,
}

impl MaterialForm {
    pub fn into_record(self) -> Result<Material, CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::Validation("Material name is required".into()));
        }
        let quantity = parse_positive(&self.quantity, "Valid quantity is required")?;
        if self.unit.trim().is_empty() {
            return Err(CoreError::Validation("Unit is required".into()));
        }
        let price = parse_positive(&self.price, "Valid price amount is required")?;

        Ok(Material {
            name: self.name.trim().to_string(),
            quantity: RawAmount::Number(quantity),
            unit: self.unit.trim().to_string(),
            price: RawAmount::Number(price),
            supplier: self.supplier.trim().to_string(),
            date: self.date,
        })
    }
}

// ---------------------------------------------------------------------------
// View integration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSortKey {
    Name,
    Quantity,
    Price,
}

impl ViewRecord for Material {
    type SortKey = MaterialSortKey;

    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    fn sort_value(&self, key: MaterialSortKey) -> SortValue {
        match key {
            MaterialSortKey::Name => SortValue::Text(self.name.clone()),
            MaterialSortKey::Quantity => SortValue::Amount(self.quantity.sort_rank()),
            MaterialSortKey::Price => SortValue::Amount(self.price.sort_rank()),
        }
    }
}

/// Inventory filter. The threshold is shared with the summary so the
/// filtered view and the low-stock count always agree.
#[derive(Debug, Clone)]
pub struct MaterialFilter {
    pub low_stock_threshold: f64,
    pub low_stock_only: bool,
}

impl Default for MaterialFilter {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            low_stock_only: false,
        }
    }
}

impl RecordFilter<Material> for MaterialFilter {
    fn accept(&self, material: &Material) -> bool {
        !self.low_stock_only || material.is_low_stock(self.low_stock_threshold)
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSummary {
    pub total_items: usize,
    pub total_cost: f64,
    pub low_stock_count: usize,
}

/// Aggregate the full inventory, independent of any view filter.
pub fn summarize(materials: &[Keyed<Material>], low_stock_threshold: f64) -> MaterialSummary {
    MaterialSummary {
        total_items: materials.len(),
        total_cost: materials.iter().map(|m| m.record.line_total()).sum(),
        low_stock_count: materials
            .iter()
            .filter(|m| m.record.is_low_stock(low_stock_threshold))
            .count(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
