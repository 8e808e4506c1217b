use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, Mode};

/// A pantry or supply item with a target stock level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub ideal_qty: f64,
    #[serde(default)]
    pub current_qty: f64,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl ShoppingItem {
    /// New items start out of stock.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
        ideal_qty: f64,
        price: f64,
    ) -> Self {
        Self {
            id: String::new(),
            category: category.into(),
            name: name.into(),
            unit: unit.into(),
            ideal_qty,
            current_qty: 0.0,
            price,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn missing_qty(&self) -> f64 {
        (self.ideal_qty - self.current_qty).max(0.0)
    }
}

impl_record!(ShoppingItem, EntityKind::ShoppingItem);

impl Displayable for ShoppingItem {
    fn display_label(&self) -> String {
        format!(
            "{} [{}]: {}/{} {} @ {:.2}",
            self.name, self.category, self.current_qty, self.ideal_qty, self.unit, self.price
        )
    }
}
