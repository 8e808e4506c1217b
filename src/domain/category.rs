//! Budget categories matched to transactions by name.

use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, FlowType, Mode};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<FlowType>,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub spent: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: Option<FlowType>, budget: f64) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            kind,
            budget,
            spent: 0.0,
            color: DEFAULT_COLOR.into(),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Untyped categories count as expense categories.
    pub fn is_expense(&self) -> bool {
        self.kind.map_or(true, |kind| kind == FlowType::Expense)
    }

    pub fn matches_name(&self, other: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.trim())
    }
}

pub const DEFAULT_COLOR: &str = "#ef4444";

impl_record!(Category, EntityKind::Category);

impl Displayable for Category {
    fn display_label(&self) -> String {
        match self.kind {
            Some(kind) => format!("{} ({kind})", self.name),
            None => self.name.clone(),
        }
    }
}
