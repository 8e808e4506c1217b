//! Shared traits and enums for the tracked finance entities.

use std::{fmt, str::FromStr};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Which book a record belongs to. Used purely as a filter value.
///
/// Stored records carry the hosted schema's labels (`Pessoal`, `Empresarial`);
/// the English names are accepted on read and used for display.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    #[serde(rename = "Pessoal", alias = "Personal")]
    Personal,
    #[serde(rename = "Empresarial", alias = "Business")]
    Business,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Personal => "Personal",
            Mode::Business => "Business",
        }
    }

    /// Value of the `mode` column, as written and filtered on.
    pub fn stored_label(self) -> &'static str {
        match self {
            Mode::Personal => "Pessoal",
            Mode::Business => "Empresarial",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personal" | "pessoal" | "p" => Ok(Mode::Personal),
            "business" | "empresarial" | "b" => Ok(Mode::Business),
            other => Err(format!("unknown mode `{other}` (expected personal or business)")),
        }
    }
}

/// The six record categories the adapter manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Transaction,
    Category,
    Debt,
    Goal,
    ShoppingItem,
    MaintenanceItem,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Transaction,
        EntityKind::Category,
        EntityKind::Debt,
        EntityKind::Goal,
        EntityKind::ShoppingItem,
        EntityKind::MaintenanceItem,
    ];

    /// Key under which the local store keeps this kind's records (before prefixing).
    pub fn local_key(self) -> &'static str {
        match self {
            EntityKind::Transaction => "transactions",
            EntityKind::Category => "categories",
            EntityKind::Debt => "debts",
            EntityKind::Goal => "goals",
            EntityKind::ShoppingItem => "shopping",
            EntityKind::MaintenanceItem => "maintenance",
        }
    }

    /// Table holding this kind in the hosted backend.
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Transaction => "transactions",
            EntityKind::Category => "categories",
            EntityKind::Debt => "debts",
            EntityKind::Goal => "goals",
            EntityKind::ShoppingItem => "shopping_items",
            EntityKind::MaintenanceItem => "maintenance_items",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Transaction => "transaction",
            EntityKind::Category => "category",
            EntityKind::Debt => "debt",
            EntityKind::Goal => "goal",
            EntityKind::ShoppingItem => "shopping item",
            EntityKind::MaintenanceItem => "maintenance item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A flat record the data-access adapter can store in either backend.
///
/// Records serialize with camelCase field names; the remote store sees the
/// snake_case translation.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn mode(&self) -> Option<Mode>;
}

/// Converts an entity into a one-line, user-facing label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Income or expense, shared by transactions and categories.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    Income,
    Expense,
}

impl fmt::Display for FlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FlowType::Income => "income",
            FlowType::Expense => "expense",
        })
    }
}

impl FromStr for FlowType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(FlowType::Income),
            "expense" | "out" => Ok(FlowType::Expense),
            other => Err(format!("unknown type `{other}` (expected income or expense)")),
        }
    }
}

/// Implements [`Record`] for a struct with `id: String` and `mode: Option<Mode>` fields.
macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl $crate::domain::common::Record for $ty {
            const KIND: $crate::domain::common::EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn mode(&self) -> Option<$crate::domain::common::Mode> {
                self.mode
            }
        }
    };
}

pub(crate) use impl_record;
