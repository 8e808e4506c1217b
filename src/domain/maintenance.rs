use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, Mode};

/// A recurring vehicle service item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Vehicle system the item belongs to (engine, brakes, ...).
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub status: MaintenanceStatus,
    /// Free text such as "500 km" or "2 weeks".
    #[serde(default)]
    pub due_in: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl MaintenanceItem {
    pub fn new(name: impl Into<String>, system: impl Into<String>, due_in: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            system: system.into(),
            status: MaintenanceStatus::Pending,
            due_in: due_in.into(),
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl_record!(MaintenanceItem, EntityKind::MaintenanceItem);

impl Displayable for MaintenanceItem {
    fn display_label(&self) -> String {
        format!(
            "{} ({}) - {}, due in {}",
            self.name, self.system, self.status, self.due_in
        )
    }
}

/// Stored with the labels the `maintenance_items.status` check constraint allows.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum MaintenanceStatus {
    #[serde(rename = "Atrasada", alias = "Overdue")]
    Overdue,
    #[default]
    #[serde(rename = "Pendente", alias = "Pending")]
    Pending,
    #[serde(rename = "Em Dia", alias = "UpToDate")]
    UpToDate,
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaintenanceStatus::Overdue => "overdue",
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::UpToDate => "up to date",
        })
    }
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overdue" => Ok(MaintenanceStatus::Overdue),
            "pending" => Ok(MaintenanceStatus::Pending),
            "uptodate" | "up-to-date" | "done" => Ok(MaintenanceStatus::UpToDate),
            other => Err(format!(
                "unknown status `{other}` (expected overdue, pending or uptodate)"
            )),
        }
    }
}
