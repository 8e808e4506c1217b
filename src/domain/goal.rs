use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, Mode};

/// A savings target tracked by deposits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub deadline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64, deadline: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline: deadline.into(),
            icon: None,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }
}

impl_record!(Goal, EntityKind::Goal);

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!(
            "{}: {:.2} / {:.2} by {}",
            self.name, self.current_amount, self.target_amount, self.deadline
        )
    }
}
