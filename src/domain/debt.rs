use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, Mode};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub remaining_amount: f64,
    #[serde(default)]
    pub due_date: String,
    /// Monthly rate in percent.
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
}

impl Debt {
    /// A new debt starts with nothing paid off.
    pub fn new(
        name: impl Into<String>,
        total_amount: f64,
        due_date: impl Into<String>,
        interest_rate: f64,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            total_amount,
            remaining_amount: total_amount,
            due_date: due_date.into(),
            interest_rate,
            mode: None,
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn paid_amount(&self) -> f64 {
        (self.total_amount - self.remaining_amount).max(0.0)
    }
}

impl_record!(Debt, EntityKind::Debt);

impl Displayable for Debt {
    fn display_label(&self) -> String {
        format!(
            "{}: {:.2} of {:.2} left, due {} ({:.2}% a.m.)",
            self.name, self.remaining_amount, self.total_amount, self.due_date, self.interest_rate
        )
    }
}
