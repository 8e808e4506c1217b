use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{impl_record, Displayable, EntityKind, FlowType, Mode};

/// A single money movement in or out of the active book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Calendar date as `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: FlowType,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Receipt image or voice note as a `data:` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<AttachmentType>,
}

impl Transaction {
    /// Builds an unsaved transaction; the store assigns the id.
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        kind: FlowType,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            description: description.into(),
            category: category.into(),
            date: date.into(),
            amount,
            kind,
            status: TransactionStatus::Paid,
            mode: None,
            attachment: None,
            attachment_type: None,
        }
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_attachment(mut self, data_url: String, kind: AttachmentType) -> Self {
        self.attachment = Some(data_url);
        self.attachment_type = Some(kind);
        self
    }

    pub fn is_paid(&self) -> bool {
        self.status == TransactionStatus::Paid
    }
}

impl_record!(Transaction, EntityKind::Transaction);

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = match self.kind {
            FlowType::Income => '+',
            FlowType::Expense => '-',
        };
        format!(
            "{} {} {}{:.2} [{}] ({})",
            self.date, self.description, sign, self.amount, self.category, self.status
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Paid,
    Pending,
}

impl TransactionStatus {
    pub fn toggled(self) -> Self {
        match self {
            TransactionStatus::Paid => TransactionStatus::Pending,
            TransactionStatus::Pending => TransactionStatus::Paid,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransactionStatus::Paid => "paid",
            TransactionStatus::Pending => "pending",
        })
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paid" => Ok(TransactionStatus::Paid),
            "pending" => Ok(TransactionStatus::Pending),
            other => Err(format!("unknown status `{other}` (expected paid or pending)")),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentType {
    Image,
    Audio,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_and_type_key() {
        let txn = Transaction::new("Lunch", 12.5, FlowType::Expense, "Food", "2025-03-01")
            .with_attachment("data:image/png;base64,AA==".into(), AttachmentType::Image);
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], json!("expense"));
        assert_eq!(value["attachmentType"], json!("image"));
        assert_eq!(value["status"], json!("paid"));
        assert!(value.get("mode").is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let txn: Transaction = serde_json::from_value(json!({
            "description": "Salary",
            "amount": 1000.0,
            "type": "income"
        }))
        .unwrap();
        assert_eq!(txn.status, TransactionStatus::Paid);
        assert!(txn.id.is_empty());
        assert_eq!(txn.mode, None);
    }
}
