//! Interactive data-entry forms for the commands that accept a bare `add`.

use chrono::{Local, NaiveDate};
use dialoguer::theme::ColorfulTheme;

use crate::{
    agent::prompt::CATEGORY_SUGGESTIONS,
    cli::{core::CommandError, io},
    domain::{FlowType, Mode, Transaction, TransactionStatus},
};

/// What the transaction form collected, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFormData {
    pub description: String,
    pub amount: f64,
    pub kind: FlowType,
    pub category: String,
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

impl TransactionFormData {
    pub fn into_transaction(self, mode: Mode) -> Transaction {
        Transaction::new(
            self.description,
            self.amount,
            self.kind,
            self.category,
            self.date.format("%Y-%m-%d").to_string(),
        )
        .with_status(self.status)
        .with_mode(mode)
    }
}

pub fn transaction_form(theme: &ColorfulTheme) -> Result<TransactionFormData, CommandError> {
    let description = io::prompt_text(theme, "Description")?;
    let amount = loop {
        let amount: f64 = io::prompt_parsed(theme, "Amount")?;
        if amount.is_finite() && amount > 0.0 {
            break amount;
        }
        io::print_warning("Amount must be greater than zero.");
    };
    let kind = match io::select_index(theme, "Type", &["Expense", "Income"])? {
        0 => FlowType::Expense,
        _ => FlowType::Income,
    };
    let category = io::select_index(theme, "Category", CATEGORY_SUGGESTIONS)?;
    let category = CATEGORY_SUGGESTIONS
        .get(category)
        .copied()
        .unwrap_or("Other")
        .to_string();
    let today = Local::now().date_naive();
    let date = loop {
        let raw = io::prompt_text_or(theme, "Date (YYYY-MM-DD)", &today.format("%Y-%m-%d").to_string())?;
        match parse_date(&raw) {
            Ok(date) => break date,
            Err(err) => io::print_warning(err),
        }
    };
    let status = match io::select_index(theme, "Status", &["Paid", "Pending"])? {
        0 => TransactionStatus::Paid,
        _ => TransactionStatus::Pending,
    };

    Ok(TransactionFormData {
        description,
        amount,
        kind,
        category,
        date,
        status,
    })
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", raw.trim()))
    })
}
