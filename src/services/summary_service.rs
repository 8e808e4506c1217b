use std::fmt;

use serde::Serialize;

use crate::domain::{FlowType, Transaction, TransactionStatus};

/// How comfortably income covers expenses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum HealthScore {
    #[default]
    NoData,
    Critical,
    Good,
    Excellent,
}

impl HealthScore {
    /// Excellent above a 20% margin, critical when spending exceeds income.
    pub fn from_totals(income: f64, expenses: f64) -> Self {
        if income == 0.0 && expenses == 0.0 {
            HealthScore::NoData
        } else if expenses > income {
            HealthScore::Critical
        } else if (income - expenses) / income > 0.2 {
            HealthScore::Excellent
        } else {
            HealthScore::Good
        }
    }
}

impl fmt::Display for HealthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HealthScore::NoData => "no data",
            HealthScore::Critical => "critical",
            HealthScore::Good => "good",
            HealthScore::Excellent => "excellent",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    pub pending_expenses: f64,
    pub health: HealthScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

const INCOME_SHARES: [f64; 4] = [0.2, 0.3, 0.1, 0.4];
const EXPENSE_SHARES: [f64; 4] = [0.25, 0.15, 0.4, 0.2];

pub struct SummaryService;

impl SummaryService {
    /// Totals over paid transactions; pending expenses are reported apart.
    pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
        let mut summary = FinancialSummary::default();
        for txn in transactions {
            match (txn.kind, txn.status) {
                (FlowType::Income, TransactionStatus::Paid) => summary.income += txn.amount,
                (FlowType::Expense, TransactionStatus::Paid) => summary.expenses += txn.amount,
                (FlowType::Expense, TransactionStatus::Pending) => {
                    summary.pending_expenses += txn.amount
                }
                (FlowType::Income, TransactionStatus::Pending) => {}
            }
        }
        summary.balance = summary.income - summary.expenses;
        summary.health = HealthScore::from_totals(summary.income, summary.expenses);
        summary
    }

    /// Splits the period totals over four weeks with fixed shares.
    pub fn weekly_breakdown(summary: &FinancialSummary) -> Vec<WeeklyBucket> {
        INCOME_SHARES
            .iter()
            .zip(EXPENSE_SHARES.iter())
            .enumerate()
            .map(|(week, (income_share, expense_share))| WeeklyBucket {
                label: format!("Week {}", week + 1),
                income: summary.income * income_share,
                expenses: summary.expenses * expense_share,
            })
            .collect()
    }
}
