use serde::Serialize;

use crate::domain::{Category, FlowType, Transaction};

/// A category with what was actually spent under its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: Category,
    pub spent: f64,
    /// Share of the budget used; `None` without a budget.
    pub usage: Option<f64>,
}

impl CategorySpending {
    pub fn over_budget(&self) -> bool {
        self.usage.is_some_and(|usage| usage > 1.0)
    }
}

pub struct CategoryService;

impl CategoryService {
    /// Sums paid expenses per category, matching names case-insensitively.
    pub fn spending(categories: &[Category], transactions: &[Transaction]) -> Vec<CategorySpending> {
        categories
            .iter()
            .map(|category| {
                let spent: f64 = transactions
                    .iter()
                    .filter(|txn| {
                        txn.kind == FlowType::Expense
                            && txn.is_paid()
                            && category.matches_name(&txn.category)
                    })
                    .map(|txn| txn.amount)
                    .sum();
                let usage = (category.budget > 0.0).then(|| spent / category.budget);
                CategorySpending {
                    category: category.clone(),
                    spent,
                    usage,
                }
            })
            .collect()
    }
}
