//! Workflows layered on the data-access adapter: dashboard figures, payments,
//! deposits, stock adjustments and status changes.

pub mod category_service;
pub mod debt_service;
pub mod goal_service;
pub mod maintenance_service;
pub mod shopping_service;
pub mod summary_service;
pub mod transaction_service;

pub use category_service::{CategoryService, CategorySpending};
pub use debt_service::DebtService;
pub use goal_service::GoalService;
pub use maintenance_service::MaintenanceService;
pub use shopping_service::ShoppingService;
pub use summary_service::{FinancialSummary, HealthScore, SummaryService, WeeklyBucket};
pub use transaction_service::{TransactionFilter, TransactionService};

pub use crate::errors::ServiceError;

use chrono::Local;
use serde::Serialize;
use serde_json::Value;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Payments and deposits must be finite and strictly positive.
fn validate_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ServiceError::Invalid(format!(
            "Amount must be a positive number, got {amount}"
        )));
    }
    Ok(())
}

fn encoded(value: impl Serialize) -> ServiceResult<Value> {
    serde_json::to_value(value).map_err(|err| ServiceError::Invalid(err.to_string()))
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_must_be_positive_and_finite() {
        assert!(validate_amount(10.0).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(validate_amount(bad), Err(ServiceError::Invalid(_))));
        }
    }
}
