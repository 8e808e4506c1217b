use crate::{
    db::{Database, Patch},
    domain::{Debt, FlowType, Mode, Transaction},
};

use super::{today, validate_amount, ServiceError, ServiceResult};

pub const DEBT_PAYMENT_CATEGORY: &str = "Debts";

pub struct DebtService;

impl DebtService {
    /// Pays `amount` off a debt, never below zero, and optionally records the
    /// payment as a paid expense in `mode`.
    pub fn pay(
        db: &Database,
        debt_id: &str,
        amount: f64,
        record_expense: bool,
        mode: Mode,
    ) -> ServiceResult<Debt> {
        validate_amount(amount)?;
        let debt = db.debts().get_by_id(debt_id).ok_or_else(|| not_found(debt_id))?;
        let remaining = (debt.remaining_amount - amount).max(0.0);

        let updated = db
            .debts()
            .update(debt_id, &Patch::new().set("remainingAmount", remaining))
            .ok_or_else(|| not_found(debt_id))?;

        if record_expense {
            db.transactions().add(
                Transaction::new(
                    format!("Debt payment: {}", debt.name),
                    amount,
                    FlowType::Expense,
                    DEBT_PAYMENT_CATEGORY,
                    today(),
                )
                .with_mode(mode),
            );
        }
        tracing::debug!(debt = %debt.name, amount, remaining, "debt payment applied");
        Ok(updated)
    }

    pub fn total_remaining(debts: &[Debt]) -> f64 {
        debts.iter().map(|debt| debt.remaining_amount).sum()
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        kind: "Debt",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use tempfile::tempdir;

    fn database(dir: &std::path::Path) -> Database {
        Database::new(LocalStore::new(dir.to_path_buf()).unwrap(), None)
    }

    #[test]
    fn payment_floors_at_zero_and_records_expense() {
        let dir = tempdir().unwrap();
        let db = database(dir.path());
        let debt = db.debts().add(Debt::new("Car loan", 1000.0, "2025-12-01", 1.5));

        let paid = DebtService::pay(&db, &debt.id, 400.0, false, Mode::Personal).unwrap();
        assert_eq!(paid.remaining_amount, 600.0);
        assert!(db.transactions().get_all(None).is_empty());

        let paid = DebtService::pay(&db, &debt.id, 900.0, true, Mode::Business).unwrap();
        assert_eq!(paid.remaining_amount, 0.0);

        let recorded = db.transactions().get_all(Some(Mode::Business));
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].description, "Debt payment: Car loan");
        assert_eq!(recorded[0].category, DEBT_PAYMENT_CATEGORY);
        assert_eq!(recorded[0].amount, 900.0);
        assert!(recorded[0].is_paid());
    }

    #[test]
    fn rejects_bad_amounts_and_unknown_debts() {
        let dir = tempdir().unwrap();
        let db = database(dir.path());
        assert!(matches!(
            DebtService::pay(&db, "nope", 10.0, false, Mode::Personal),
            Err(ServiceError::NotFound { kind: "Debt", .. })
        ));
        let debt = db.debts().add(Debt::new("Card", 100.0, "", 0.0));
        assert!(matches!(
            DebtService::pay(&db, &debt.id, -1.0, false, Mode::Personal),
            Err(ServiceError::Invalid(_))
        ));
    }

    #[test]
    fn total_remaining_sums_debts() {
        let mut paid_off = Debt::new("b", 50.0, "", 0.0);
        paid_off.remaining_amount = 0.0;
        assert_eq!(
            DebtService::total_remaining(&[Debt::new("a", 120.0, "", 0.0), paid_off]),
            120.0
        );
    }
}
