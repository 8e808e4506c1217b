use crate::{
    db::{Database, Patch},
    domain::{FlowType, Goal, Mode, Transaction},
};

use super::{today, validate_amount, ServiceError, ServiceResult};

pub const GOAL_DEPOSIT_CATEGORY: &str = "Investment";

pub struct GoalService;

impl GoalService {
    /// Adds `amount` to a goal, optionally recording it as a paid expense.
    pub fn deposit(
        db: &Database,
        goal_id: &str,
        amount: f64,
        record_expense: bool,
        mode: Mode,
    ) -> ServiceResult<Goal> {
        validate_amount(amount)?;
        let goal = db.goals().get_by_id(goal_id).ok_or_else(|| not_found(goal_id))?;
        let current = goal.current_amount + amount;

        let updated = db
            .goals()
            .update(goal_id, &Patch::new().set("currentAmount", current))
            .ok_or_else(|| not_found(goal_id))?;

        if record_expense {
            db.transactions().add(
                Transaction::new(
                    format!("Goal deposit: {}", goal.name),
                    amount,
                    FlowType::Expense,
                    GOAL_DEPOSIT_CATEGORY,
                    today(),
                )
                .with_mode(mode),
            );
        }
        Ok(updated)
    }

    /// Fraction of the target reached, clamped to `0..=1`.
    pub fn progress(goal: &Goal) -> f64 {
        if goal.target_amount <= 0.0 {
            return 0.0;
        }
        (goal.current_amount / goal.target_amount).clamp(0.0, 1.0)
    }
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound {
        kind: "Goal",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStore;
    use tempfile::tempdir;

    #[test]
    fn deposit_accumulates_and_records() {
        let dir = tempdir().unwrap();
        let db = Database::new(LocalStore::new(dir.path().to_path_buf()).unwrap(), None);
        let goal = db.goals().add(Goal::new("Trip", 2000.0, "2026-01-01"));

        GoalService::deposit(&db, &goal.id, 500.0, false, Mode::Personal).unwrap();
        let updated = GoalService::deposit(&db, &goal.id, 250.0, true, Mode::Personal).unwrap();
        assert_eq!(updated.current_amount, 750.0);
        assert_eq!(GoalService::progress(&updated), 0.375);

        let recorded = db.transactions().get_all(Some(Mode::Personal));
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].description, "Goal deposit: Trip");
        assert_eq!(recorded[0].category, GOAL_DEPOSIT_CATEGORY);
        assert_eq!(recorded[0].kind, FlowType::Expense);
    }

    #[test]
    fn progress_is_clamped() {
        let mut goal = Goal::new("Done", 100.0, "");
        goal.current_amount = 150.0;
        assert_eq!(GoalService::progress(&goal), 1.0);
        assert_eq!(GoalService::progress(&Goal::new("Zero", 0.0, "")), 0.0);
    }

    #[test]
    fn unknown_goal_is_not_found() {
        let dir = tempdir().unwrap();
        let db = Database::new(LocalStore::new(dir.path().to_path_buf()).unwrap(), None);
        assert!(matches!(
            GoalService::deposit(&db, "missing", 5.0, false, Mode::Personal),
            Err(ServiceError::NotFound { kind: "Goal", .. })
        ));
    }
}
