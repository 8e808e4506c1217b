mod common;

use std::sync::Arc;

use common::{local_database, remote_database, MemoryTables};
use gerencie::{
    domain::{Debt, FlowType, Goal, MaintenanceItem, MaintenanceStatus, Mode, ShoppingItem, Transaction, TransactionStatus},
    services::{
        DebtService, GoalService, HealthScore, MaintenanceService, ServiceError, ShoppingService,
        SummaryService, TransactionService,
    },
};
use serde_json::json;

#[test]
fn debt_payment_over_remote_records_expense() {
    let tables = Arc::new(MemoryTables::default());
    let db = remote_database(tables.clone());
    let debt = db
        .debts()
        .add(Debt::new("Loan", 1200.0, "2025-08-01", 1.5).with_mode(Mode::Business));

    let updated = DebtService::pay(&db, &debt.id, 200.0, true, Mode::Business).unwrap();
    assert_eq!(updated.remaining_amount, 1000.0);
    assert_eq!(tables.rows("debts")[0]["remaining_amount"], json!(1000.0));

    let expenses = db.transactions().get_all(Some(Mode::Business));
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].description, "Debt payment: Loan");
    assert_eq!(expenses[0].kind, FlowType::Expense);
    assert_eq!(tables.rows("transactions")[0]["category"], json!("Debts"));
}

#[test]
fn overpaying_a_debt_stops_at_zero() {
    let db = local_database();
    let debt = db.debts().add(Debt::new("Card", 100.0, "2025-05-10", 9.0));
    let updated = DebtService::pay(&db, &debt.id, 150.0, false, Mode::Personal).unwrap();
    assert_eq!(updated.remaining_amount, 0.0);
    assert!(db.transactions().get_all(None).is_empty());
}

#[test]
fn paying_an_unknown_debt_is_not_found() {
    let db = local_database();
    let err = DebtService::pay(&db, "nope", 10.0, false, Mode::Personal).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn goal_deposits_accumulate() {
    let tables = Arc::new(MemoryTables::default());
    let db = remote_database(tables);
    let goal = db.goals().add(Goal::new("Emergency fund", 1000.0, "2025-12-31"));

    GoalService::deposit(&db, &goal.id, 300.0, false, Mode::Personal).unwrap();
    let updated = GoalService::deposit(&db, &goal.id, 200.0, true, Mode::Personal).unwrap();
    assert_eq!(updated.current_amount, 500.0);
    assert!((GoalService::progress(&updated) - 0.5).abs() < 1e-9);

    let recorded = db.transactions().get_all(Some(Mode::Personal));
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].amount, 200.0);
    assert_eq!(recorded[0].category, "Investment");
}

#[test]
fn deposits_must_be_positive() {
    let db = local_database();
    let goal = db.goals().add(Goal::new("Trip", 500.0, ""));
    assert!(matches!(
        GoalService::deposit(&db, &goal.id, 0.0, false, Mode::Personal),
        Err(ServiceError::Invalid(_))
    ));
}

#[test]
fn shopping_stock_adjusts_and_prices_the_restock() {
    let tables = Arc::new(MemoryTables::default());
    let db = remote_database(tables);
    let rice = db
        .shopping()
        .add(ShoppingItem::new("Rice", "Pantry", "kg", 5.0, 6.0));

    let stocked = ShoppingService::adjust(&db, &rice.id, 3.0).unwrap();
    assert_eq!(stocked.current_qty, 3.0);
    let emptied = ShoppingService::adjust(&db, &rice.id, -10.0).unwrap();
    assert_eq!(emptied.current_qty, 0.0);

    ShoppingService::adjust(&db, &rice.id, 4.0).unwrap();
    let items = db.shopping().get_all(None);
    assert!((ShoppingService::restock_cost(&items) - 6.0).abs() < 1e-9);
}

#[test]
fn completing_maintenance_marks_it_up_to_date() {
    let db = local_database();
    let filter = db
        .maintenance()
        .add(MaintenanceItem::new("Air filter", "HVAC", "2 weeks"));

    let done = MaintenanceService::complete(&db, &filter.id).unwrap();
    assert_eq!(done.status, MaintenanceStatus::UpToDate);
    assert_eq!(done.due_in, "Just serviced");
    assert!(MaintenanceService::complete(&db, "missing").is_err());
}

#[test]
fn toggling_status_feeds_the_dashboard() {
    let db = local_database();
    db.transactions().add(
        Transaction::new("Salary", 2000.0, FlowType::Income, "Salary", "2025-03-01")
            .with_mode(Mode::Personal),
    );
    let rent = db.transactions().add(
        Transaction::new("Rent", 900.0, FlowType::Expense, "Home", "2025-03-05")
            .with_status(TransactionStatus::Pending)
            .with_mode(Mode::Personal),
    );

    let before = SummaryService::summarize(&db.transactions().get_all(Some(Mode::Personal)));
    assert_eq!(before.expenses, 0.0);
    assert_eq!(before.pending_expenses, 900.0);
    assert_eq!(before.health, HealthScore::Excellent);

    let toggled = TransactionService::toggle_status(&db, &rent.id).unwrap();
    assert!(toggled.is_paid());

    let after = SummaryService::summarize(&db.transactions().get_all(Some(Mode::Personal)));
    assert_eq!(after.expenses, 900.0);
    assert_eq!(after.balance, 1100.0);
    assert_eq!(after.pending_expenses, 0.0);
}
