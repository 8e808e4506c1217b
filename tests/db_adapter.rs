mod common;

use std::sync::Arc;

use common::{local_database, remote_database, FailingTables, MemoryTables};
use gerencie::{
    db::{ChangeAction, ChangeEvent, ConnectionStatus, Patch, ResetOutcome},
    domain::{
        Debt, EntityKind, FlowType, Goal, MaintenanceItem, MaintenanceStatus, Mode, ShoppingItem,
        Transaction,
    },
    services::MaintenanceService,
    storage::TableClient,
};
use serde_json::{json, Value};

fn salary() -> Transaction {
    Transaction::new("Salary", 3200.0, FlowType::Income, "Salary", "2025-03-01")
        .with_mode(Mode::Personal)
}

#[test]
fn local_round_trip_assigns_fresh_ids() {
    let db = local_database();
    let mut draft = salary();
    draft.id = "client-chosen".into();

    let stored = db.transactions().add(draft);
    assert_ne!(stored.id, "client-chosen");
    assert!(!stored.id.is_empty());

    let fetched = db.transactions().get_by_id(&stored.id).unwrap();
    assert_eq!(fetched, stored);
}

#[test]
fn local_reads_filter_by_mode() {
    let db = local_database();
    db.transactions().add(salary());
    db.transactions().add(
        Transaction::new("Invoice", 900.0, FlowType::Income, "Sales", "2025-03-02")
            .with_mode(Mode::Business),
    );

    assert_eq!(db.transactions().get_all(None).len(), 2);
    let business = db.transactions().get_all(Some(Mode::Business));
    assert_eq!(business.len(), 1);
    assert_eq!(business[0].description, "Invoice");
}

#[test]
fn unknown_local_update_returns_none_without_notifying() {
    let db = local_database();
    let rx = db.subscribe();
    assert!(db
        .goals()
        .update("missing", &Patch::new().set("currentAmount", 10.0))
        .is_none());
    assert!(rx.try_recv().is_err());
}

#[test]
fn local_update_merges_fields_and_keeps_id() {
    let db = local_database();
    let goal = db.goals().add(Goal::new("Trip", 1000.0, "2025-12-01"));
    let updated = db
        .goals()
        .update(
            &goal.id,
            &Patch::new().set("currentAmount", 250.0).set("id", "hijack"),
        )
        .unwrap();
    assert_eq!(updated.id, goal.id);
    assert_eq!(updated.current_amount, 250.0);
    assert_eq!(updated.name, "Trip");
}

#[test]
fn remote_rows_are_translated_both_ways() {
    let tables = Arc::new(MemoryTables::default());
    let client: Arc<dyn TableClient> = tables.clone();
    let db = remote_database(client);

    let stored = db.debts().add(Debt::new("Car", 5000.0, "2026-01-10", 1.2).with_mode(Mode::Business));

    let sent = tables.inserted.lock().unwrap()[0].clone();
    assert!(sent.get("id").is_none(), "id must not be sent on insert");
    assert_eq!(sent["total_amount"], json!(5000.0));
    assert_eq!(sent["remaining_amount"], json!(5000.0));
    assert!(sent.get("totalAmount").is_none());

    assert_eq!(stored.id, "1");
    assert_eq!(stored.total_amount, 5000.0);

    let listed = db.debts().get_all(Some(Mode::Business));
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].due_date, "2026-01-10");
    assert!(db.debts().get_all(Some(Mode::Personal)).is_empty());

    let updated = db
        .debts()
        .update(&stored.id, &Patch::new().set("remainingAmount", 4000.0))
        .unwrap();
    assert_eq!(updated.remaining_amount, 4000.0);
    assert_eq!(tables.rows("debts")[0]["remaining_amount"], json!(4000.0));
}

#[test]
fn remote_nulls_are_dropped_before_sending() {
    let tables = Arc::new(MemoryTables::default());
    let db = remote_database(tables.clone());

    db.goals().add(Goal::new("Bike", 800.0, ""));
    let sent = tables.inserted.lock().unwrap()[0].clone();
    assert!(sent.values().all(|value| !value.is_null()));
    assert!(sent.get("icon").is_none());
}

#[test]
fn seeded_snake_case_rows_decode() {
    let tables = Arc::new(MemoryTables::default());
    tables.seed(
        "transactions",
        json!({
            "id": 7,
            "description": "Fuel",
            "category": "Transport",
            "date": "2025-03-03",
            "amount": 60.0,
            "type": "expense",
            "status": "pending",
            "mode": "Personal",
            "attachment_type": "image"
        }),
    );
    let db = remote_database(tables);

    let txn = db.transactions().get_by_id("7").unwrap();
    assert_eq!(txn.description, "Fuel");
    assert!(!txn.is_paid());
    assert!(txn.attachment_type.is_some());
}

#[test]
fn failing_remote_falls_back_to_local_and_still_notifies() {
    let db = remote_database(Arc::new(FailingTables::offline()));
    let rx = db.subscribe();

    let stored = db.transactions().add(salary());
    assert!(!stored.id.is_empty());
    assert_eq!(
        rx.try_recv().unwrap(),
        ChangeEvent::entity(EntityKind::Transaction, ChangeAction::Added)
    );

    let local = db.local().read(EntityKind::Transaction);
    assert_eq!(local.len(), 1);
    assert_eq!(local[0]["amount"], json!(3200.0));

    assert_eq!(db.transactions().get_all(Some(Mode::Personal)).len(), 1);
    assert_eq!(db.transactions().get_by_id(&stored.id).unwrap().id, stored.id);

    let updated = db
        .transactions()
        .update(&stored.id, &Patch::new().set("status", "pending"))
        .unwrap();
    assert!(!updated.is_paid());
    assert_eq!(rx.try_recv().unwrap().action, ChangeAction::Updated);

    assert!(db.transactions().delete(&stored.id));
    assert_eq!(rx.try_recv().unwrap().action, ChangeAction::Deleted);
    assert!(db.transactions().get_all(None).is_empty());
}

#[test]
fn local_records_keep_camel_case_fields() {
    let db = local_database();
    db.debts().add(Debt::new("Card", 300.0, "2025-04-10", 9.9));
    let raw = db.local().read(EntityKind::Debt);
    let object = raw[0].as_object().unwrap();
    assert!(object.contains_key("remainingAmount"));
    assert!(object.contains_key("interestRate"));
    assert!(matches!(object.get("id"), Some(Value::String(_))));
}

#[test]
fn init_reports_backend_state_and_notifies() {
    let db = local_database();
    let rx = db.subscribe();
    assert_eq!(db.init(), ConnectionStatus::LocalOnly);
    assert_eq!(rx.try_recv().unwrap(), ChangeEvent::initialized());

    let missing = remote_database(Arc::new(FailingTables {
        status: 404,
        code: Some("42P01"),
    }));
    assert_eq!(missing.init(), ConnectionStatus::MissingTables);

    let unauthorized = remote_database(Arc::new(FailingTables {
        status: 401,
        code: None,
    }));
    assert_eq!(unauthorized.init(), ConnectionStatus::Unauthorized);

    let healthy = remote_database(Arc::new(MemoryTables::default()));
    assert_eq!(healthy.init(), ConnectionStatus::Connected);
}

#[test]
fn reset_never_touches_a_configured_remote() {
    let remote = remote_database(Arc::new(FailingTables::offline()));
    remote.transactions().add(salary());
    assert_eq!(remote.reset().unwrap(), ResetOutcome::RemoteUntouched);
    assert_eq!(remote.local().read(EntityKind::Transaction).len(), 1);

    let local = local_database();
    local.transactions().add(salary());
    local.goals().add(Goal::new("Bike", 800.0, ""));
    assert_eq!(local.reset().unwrap(), ResetOutcome::LocalCleared(2));
    assert!(local.transactions().get_all(None).is_empty());
}

#[test]
fn rows_in_the_hosted_schema_labels_are_listed_and_written() {
    let tables = Arc::new(MemoryTables::default());
    tables.seed(
        "maintenance_items",
        json!({
            "id": 3,
            "name": "Brake pads",
            "system": "Brakes",
            "status": "Pendente",
            "due_in": "1000 km",
            "mode": "Pessoal"
        }),
    );
    let db = remote_database(tables.clone());

    let personal = db.maintenance().get_all(Some(Mode::Personal));
    assert_eq!(personal.len(), 1);
    assert_eq!(personal[0].status, MaintenanceStatus::Pending);
    assert!(db.maintenance().get_all(Some(Mode::Business)).is_empty());

    db.maintenance()
        .add(MaintenanceItem::new("Oil change", "Engine", "500 km").with_mode(Mode::Business));
    let sent = tables.inserted.lock().unwrap()[0].clone();
    assert_eq!(sent["mode"], json!("Empresarial"));
    assert_eq!(sent["status"], json!("Pendente"));
    assert_eq!(db.maintenance().get_all(Some(Mode::Business)).len(), 1);

    MaintenanceService::complete(&db, "3").unwrap();
    assert_eq!(tables.rows("maintenance_items")[0]["status"], json!("Em Dia"));
}

#[test]
fn null_columns_decode_to_defaults() {
    let tables = Arc::new(MemoryTables::default());
    tables.seed(
        "transactions",
        json!({
            "id": 1,
            "description": "Parking",
            "category": null,
            "amount": 12.0,
            "type": "expense",
            "status": "paid",
            "date": "2025-03-04",
            "mode": "Pessoal",
            "attachment": null,
            "attachment_type": null
        }),
    );
    tables.seed(
        "shopping_items",
        json!({
            "id": 2,
            "name": "Soap",
            "category": null,
            "unit": null,
            "ideal_qty": 3,
            "current_qty": 1,
            "price": 2.5,
            "mode": "Pessoal"
        }),
    );
    let db = remote_database(tables);

    let transactions = db.transactions().get_all(Some(Mode::Personal));
    assert_eq!(transactions.len(), 1);
    assert!(transactions[0].category.is_empty());
    assert!(transactions[0].attachment.is_none());

    let shopping: Vec<ShoppingItem> = db.shopping().get_all(None);
    assert_eq!(shopping.len(), 1);
    assert_eq!(shopping[0].name, "Soap");

    let updated = db
        .shopping()
        .update("2", &Patch::new().set("currentQty", 3.0))
        .unwrap();
    assert_eq!(updated.current_qty, 3.0);
}

#[test]
fn successful_remote_update_is_not_repeated_locally() {
    let tables = Arc::new(MemoryTables::default());
    tables.seed(
        "debts",
        json!({ "id": 9, "name": "Loan", "total_amount": "unknown" }),
    );
    let db = remote_database(tables.clone());
    db.local().write(
        EntityKind::Debt,
        &[json!({ "id": "9", "name": "Stale", "totalAmount": 10.0, "remainingAmount": 10.0 })],
    );
    let rx = db.subscribe();

    let result = db
        .debts()
        .update("9", &Patch::new().set("remainingAmount", 0.0));
    assert!(result.is_none());
    assert_eq!(rx.try_recv().unwrap().action, ChangeAction::Updated);
    assert_eq!(tables.rows("debts")[0]["remaining_amount"], json!(0.0));
    assert_eq!(
        db.local().read(EntityKind::Debt)[0]["remainingAmount"],
        json!(10.0)
    );
}
