//! DDL for the hosted tables, printed by `db schema`.

/// Creates every table the adapter reads and writes. Column names are the
/// snake_case forms of the record fields; check constraints list the stored
/// enum labels.
pub const SCHEMA_SQL: &str = r#"create extension if not exists "uuid-ossp";

create table if not exists transactions (
  id uuid default uuid_generate_v4() primary key,
  description text not null,
  category text,
  amount numeric not null,
  type text check (type in ('income', 'expense')),
  status text check (status in ('paid', 'pending')),
  date date not null,
  mode text default 'Pessoal',
  attachment text,
  attachment_type text,
  created_at timestamp with time zone default timezone('utc'::text, now())
);

create table if not exists categories (
  id uuid default uuid_generate_v4() primary key,
  name text not null,
  type text check (type in ('income', 'expense')),
  budget numeric default 0,
  spent numeric default 0,
  color text,
  mode text default 'Pessoal'
);

create table if not exists debts (
  id uuid default uuid_generate_v4() primary key,
  name text not null,
  total_amount numeric,
  remaining_amount numeric,
  due_date date,
  interest_rate numeric,
  mode text default 'Pessoal'
);

create table if not exists goals (
  id uuid default uuid_generate_v4() primary key,
  name text not null,
  target_amount numeric,
  current_amount numeric,
  deadline date,
  icon text,
  mode text default 'Pessoal'
);

create table if not exists shopping_items (
  id uuid default uuid_generate_v4() primary key,
  name text not null,
  category text,
  unit text,
  ideal_qty numeric,
  current_qty numeric,
  price numeric,
  mode text default 'Pessoal'
);

create table if not exists maintenance_items (
  id uuid default uuid_generate_v4() primary key,
  name text not null,
  system text,
  status text check (status in ('Atrasada', 'Pendente', 'Em Dia')),
  due_in text,
  mode text default 'Pessoal'
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{
            Category, Debt, EntityKind, FlowType, Goal, MaintenanceItem, MaintenanceStatus, Mode,
            ShoppingItem, Transaction, TransactionStatus,
        },
        storage::case,
    };
    use serde::Serialize;

    fn columns_of(table: &str) -> Vec<String> {
        let start = SCHEMA_SQL
            .find(&format!("create table if not exists {table} ("))
            .unwrap();
        let body = &SCHEMA_SQL[start..];
        let body = &body[body.find('(').unwrap() + 1..body.find("\n);").unwrap()];
        body.lines()
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    fn assert_fits<T: Serialize>(kind: EntityKind, record: &T) {
        let columns = columns_of(kind.table_name());
        let row = case::to_remote(&serde_json::to_value(record).unwrap());
        for key in row.as_object().unwrap().keys() {
            assert!(
                columns.contains(key),
                "{} has no `{key}` column",
                kind.table_name()
            );
        }
    }

    #[test]
    fn every_table_is_created() {
        for kind in EntityKind::ALL {
            assert!(SCHEMA_SQL.contains(&format!("create table if not exists {} (", kind.table_name())));
        }
    }

    #[test]
    fn encoded_records_fit_their_tables() {
        let txn = Transaction::new("Fuel", 60.0, FlowType::Expense, "Transport", "2025-03-03")
            .with_mode(Mode::Business);
        assert_fits(EntityKind::Transaction, &txn);
        assert_fits(EntityKind::Category, &Category::new("Food", Some(FlowType::Expense), 300.0));
        assert_fits(EntityKind::Debt, &Debt::new("Loan", 1000.0, "2025-08-01", 1.5));
        assert_fits(EntityKind::Goal, &Goal::new("Bike", 800.0, "2025-12-01"));
        assert_fits(
            EntityKind::ShoppingItem,
            &ShoppingItem::new("Rice", "Pantry", "kg", 5.0, 6.0),
        );
        assert_fits(
            EntityKind::MaintenanceItem,
            &MaintenanceItem::new("Oil change", "Engine", "500 km").with_mode(Mode::Personal),
        );
    }

    #[test]
    fn check_constraints_match_stored_labels() {
        let quoted = |value: serde_json::Value| format!("'{}'", value.as_str().unwrap());
        for status in [
            MaintenanceStatus::Overdue,
            MaintenanceStatus::Pending,
            MaintenanceStatus::UpToDate,
        ] {
            assert!(SCHEMA_SQL.contains(&quoted(serde_json::to_value(status).unwrap())));
        }
        for status in [TransactionStatus::Paid, TransactionStatus::Pending] {
            assert!(SCHEMA_SQL.contains(&quoted(serde_json::to_value(status).unwrap())));
        }
        assert!(SCHEMA_SQL.contains(&format!("mode text default '{}'", Mode::Personal.stored_label())));
    }
}
