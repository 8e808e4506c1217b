#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use gerencie::{
    agent::{GenerateRequest, LanguageModel},
    db::Database,
    errors::{AgentError, StoreError},
    storage::{LocalStore, Row, TableClient},
};
use once_cell::sync::Lazy;
use serde_json::Value;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn local_store() -> LocalStore {
    LocalStore::new(temp_dir().join("store")).expect("create local store")
}

/// A database with no hosted backend.
pub fn local_database() -> Database {
    Database::new(local_store(), None)
}

/// A database over `client`, plus its local store for fallback assertions.
pub fn remote_database(client: Arc<dyn TableClient>) -> Database {
    Database::new(local_store(), Some(client))
}

/// In-memory table store with numeric, server-assigned ids.
#[derive(Default)]
pub struct MemoryTables {
    tables: Mutex<HashMap<String, Vec<Row>>>,
    next_id: Mutex<u64>,
    pub inserted: Mutex<Vec<Row>>,
}

impl MemoryTables {
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn seed(&self, table: &str, row: Value) {
        let Value::Object(row) = row else {
            panic!("seed rows must be objects");
        };
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(row);
    }
}

fn matches_id(row: &Row, id: &str) -> bool {
    match row.get("id") {
        Some(Value::String(value)) => value == id,
        Some(Value::Number(value)) => value.to_string() == id,
        _ => false,
    }
}

impl TableClient for MemoryTables {
    fn select(&self, table: &str, filters: &[(&str, String)]) -> Result<Vec<Row>, StoreError> {
        Ok(self
            .rows(table)
            .into_iter()
            .filter(|row| {
                filters.iter().all(|(column, expected)| match row.get(*column) {
                    Some(Value::String(value)) => value == expected,
                    Some(Value::Number(value)) => &value.to_string() == expected,
                    _ => false,
                })
            })
            .collect())
    }

    fn insert(&self, table: &str, row: &Row) -> Result<Row, StoreError> {
        self.inserted.lock().unwrap().push(row.clone());
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let mut stored = row.clone();
        stored.insert("id".into(), Value::from(*next));
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    fn update(&self, table: &str, id: &str, row: &Row) -> Result<Row, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let existing = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|existing| matches_id(existing, id)))
            .ok_or_else(|| StoreError::MissingRow(table.to_string()))?;
        existing.extend(row.clone());
        Ok(existing.clone())
    }

    fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        if let Some(rows) = self.tables.lock().unwrap().get_mut(table) {
            rows.retain(|row| !matches_id(row, id));
        }
        Ok(())
    }

    fn ping(&self, _table: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Every call fails the way an unreachable backend does.
pub struct FailingTables {
    pub status: u16,
    pub code: Option<&'static str>,
}

impl FailingTables {
    pub fn offline() -> Self {
        Self {
            status: 503,
            code: None,
        }
    }

    fn error(&self) -> StoreError {
        StoreError::Remote {
            status: self.status,
            code: self.code.map(str::to_string),
            message: "backend unavailable".into(),
        }
    }
}

impl TableClient for FailingTables {
    fn select(&self, _table: &str, _filters: &[(&str, String)]) -> Result<Vec<Row>, StoreError> {
        Err(self.error())
    }

    fn insert(&self, _table: &str, _row: &Row) -> Result<Row, StoreError> {
        Err(self.error())
    }

    fn update(&self, _table: &str, _id: &str, _row: &Row) -> Result<Row, StoreError> {
        Err(self.error())
    }

    fn delete(&self, _table: &str, _id: &str) -> Result<(), StoreError> {
        Err(self.error())
    }

    fn ping(&self, _table: &str) -> Result<(), StoreError> {
        Err(self.error())
    }
}

/// Replies with queued answers in order and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    answers: Mutex<VecDeque<Result<String, AgentError>>>,
    pub requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn answering(answers: impl IntoIterator<Item = &'static str>) -> Self {
        let model = Self::default();
        model
            .answers
            .lock()
            .unwrap()
            .extend(answers.into_iter().map(|answer| Ok(answer.to_string())));
        model
    }

    pub fn failing() -> Self {
        let model = Self::default();
        model
            .answers
            .lock()
            .unwrap()
            .push_back(Err(AgentError::Transport("connection refused".into())));
        model
    }
}

impl LanguageModel for ScriptedModel {
    fn generate(&self, request: &GenerateRequest) -> Result<String, AgentError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AgentError::EmptyResponse))
    }
}
