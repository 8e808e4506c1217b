//! Data-access adapter: one CRUD contract per entity kind over either the
//! local key-value store or the hosted table store.

pub mod notify;
pub mod schema;
pub mod store;

use std::{path::Path, sync::mpsc::Receiver, sync::Arc};

use crate::{
    config::{Config, RemoteSettings},
    domain::{
        Category, Debt, EntityKind, Goal, MaintenanceItem, Record, ShoppingItem, Transaction,
    },
    errors::StoreError,
    storage::{LocalStore, RestTableClient, TableClient},
    utils,
};

pub use notify::{ChangeAction, ChangeEvent, ChangeNotifier};
pub use schema::SCHEMA_SQL;
pub use store::{EntityStore, Patch};

/// Table queried to check that the hosted schema exists.
const PING_TABLE: &str = "transactions";

/// Result of checking the active backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    LocalOnly,
    Connected,
    MissingTables,
    Unauthorized,
    Failed(String),
}

impl ConnectionStatus {
    pub fn from_ping(result: Result<(), StoreError>) -> Self {
        match result {
            Ok(()) => ConnectionStatus::Connected,
            Err(err) if err.is_missing_table() => ConnectionStatus::MissingTables,
            Err(err) if err.is_unauthorized() => ConnectionStatus::Unauthorized,
            Err(err) => ConnectionStatus::Failed(err.to_string()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ConnectionStatus::LocalOnly => "Using local storage.".into(),
            ConnectionStatus::Connected => "Connected to the hosted database; tables found.".into(),
            ConnectionStatus::MissingTables => {
                "Connected, but the tables do not exist. Run `db schema` and execute the printed SQL in the project's SQL editor.".into()
            }
            ConnectionStatus::Unauthorized => "The API key is invalid or expired.".into(),
            ConnectionStatus::Failed(reason) => format!("Connection failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Hosted data is never wiped from here.
    RemoteUntouched,
    LocalCleared(usize),
}

pub struct Database {
    local: LocalStore,
    remote: Option<Arc<dyn TableClient>>,
    notifier: ChangeNotifier,
}

impl Database {
    pub fn new(local: LocalStore, remote: Option<Arc<dyn TableClient>>) -> Self {
        Self {
            local,
            remote,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Opens the local store under `base` and, when `config` resolves to a
    /// configured hosted project, the remote client.
    pub fn open(config: &Config, base: &Path) -> Result<Self, StoreError> {
        let local = LocalStore::new(utils::store_dir_in(base))?;
        let settings = RemoteSettings::resolve(config);
        let remote: Option<Arc<dyn TableClient>> = if settings.is_configured() {
            Some(Arc::new(RestTableClient::new(&settings.url, &settings.key)))
        } else {
            None
        };
        Ok(Self::new(local, remote))
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        self.notifier.subscribe()
    }

    /// Checks the hosted schema when one is configured, then tells every
    /// subscriber to load.
    pub fn init(&self) -> ConnectionStatus {
        tracing::info!(remote = self.is_remote(), "database initialized");
        let status = match &self.remote {
            Some(remote) => {
                let status = ConnectionStatus::from_ping(remote.ping(PING_TABLE));
                match &status {
                    ConnectionStatus::Connected => tracing::info!("hosted database ready"),
                    ConnectionStatus::MissingTables => tracing::error!(
                        "hosted tables do not exist; create the schema before using the hosted database"
                    ),
                    other => tracing::warn!(status = ?other, "hosted database configured but unreachable"),
                }
                status
            }
            None => ConnectionStatus::LocalOnly,
        };
        self.notifier.notify(ChangeEvent::initialized());
        status
    }

    /// Checks an arbitrary client without opening a database on it.
    pub fn test_connection(client: &dyn TableClient) -> ConnectionStatus {
        ConnectionStatus::from_ping(client.ping(PING_TABLE))
    }

    /// Clears the local store. Refuses while a hosted database is configured.
    pub fn reset(&self) -> Result<ResetOutcome, StoreError> {
        if self.is_remote() {
            tracing::warn!("reset does not delete hosted data");
            return Ok(ResetOutcome::RemoteUntouched);
        }
        let removed = self.local.clear()?;
        self.notifier.notify(ChangeEvent::initialized());
        Ok(ResetOutcome::LocalCleared(removed))
    }

    pub fn store<T: Record>(&self) -> EntityStore<'_, T> {
        EntityStore::new(self)
    }

    pub fn transactions(&self) -> EntityStore<'_, Transaction> {
        self.store()
    }

    pub fn categories(&self) -> EntityStore<'_, Category> {
        self.store()
    }

    pub fn debts(&self) -> EntityStore<'_, Debt> {
        self.store()
    }

    pub fn goals(&self) -> EntityStore<'_, Goal> {
        self.store()
    }

    pub fn shopping(&self) -> EntityStore<'_, ShoppingItem> {
        self.store()
    }

    pub fn maintenance(&self) -> EntityStore<'_, MaintenanceItem> {
        self.store()
    }

    /// Number of locally stored records per kind, for status displays.
    pub fn local_counts(&self) -> Vec<(EntityKind, usize)> {
        EntityKind::ALL
            .iter()
            .map(|kind| (*kind, self.local.read(*kind).len()))
            .collect()
    }
}
