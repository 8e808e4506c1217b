use std::{path::PathBuf, sync::mpsc::Receiver};

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    db::{ChangeEvent, Database},
    domain::{EntityKind, Mode},
    services::FinancialSummary,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub base_dir: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub database: Database,
    pub changes: Receiver<ChangeEvent>,
    /// Personal or business book every view is filtered by.
    pub active_mode: Mode,
    /// Dashboard figures, dropped whenever transactions change.
    pub dashboard: Option<FinancialSummary>,
    /// Set by any change event; cleared by whoever refreshes record listings.
    pub(crate) records_changed: bool,
}

impl ShellContext {
    /// Drains pending change events and invalidates cached views they touch.
    pub fn sync_changes(&mut self) {
        for event in self.changes.try_iter() {
            tracing::debug!(?event, "change event");
            self.records_changed = true;
            if matches!(event.kind, None | Some(EntityKind::Transaction)) {
                self.dashboard = None;
            }
        }
    }

    /// Whether records changed since the last call.
    pub fn take_records_changed(&mut self) -> bool {
        self.sync_changes();
        std::mem::take(&mut self.records_changed)
    }
}
