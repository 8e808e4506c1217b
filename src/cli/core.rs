//! Core CLI loop, dispatch, and shell context helpers.

use std::{fs, io, path::Path};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    agent::{Assistant, GeminiClient},
    config::{ConfigManager, RemoteSettings},
    db::{ConnectionStatus, Database},
    errors::{AgentError, ConfigError, ServiceError, StoreError},
    services::{FinancialSummary, SummaryService},
    utils,
};

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
            other @ ServiceError::NotFound { .. } => CommandError::Message(other.to_string()),
        }
    }
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, &utils::app_data_dir())
    }

    /// Opens configuration and storage under `base`.
    pub fn with_base_dir(mode: CliMode, base: &Path) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        fs::create_dir_all(base)?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let database = Database::open(&config, base)?;
        let changes = database.subscribe();

        let mut context = ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            base_dir: base.to_path_buf(),
            active_mode: config.default_mode,
            config_manager,
            config,
            database,
            changes,
            dashboard: None,
            records_changed: true,
        };
        let status = context.database.init();
        context.report_connection(&status);
        context.sync_changes();
        Ok(context)
    }

    /// Reopens the database after the hosted settings changed.
    pub(crate) fn reopen_database(&mut self) -> Result<ConnectionStatus, CommandError> {
        self.database = Database::open(&self.config, &self.base_dir)?;
        self.changes = self.database.subscribe();
        self.dashboard = None;
        let status = self.database.init();
        self.sync_changes();
        Ok(status)
    }

    fn report_connection(&self, status: &ConnectionStatus) {
        match status {
            ConnectionStatus::LocalOnly => {}
            ConnectionStatus::Connected => cli_io::print_info(status.describe()),
            other => cli_io::print_warning(other.describe()),
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn remote_settings(&self) -> RemoteSettings {
        RemoteSettings::resolve(&self.config)
    }

    pub(crate) fn assistant(&self) -> Assistant<GeminiClient> {
        let key = self.config.resolve_gemini_key().unwrap_or_default();
        Assistant::new(GeminiClient::new(key, self.config.gemini_model.clone()))
    }

    /// Summary of the active mode, recomputed only after transactions changed.
    pub(crate) fn dashboard_summary(&mut self) -> FinancialSummary {
        self.sync_changes();
        if let Some(summary) = self.dashboard {
            return summary;
        }
        let transactions = self.database.transactions().get_all(Some(self.active_mode));
        let summary = SummaryService::summarize(&transactions);
        self.dashboard = Some(summary);
        summary
    }

    pub(crate) fn prompt(&self) -> String {
        let backend = if self.database.is_remote() { "cloud" } else { "local" };
        format!("gerencie [{}|{}]> ", self.active_mode, backend)
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            let result = handler(self, args);
            self.sync_changes();
            match result {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Did you mean `{}`?", best));
            }
        }
    }

    /// Asks before destructive actions; scripts are never prompted.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        match cli_io::confirm_action(&self.theme, "Exit shell?", true) {
            Ok(answer) => Ok(answer),
            Err(CommandError::Dialoguer(err)) => Err(err.into()),
            Err(CommandError::Io(err)) => Err(err.into()),
            Err(_) => Ok(true),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    /// Splits one input line into words and runs it.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&format!("Could not read that line: {err}"));
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FlowType, Mode, Transaction};
    use tempfile::tempdir;

    fn script_context(base: &Path) -> ShellContext {
        ShellContext::with_base_dir(CliMode::Script, base).unwrap()
    }

    #[test]
    fn dashboard_cache_is_invalidated_by_transaction_changes() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path());
        assert_eq!(context.dashboard_summary().income, 0.0);

        context.database.transactions().add(
            Transaction::new("Salary", 500.0, FlowType::Income, "Salary", "2025-01-05")
                .with_mode(Mode::Personal),
        );
        assert_eq!(context.dashboard_summary().income, 500.0);
    }

    #[test]
    fn exit_command_ends_the_loop() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path());
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("").unwrap(), LoopControl::Continue);
        assert_eq!(context.process_line("dashbord").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn unbalanced_quotes_are_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path());
        assert_eq!(
            context.process_line("transaction add \"Lunch 12").unwrap(),
            LoopControl::Continue
        );
        assert!(context.database.transactions().get_all(None).is_empty());
    }

    #[test]
    fn record_changes_are_reported_once() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path());
        assert!(context.take_records_changed());
        assert!(!context.take_records_changed());

        context.process_line("goal add Bike 800").unwrap();
        assert!(context.take_records_changed());
        assert!(!context.take_records_changed());
    }

    #[test]
    fn mode_switch_is_persisted() {
        let dir = tempdir().unwrap();
        let mut context = script_context(dir.path());
        context.process_line("mode business").unwrap();
        assert_eq!(context.active_mode, Mode::Business);

        let reopened = script_context(dir.path());
        assert_eq!(reopened.active_mode, Mode::Business);
    }

    #[test]
    fn not_found_services_errors_become_messages() {
        let err = CommandError::from(ServiceError::NotFound {
            kind: "Debt",
            id: "x".into(),
        });
        assert!(matches!(err, CommandError::Message(ref message) if message.contains("Debt")));
    }
}
