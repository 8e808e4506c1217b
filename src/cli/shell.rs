use std::{
    collections::HashMap,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    history::DefaultHistory,
    Cmd, Context as ReadlineContext, Editor, Helper, Highlighter, Hinter, KeyEvent, Validator,
};

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::db::Database;
use crate::domain::{EntityKind, Mode, Record};

/// Set to read commands from stdin without line editing or prompts.
pub const SCRIPT_ENV: &str = "GERENCIE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ShellHelper::new(&context.registry)));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    output_info(format!(
        "Gerencie {}. Type `help` for commands, Tab to complete ids.",
        crate::utils::build_info::current().version
    ));

    loop {
        let records_changed = context.take_records_changed();
        if let Some(helper) = editor.helper_mut() {
            if records_changed || helper.ids_mode != Some(context.active_mode) {
                helper.load_ids(&context.database, context.active_mode);
            }
        }

        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Err(err) = editor.add_history_entry(line) {
            tracing::debug!(error = %err, "history entry not recorded");
        }

        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

/// Runs stdin line by line; `#` starts a comment line.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim_start().starts_with('#') {
            continue;
        }
        match context.process_line(&line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

/// Completes command names, their subcommands, `help` topics and the ids of
/// the active mode's records.
#[derive(Helper, Hinter, Highlighter, Validator)]
struct ShellHelper {
    commands: Vec<CommandEntry>,
    /// `(id, label)` per record kind, loaded for `ids_mode`.
    ids: HashMap<EntityKind, Vec<(String, String)>>,
    ids_mode: Option<Mode>,
}

impl ShellHelper {
    fn new(registry: &CommandRegistry) -> Self {
        Self {
            commands: registry.list().cloned().collect(),
            ids: HashMap::new(),
            ids_mode: None,
        }
    }

    fn load_ids(&mut self, db: &Database, mode: Mode) {
        let kinds: Vec<EntityKind> = self.commands.iter().filter_map(|entry| entry.records).collect();
        self.ids = kinds
            .into_iter()
            .map(|kind| (kind, record_ids(db, kind, mode)))
            .collect();
        self.ids_mode = Some(mode);
    }

    fn command(&self, name: &str) -> Option<&CommandEntry> {
        let name = name.to_ascii_lowercase();
        self.commands.iter().find(|entry| entry.name == name)
    }

    /// Start of the word under the cursor and the replacements for it.
    fn candidates(&self, prefix: &str) -> (usize, Vec<Pair>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = prefix[start..].to_ascii_lowercase();
        let before: Vec<&str> = prefix[..start].split_whitespace().collect();

        let pairs = match before.as_slice() {
            [] => matching(&needle, self.commands.iter().map(|entry| entry.name)),
            [help] if help.eq_ignore_ascii_case("help") => {
                matching(&needle, self.commands.iter().map(|entry| entry.name))
            }
            [command] => match self.command(command) {
                Some(entry) => matching(&needle, entry.subcommands.iter().copied()),
                None => Vec::new(),
            },
            [command, subcommand] => {
                let subcommand = subcommand.to_ascii_lowercase();
                self.command(command)
                    .and_then(|entry| entry.takes_id(&subcommand))
                    .and_then(|kind| self.ids.get(&kind))
                    .map(|ids| {
                        ids.iter()
                            .filter(|(id, _)| id.starts_with(&prefix[start..]))
                            .map(|(id, label)| Pair {
                                display: format!("{id}  {label}"),
                                replacement: id.clone(),
                            })
                            .collect()
                    })
                    .unwrap_or_default()
            }
            _ => Vec::new(),
        };
        (start, pairs)
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

fn matching<'a>(needle: &str, options: impl Iterator<Item = &'a str>) -> Vec<Pair> {
    options
        .filter(|option| option.starts_with(needle))
        .map(|option| Pair {
            display: option.to_string(),
            replacement: option.to_string(),
        })
        .collect()
}

fn record_ids(db: &Database, kind: EntityKind, mode: Mode) -> Vec<(String, String)> {
    use crate::domain::{Category, Debt, Goal, MaintenanceItem, ShoppingItem, Transaction};

    fn collect<T: Record + crate::domain::Displayable>(db: &Database, mode: Mode) -> Vec<(String, String)> {
        db.store::<T>()
            .get_all(Some(mode))
            .iter()
            .map(|record| (record.id().to_string(), record.display_label()))
            .collect()
    }

    match kind {
        EntityKind::Transaction => collect::<Transaction>(db, mode),
        EntityKind::Category => collect::<Category>(db, mode),
        EntityKind::Debt => collect::<Debt>(db, mode),
        EntityKind::Goal => collect::<Goal>(db, mode),
        EntityKind::ShoppingItem => collect::<ShoppingItem>(db, mode),
        EntityKind::MaintenanceItem => collect::<MaintenanceItem>(db, mode),
    }
}
