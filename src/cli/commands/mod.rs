pub mod agent;
pub mod category;
pub mod dashboard;
pub mod db;
pub mod debt;
pub mod goal;
pub mod maintenance;
pub mod mode;
pub mod shopping;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandRegistry;
use crate::domain::{Displayable, Record};

/// Length of the id prefix shown in lists; any unique prefix is accepted back.
const SHORT_ID_LEN: usize = 8;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        system::definitions(),
        mode::definitions(),
        dashboard::definitions(),
        transaction::definitions(),
        category::definitions(),
        debt::definitions(),
        goal::definitions(),
        shopping::definitions(),
        maintenance::definitions(),
        agent::definitions(),
        db::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}

pub(crate) fn required<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CommandError> {
    args.get(index).copied().ok_or_else(|| usage_error(usage))
}

/// Parses a number, accepting a decimal comma.
pub(crate) fn parse_number(raw: &str, field: &str) -> Result<f64, CommandError> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CommandError::InvalidArguments(format!("{field} must be a number, got `{raw}`")))
}

/// Splits `flag` out of `args`, reporting whether it was present.
pub(crate) fn take_flag<'a>(args: &[&'a str], flag: &str) -> (bool, Vec<&'a str>) {
    let present = args.iter().any(|arg| arg.eq_ignore_ascii_case(flag));
    let rest = args
        .iter()
        .copied()
        .filter(|arg| !arg.eq_ignore_ascii_case(flag))
        .collect();
    (present, rest)
}

pub(crate) fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(index, _)| &id[..index])
}

/// Finds the record in the active mode whose id equals or uniquely starts
/// with `raw`.
pub(crate) fn resolve_id<T: Record>(context: &ShellContext, raw: &str) -> Result<String, CommandError> {
    let records: Vec<T> = context
        .database
        .store::<T>()
        .get_all(Some(context.active_mode));
    if let Some(exact) = records.iter().find(|record| record.id() == raw) {
        return Ok(exact.id().to_string());
    }
    let matches: Vec<&T> = records
        .iter()
        .filter(|record| !raw.is_empty() && record.id().starts_with(raw))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.id().to_string()),
        [] => Err(CommandError::Message(format!(
            "No {} with id `{}` in {} mode.",
            T::KIND.label(),
            raw,
            context.active_mode
        ))),
        _ => Err(CommandError::InvalidArguments(format!(
            "id `{raw}` is ambiguous; type more characters"
        ))),
    }
}

pub(crate) fn print_records<T: Record + Displayable>(title: &str, records: &[T]) {
    output_section(title);
    if records.is_empty() {
        io::print_info("  (none)");
        return;
    }
    for record in records {
        io::print_info(format!("  [{}] {}", short_id(record.id()), record.display_label()));
    }
}

/// Shared `remove <id>` flow: resolve, confirm, delete.
pub(crate) fn remove_record<T: Record + Displayable>(
    context: &mut ShellContext,
    args: &[&str],
    usage: &str,
) -> CommandResult {
    let id = resolve_id::<T>(context, required(args, 0, usage)?)?;
    let label = context
        .database
        .store::<T>()
        .get_by_id(&id)
        .map(|record| record.display_label())
        .unwrap_or_else(|| id.clone());
    if !context.confirm(&format!("Remove {} `{}`?", T::KIND.label(), label))? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    context.database.store::<T>().delete(&id);
    io::print_success(format!("Removed {} `{}`.", T::KIND.label(), label));
    Ok(())
}
