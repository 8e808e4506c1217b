use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::Mode;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "mode",
        "Show or switch between personal and business books",
        "mode [personal|business]",
        cmd_mode,
    )
    .with_subcommands(&["personal", "business"])]
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        io::print_info(format!("Active mode: {}", context.active_mode));
        return Ok(());
    };
    let mode: Mode = raw.parse().map_err(CommandError::InvalidArguments)?;
    context.active_mode = mode;
    context.dashboard = None;
    context.config.default_mode = mode;
    context.persist_config()?;
    io::print_success(format!("Switched to {mode} mode."));
    Ok(())
}
