use crate::cli::commands::{print_records, remove_record, required, resolve_id};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::{EntityKind, MaintenanceItem, MaintenanceStatus};
use crate::services::MaintenanceService;

const ADD_USAGE: &str = "maintenance add <name> [system] [due in]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "maintenance",
        "Track vehicle service items",
        "maintenance list | add <name> [system] [due in] | done <id> | remove <id>",
        cmd_maintenance,
    )
    .with_subcommands(&["list", "add", "done", "remove"])
    .with_record_ids(EntityKind::MaintenanceItem, &["done", "remove", "rm"])]
}

fn cmd_maintenance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context),
        "add" => handle_add(context, rest),
        "done" => handle_done(context, rest),
        "remove" | "rm" => {
            remove_record::<MaintenanceItem>(context, rest, "maintenance remove <id>")
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown maintenance subcommand `{other}`"
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let items = context
        .database
        .maintenance()
        .get_all(Some(context.active_mode));
    print_records(&format!("Maintenance ({})", context.active_mode), &items);
    let overdue = items
        .iter()
        .filter(|item| item.status == MaintenanceStatus::Overdue)
        .count();
    if overdue > 0 {
        io::print_warning(format!("{overdue} item(s) overdue."));
    }
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, ADD_USAGE)?;
    let system = args.get(1).copied().unwrap_or("General");
    let due_in = args.get(2).copied().unwrap_or_default();
    let stored = context.database.maintenance().add(
        MaintenanceItem::new(name, system, due_in).with_mode(context.active_mode),
    );
    io::print_success(format!("Maintenance item `{}` added.", stored.name));
    Ok(())
}

fn handle_done(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = resolve_id::<MaintenanceItem>(context, required(args, 0, "maintenance done <id>")?)?;
    let item = MaintenanceService::complete(&context.database, &id)?;
    io::print_success(format!("`{}` marked {}.", item.name, item.status));
    Ok(())
}
