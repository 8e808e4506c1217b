use crate::cli::commands::{parse_number, print_records, remove_record, required};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{money, percent, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::domain::{Category, EntityKind, FlowType};
use crate::services::CategoryService;

const ADD_USAGE: &str = "category add <name> [budget] [income|expense]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "category",
        "Manage budget categories",
        "category list | add <name> [budget] [income|expense] | remove <id>",
        cmd_category,
    )
    .with_subcommands(&["list", "add", "remove"])
    .with_record_ids(EntityKind::Category, &["remove", "rm"])]
}

fn cmd_category(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context),
        "add" => handle_add(context, rest),
        "remove" | "rm" => remove_record::<Category>(context, rest, "category remove <id>"),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown category subcommand `{other}`"
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let mode = context.active_mode;
    let categories = context.database.categories().get_all(Some(mode));
    print_records(&format!("Categories ({mode})"), &categories);
    if categories.is_empty() {
        return Ok(());
    }

    let transactions = context.database.transactions().get_all(Some(mode));
    output_section("Spending");
    for spending in CategoryService::spending(&categories, &transactions) {
        io::print_info(format!(
            "  {:<16} spent {} / {}{}",
            spending.category.name,
            money(spending.spent),
            money(spending.category.budget),
            spending
                .usage
                .map(|usage| format!(" ({})", percent(usage)))
                .unwrap_or_default()
        ));
    }
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, ADD_USAGE)?;
    let budget = match args.get(1) {
        Some(raw) => parse_number(raw, "budget")?,
        None => 0.0,
    };
    let kind = match args.get(2) {
        Some(raw) => Some(raw.parse::<FlowType>().map_err(CommandError::InvalidArguments)?),
        None => Some(FlowType::Expense),
    };
    let stored = context
        .database
        .categories()
        .add(Category::new(name, kind, budget).with_mode(context.active_mode));
    io::print_success(format!("Category `{}` created.", stored.name));
    Ok(())
}
