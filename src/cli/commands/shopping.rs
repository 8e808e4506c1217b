use crate::cli::commands::{parse_number, print_records, remove_record, required, resolve_id};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::money;
use crate::cli::registry::CommandEntry;
use crate::domain::{EntityKind, ShoppingItem};
use crate::services::ShoppingService;

const ADD_USAGE: &str = "shopping add <name> <ideal qty> <unit price> [unit] [category]";
const ADJUST_USAGE: &str = "shopping adjust <id> <delta>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "shopping",
        "Keep pantry and supply stock",
        "shopping list | add <name> <ideal> <price> [unit] [category] | adjust <id> <delta> | remove <id>",
        cmd_shopping,
    )
    .with_subcommands(&["list", "add", "adjust", "remove"])
    .with_record_ids(EntityKind::ShoppingItem, &["adjust", "remove", "rm"])]
}

fn cmd_shopping(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context),
        "add" => handle_add(context, rest),
        "adjust" => handle_adjust(context, rest),
        "remove" | "rm" => remove_record::<ShoppingItem>(context, rest, "shopping remove <id>"),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown shopping subcommand `{other}`"
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let items = context.database.shopping().get_all(Some(context.active_mode));
    print_records(&format!("Shopping list ({})", context.active_mode), &items);
    if !items.is_empty() {
        io::print_info(format!(
            "  Restock cost: {}",
            money(ShoppingService::restock_cost(&items))
        ));
    }
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, ADD_USAGE)?;
    let ideal = parse_number(required(args, 1, ADD_USAGE)?, "ideal quantity")?;
    let price = parse_number(required(args, 2, ADD_USAGE)?, "price")?;
    let unit = args.get(3).copied().unwrap_or("un");
    let category = args.get(4).copied().unwrap_or("General");
    let stored = context.database.shopping().add(
        ShoppingItem::new(name, category, unit, ideal, price).with_mode(context.active_mode),
    );
    io::print_success(format!("Item `{}` added.", stored.name));
    Ok(())
}

fn handle_adjust(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = resolve_id::<ShoppingItem>(context, required(args, 0, ADJUST_USAGE)?)?;
    let delta = parse_number(required(args, 1, ADJUST_USAGE)?, "delta")?;
    let item = ShoppingService::adjust(&context.database, &id, delta)?;
    io::print_success(format!(
        "`{}` now at {} {} (ideal {}).",
        item.name, item.current_qty, item.unit, item.ideal_qty
    ));
    Ok(())
}
