use crate::cli::commands::{parse_number, print_records, remove_record, required, resolve_id, take_flag};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::money;
use crate::cli::registry::CommandEntry;
use crate::domain::{Debt, EntityKind};
use crate::services::DebtService;

const ADD_USAGE: &str = "debt add <name> <total> [due YYYY-MM-DD] [monthly interest %]";
const PAY_USAGE: &str = "debt pay <id> <amount> [--record]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "debt",
        "Track debts and register payments",
        "debt list | add <name> <total> [due] [rate] | pay <id> <amount> [--record] | remove <id>",
        cmd_debt,
    )
    .with_subcommands(&["list", "add", "pay", "remove"])
    .with_record_ids(EntityKind::Debt, &["pay", "remove", "rm"])]
}

fn cmd_debt(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context),
        "add" => handle_add(context, rest),
        "pay" => handle_pay(context, rest),
        "remove" | "rm" => remove_record::<Debt>(context, rest, "debt remove <id>"),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown debt subcommand `{other}`"
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let debts = context.database.debts().get_all(Some(context.active_mode));
    print_records(&format!("Debts ({})", context.active_mode), &debts);
    if !debts.is_empty() {
        io::print_info(format!(
            "  Total remaining: {}",
            money(DebtService::total_remaining(&debts))
        ));
    }
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, ADD_USAGE)?;
    let total = parse_number(required(args, 1, ADD_USAGE)?, "total")?;
    let due = args.get(2).copied().unwrap_or_default();
    let rate = match args.get(3) {
        Some(raw) => parse_number(raw, "interest rate")?,
        None => 0.0,
    };
    let stored = context
        .database
        .debts()
        .add(Debt::new(name, total, due, rate).with_mode(context.active_mode));
    io::print_success(format!("Debt `{}` of {} added.", stored.name, money(total)));
    Ok(())
}

fn handle_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (record, args) = take_flag(args, "--record");
    let id = resolve_id::<Debt>(context, required(&args, 0, PAY_USAGE)?)?;
    let amount = parse_number(required(&args, 1, PAY_USAGE)?, "amount")?;

    let debt = DebtService::pay(&context.database, &id, amount, record, context.active_mode)?;
    io::print_success(format!(
        "Paid {} on `{}`; {} left.",
        money(amount),
        debt.name,
        money(debt.remaining_amount)
    ));
    if record {
        io::print_info("Payment recorded as an expense.");
    }
    Ok(())
}
