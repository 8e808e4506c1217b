use chrono::Local;

use crate::cli::commands::{parse_number, print_records, remove_record, required, resolve_id, take_flag, usage_error};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, parse_date};
use crate::cli::io;
use crate::cli::output::{money, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::domain::{EntityKind, FlowType, Transaction, TransactionStatus};
use crate::services::{TransactionFilter, TransactionService};

const USAGE: &str = "transaction <list|add|toggle|duplicate|show|remove>";
const ADD_USAGE: &str =
    "transaction add <description> <amount> <income|expense> [category] [YYYY-MM-DD] [--pending]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transaction",
        "List, record and update income and expenses",
        "transaction list [income|expense] [search] | add ... | toggle <id> | duplicate <id> | show <id> | remove <id>",
        cmd_transaction,
    )
    .with_subcommands(&["list", "add", "toggle", "duplicate", "show", "remove"])
    .with_record_ids(
        EntityKind::Transaction,
        &["toggle", "duplicate", "dup", "show", "remove", "rm"],
    )]
}

fn cmd_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context, &[]);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context, rest),
        "add" => handle_add(context, rest),
        "toggle" => handle_toggle(context, rest),
        "duplicate" | "dup" => handle_duplicate(context, rest),
        "show" => handle_show(context, rest),
        "remove" | "rm" => remove_record::<Transaction>(context, rest, "transaction remove <id>"),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown transaction subcommand `{other}` ({USAGE})"
        ))),
    }
}

fn handle_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut filter = TransactionFilter::default();
    let mut rest = args;
    if let Some(first) = args.first() {
        if let Ok(kind) = first.parse::<FlowType>() {
            filter.kind = Some(kind);
            rest = &args[1..];
        }
    }
    if !rest.is_empty() {
        filter.search = Some(rest.join(" "));
    }

    let mut all = context
        .database
        .transactions()
        .get_all(Some(context.active_mode));
    all.sort_by(|a, b| b.date.cmp(&a.date));
    let shown = TransactionService::filter(&all, &filter);
    print_records(&format!("Transactions ({})", context.active_mode), &shown);
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let transaction = if args.is_empty() {
        if context.mode != CliMode::Interactive {
            return Err(usage_error(ADD_USAGE));
        }
        forms::transaction_form(&context.theme)?.into_transaction(context.active_mode)
    } else {
        parse_transaction(args, context)?
    };

    let stored = context.database.transactions().add(transaction);
    io::print_success(format!(
        "Recorded {} `{}` of {}.",
        stored.kind,
        stored.description,
        money(stored.amount)
    ));
    Ok(())
}

fn parse_transaction(args: &[&str], context: &ShellContext) -> Result<Transaction, CommandError> {
    let (pending, args) = take_flag(args, "--pending");
    let description = required(&args, 0, ADD_USAGE)?;
    let amount = parse_number(required(&args, 1, ADD_USAGE)?, "amount")?;
    if amount <= 0.0 {
        return Err(CommandError::InvalidArguments("amount must be greater than zero".into()));
    }
    let kind: FlowType = required(&args, 2, ADD_USAGE)?
        .parse()
        .map_err(CommandError::InvalidArguments)?;
    let category = args.get(3).copied().unwrap_or("Other");
    let date = match args.get(4) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let status = if pending {
        TransactionStatus::Pending
    } else {
        TransactionStatus::Paid
    };

    Ok(Transaction::new(
        description,
        amount,
        kind,
        category,
        date.format("%Y-%m-%d").to_string(),
    )
    .with_status(status)
    .with_mode(context.active_mode))
}

fn handle_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = resolve_id::<Transaction>(context, required(args, 0, "transaction toggle <id>")?)?;
    let updated = TransactionService::toggle_status(&context.database, &id)?;
    io::print_success(format!(
        "`{}` is now {}.",
        updated.description, updated.status
    ));
    Ok(())
}

fn handle_duplicate(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = resolve_id::<Transaction>(context, required(args, 0, "transaction duplicate <id>")?)?;
    let copy = TransactionService::duplicate(&context.database, &id, context.active_mode)?;
    io::print_success(format!(
        "Duplicated as `{}` ({}), pending on {}.",
        copy.description, copy.id, copy.date
    ));
    Ok(())
}

fn handle_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = resolve_id::<Transaction>(context, required(args, 0, "transaction show <id>")?)?;
    let txn = context
        .database
        .transactions()
        .get_by_id(&id)
        .ok_or_else(|| CommandError::Message(format!("Transaction `{id}` not found.")))?;

    output_section(format!("Transaction {}", txn.id));
    io::print_info(format!("  Description : {}", txn.description));
    io::print_info(format!("  Amount      : {}", money(txn.amount)));
    io::print_info(format!("  Type        : {}", txn.kind));
    io::print_info(format!("  Category    : {}", txn.category));
    io::print_info(format!("  Date        : {}", txn.date));
    io::print_info(format!("  Status      : {}", txn.status));
    if let Some(mode) = txn.mode {
        io::print_info(format!("  Mode        : {mode}"));
    }
    if let Some(kind) = txn.attachment_type {
        io::print_info(format!("  Attachment  : {kind:?}"));
    }
    Ok(())
}
