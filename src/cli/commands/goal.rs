use crate::cli::commands::{parse_number, print_records, remove_record, required, resolve_id, take_flag};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{money, percent};
use crate::cli::registry::CommandEntry;
use crate::domain::{EntityKind, Goal};
use crate::services::GoalService;

const ADD_USAGE: &str = "goal add <name> <target> [deadline]";
const DEPOSIT_USAGE: &str = "goal deposit <id> <amount> [--record]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "goal",
        "Track savings goals",
        "goal list | add <name> <target> [deadline] | deposit <id> <amount> [--record] | remove <id>",
        cmd_goal,
    )
    .with_subcommands(&["list", "add", "deposit", "remove"])
    .with_record_ids(EntityKind::Goal, &["deposit", "remove", "rm"])]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_list(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "list" | "ls" => handle_list(context),
        "add" => handle_add(context, rest),
        "deposit" => handle_deposit(context, rest),
        "remove" | "rm" => remove_record::<Goal>(context, rest, "goal remove <id>"),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown goal subcommand `{other}`"
        ))),
    }
}

fn handle_list(context: &mut ShellContext) -> CommandResult {
    let goals = context.database.goals().get_all(Some(context.active_mode));
    print_records(&format!("Goals ({})", context.active_mode), &goals);
    for goal in &goals {
        io::print_info(format!(
            "  {:<16} {} reached",
            goal.name,
            percent(GoalService::progress(goal))
        ));
    }
    Ok(())
}

fn handle_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = required(args, 0, ADD_USAGE)?;
    let target = parse_number(required(args, 1, ADD_USAGE)?, "target")?;
    let deadline = args.get(2).copied().unwrap_or_default();
    let stored = context
        .database
        .goals()
        .add(Goal::new(name, target, deadline).with_mode(context.active_mode));
    io::print_success(format!("Goal `{}` of {} created.", stored.name, money(target)));
    Ok(())
}

fn handle_deposit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (record, args) = take_flag(args, "--record");
    let id = resolve_id::<Goal>(context, required(&args, 0, DEPOSIT_USAGE)?)?;
    let amount = parse_number(required(&args, 1, DEPOSIT_USAGE)?, "amount")?;

    let goal = GoalService::deposit(&context.database, &id, amount, record, context.active_mode)?;
    io::print_success(format!(
        "Deposited {} into `{}` ({} of {}).",
        money(amount),
        goal.name,
        money(goal.current_amount),
        money(goal.target_amount)
    ));
    Ok(())
}
