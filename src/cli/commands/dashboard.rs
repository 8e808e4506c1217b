use crate::agent::AdviceInput;
use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{money, percent, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::services::{CategoryService, DebtService, HealthScore, ShoppingService, SummaryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show balance, health and weekly breakdown for the active mode",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "advice",
            "Ask the assistant for a short reading of the dashboard",
            "advice",
            cmd_advice,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.dashboard_summary();
    let mode = context.active_mode;

    output_section(format!("Dashboard ({mode})"));
    io::print_info(format!("  Income           : {}", money(summary.income)));
    io::print_info(format!("  Expenses         : {}", money(summary.expenses)));
    io::print_info(format!("  Balance          : {}", money(summary.balance)));
    io::print_info(format!("  Pending expenses : {}", money(summary.pending_expenses)));
    let health = format!("  Health           : {}", summary.health);
    match summary.health {
        HealthScore::Critical => io::print_warning(health),
        _ => io::print_info(health),
    }

    output_section("Weekly breakdown");
    for week in SummaryService::weekly_breakdown(&summary) {
        io::print_info(format!(
            "  {:<8} in {:>12}  out {:>12}",
            week.label,
            money(week.income),
            money(week.expenses)
        ));
    }

    let db = &context.database;
    let categories = db.categories().get_all(Some(mode));
    if !categories.is_empty() {
        let transactions = db.transactions().get_all(Some(mode));
        output_section("Budgets");
        for spending in CategoryService::spending(&categories, &transactions) {
            let line = format!(
                "  {:<16} {} of {}{}",
                spending.category.name,
                money(spending.spent),
                money(spending.category.budget),
                spending
                    .usage
                    .map(|usage| format!(" ({})", percent(usage)))
                    .unwrap_or_default()
            );
            if spending.over_budget() {
                io::print_warning(line);
            } else {
                io::print_info(line);
            }
        }
    }

    let debts = db.debts().get_all(Some(mode));
    let shopping = db.shopping().get_all(Some(mode));
    output_section("Outlook");
    io::print_info(format!(
        "  Debt remaining   : {}",
        money(DebtService::total_remaining(&debts))
    ));
    io::print_info(format!(
        "  Restock cost     : {}",
        money(ShoppingService::restock_cost(&shopping))
    ));
    Ok(())
}

fn cmd_advice(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.dashboard_summary();
    let mut transactions = context
        .database
        .transactions()
        .get_all(Some(context.active_mode));
    transactions.sort_by(|a, b| b.date.cmp(&a.date));

    let input = AdviceInput::new(summary, &transactions);
    let advice = context
        .assistant()
        .financial_advice(context.active_mode, &input);
    output_section("Assistant insight");
    io::print_info(advice);
    Ok(())
}
