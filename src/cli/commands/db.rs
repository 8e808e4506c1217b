use crate::cli::commands::{required, usage_error};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::{format_url, RemoteSettings};
use crate::db::{ConnectionStatus, Database, ResetOutcome, SCHEMA_SQL};
use crate::storage::RestTableClient;

const USAGE: &str = "db <status|connect|disconnect|test|schema|reset>";
const CONNECT_USAGE: &str = "db connect <project url> <anon key>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "db",
        "Inspect or change where data is stored",
        "db status | connect <url> <key> | disconnect | test [<url> <key>] | schema | reset",
        cmd_db,
    )
    .with_subcommands(&["status", "connect", "disconnect", "test", "schema", "reset"])]
}

fn cmd_db(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return handle_status(context);
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "status" => handle_status(context),
        "connect" => handle_connect(context, rest),
        "disconnect" => handle_disconnect(context),
        "test" => handle_test(context, rest),
        "schema" => handle_schema(),
        "reset" => handle_reset(context),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown db subcommand `{other}` ({USAGE})"
        ))),
    }
}

fn handle_status(context: &mut ShellContext) -> CommandResult {
    output_section("Storage");
    if context.database.is_remote() {
        let settings = context.remote_settings();
        io::print_info("  Backend : hosted database");
        io::print_info(format!("  Project : {}", settings.url));
        io::print_info(format!("  Key     : {}", mask(&settings.key)));
    } else {
        io::print_info("  Backend : local storage");
        io::print_info(format!(
            "  Folder  : {}",
            context.database.local().root().display()
        ));
    }
    io::print_info("  Local records:");
    for (kind, count) in context.database.local_counts() {
        io::print_info(format!("    {:<18} {}", kind.label(), count));
    }
    Ok(())
}

fn handle_connect(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let url = required(args, 0, CONNECT_USAGE)?;
    let key = required(args, 1, CONNECT_USAGE)?;
    context.config.save_remote(url, key);
    context.persist_config()?;

    let status = context.reopen_database()?;
    if !context.database.is_remote() {
        io::print_warning(format!(
            "`{}` is not a hosted project URL; staying on local storage.",
            format_url(url.trim())
        ));
        return Ok(());
    }
    report(&status);
    Ok(())
}

fn handle_disconnect(context: &mut ShellContext) -> CommandResult {
    context.config.clear_remote();
    context.persist_config()?;
    let status = context.reopen_database()?;
    if context.database.is_remote() {
        io::print_warning("Hosted settings still come from the environment (SUPABASE_URL/SUPABASE_KEY).");
        report(&status);
    } else {
        io::print_success("Disconnected; using local storage.");
    }
    Ok(())
}

fn handle_test(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let settings = match args {
        [] => context.remote_settings(),
        [url, key] => RemoteSettings {
            url: format_url(url.trim()),
            key: key.trim().to_string(),
        },
        _ => return Err(usage_error("db test [<url> <key>]")),
    };
    if !settings.is_configured() {
        report(&ConnectionStatus::LocalOnly);
        return Ok(());
    }
    let client = RestTableClient::new(&settings.url, &settings.key);
    report(&Database::test_connection(&client));
    Ok(())
}

fn handle_schema() -> CommandResult {
    io::print_hint("Run this in the hosted project's SQL editor:");
    println!("{SCHEMA_SQL}");
    Ok(())
}

fn handle_reset(context: &mut ShellContext) -> CommandResult {
    if !context.confirm("Delete every locally stored record?")? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    match context.database.reset()? {
        ResetOutcome::RemoteUntouched => io::print_warning(
            "Hosted data is not deleted from here. Disconnect first to reset local storage.",
        ),
        ResetOutcome::LocalCleared(count) => {
            io::print_success(format!("Local storage cleared ({count} collections)."))
        }
    }
    Ok(())
}

fn report(status: &ConnectionStatus) {
    match status {
        ConnectionStatus::Connected => io::print_success(status.describe()),
        ConnectionStatus::LocalOnly => io::print_info(status.describe()),
        other => io::print_warning(other.describe()),
    }
}

/// Keeps only the last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
