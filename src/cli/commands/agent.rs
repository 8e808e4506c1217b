use std::path::Path;

use crate::agent::{AgentSession, GeminiClient, Media};
use crate::cli::commands::usage_error;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

const USAGE: &str = "agent <text> | agent --image <path> [text] | agent --audio <path> [text]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "agent",
        "Record a transaction from a sentence, receipt photo or voice note",
        USAGE,
        cmd_agent,
    )]
}

fn cmd_agent(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        io::print_info(AgentSession::<GeminiClient>::greeting());
        return Ok(());
    }

    let (media, words) = match args[0].to_ascii_lowercase().as_str() {
        "--image" | "--audio" => {
            let path = args.get(1).ok_or_else(|| usage_error(USAGE))?;
            let media = Media::from_path(Path::new(path))?;
            let expects_audio = args[0].eq_ignore_ascii_case("--audio");
            if expects_audio != media.is_audio() {
                return Err(CommandError::InvalidArguments(format!(
                    "`{path}` does not look like {} file",
                    if expects_audio { "an audio" } else { "an image" }
                )));
            }
            (Some(media), &args[2..])
        }
        _ => (None, args),
    };
    let text = words.join(" ");

    let assistant = context.assistant();
    let session = AgentSession::new(&context.database, &assistant, context.active_mode);
    let reply = session.handle(&text, media);
    match reply.transaction {
        Some(_) => io::print_success(reply.text),
        None => io::print_warning(reply.text),
    }
    Ok(())
}
