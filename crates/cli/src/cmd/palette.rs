//! Palette commands: update, per-file toggle, global toggle.

use std::path::Path;

use lastmod_core::CommandId;

use super::{Host, exit_code, load_config, resolve_document};
use crate::ExecArgs;

/// Run one palette command against an optional active note.
pub fn run(
    config_path: Option<&Path>,
    profile: Option<&str>,
    command: CommandId,
    file: Option<&Path>,
) {
    let cfg = load_config(config_path, profile);
    let doc = file.map(|f| resolve_document(&cfg, f));

    let host = Host::new(&cfg);
    let mut runner = host.runner();
    let outcome = runner.execute(command, doc.as_deref());

    let code = exit_code(outcome);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Run a command given by id, or list the available ids.
pub fn run_by_id(config_path: Option<&Path>, profile: Option<&str>, args: ExecArgs) {
    let Some(id) = args.id else {
        list_commands();
        return;
    };

    match id.parse::<CommandId>() {
        Ok(command) => run(config_path, profile, command, args.file.as_deref()),
        Err(e) => {
            eprintln!("{e}");
            eprintln!("available commands:");
            for command in CommandId::ALL {
                eprintln!("  {}", command.id());
            }
            std::process::exit(2);
        }
    }
}

fn list_commands() {
    print!("{}", render_list());
}

/// One line per command: id, whether it takes a FILE, display name.
fn render_list() -> String {
    let width = CommandId::ALL.iter().map(|c| c.id().len()).max().unwrap_or(0);
    CommandId::ALL
        .iter()
        .map(|command| {
            let file = if command.needs_document() { "FILE" } else { "" };
            format!("{:<width$}  {file:<4}  {}\n", command.id(), command.name())
        })
        .collect()
}
