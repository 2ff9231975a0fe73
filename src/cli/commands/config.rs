use tracing::info;

use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;
use crate::core::DisplayMode;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "theme",
            "Switch between light and dark mode",
            "theme [dark|light|toggle]",
            cmd_theme,
        ),
        CommandEntry::new(
            "config",
            "View or change preferences",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
    ]
}

fn cmd_theme(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 1, "theme [dark|light|toggle]")?;
    match args.first().map(|arg| arg.to_ascii_lowercase()) {
        None => {
            context.tracker.toggle_display_mode(&mut context.renderer)?;
        }
        Some(arg) if arg == "toggle" => {
            context.tracker.toggle_display_mode(&mut context.renderer)?;
        }
        Some(arg) => {
            let mode: DisplayMode = arg.parse()?;
            context.tracker.set_display_mode(mode, &mut context.renderer)?;
        }
    }
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None | Some("show") => {
            expect_args(args, 0, 1, "config show")?;
            show_config(context);
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_ascii_lowercase();
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated
                .set(&key, &value)
                .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            context.refresh_renderer();
            info!(key = %key, "config updated");
            io::print_success(format!("Updated `{}`.", key));
            if matches!(key.as_str(), "rates_endpoint" | "data_dir") {
                io::print_hint("This setting takes effect the next time the shell starts.");
            }
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; usage: config [show|set <key> <value>]",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::two_column(&[
        ("Locale", config.locale.clone()),
        ("Currency", config.currency.clone()),
        ("Rates endpoint", config.rates_endpoint.clone()),
        (
            "Data dir",
            config
                .data_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| context.tracker.storage().base_dir().display().to_string()),
        ),
        ("Theme", context.tracker.state().display_mode.to_string()),
        ("Config file", context.config_manager.path().display().to_string()),
    ]);
}
