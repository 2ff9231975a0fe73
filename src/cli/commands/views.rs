use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::Renderer;
use crate::ledger::Filter;

const FILTER_USAGE: &str =
    "filter [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--category <tag|all>] [--type <income|expense|all>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show transactions matching the active filter",
            "list",
            cmd_list,
        ),
        CommandEntry::new(
            "summary",
            "Show total income, expenses and balance",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "charts",
            "Show category and monthly charts for the active filter",
            "charts",
            cmd_charts,
        ),
        CommandEntry::new(
            "dashboard",
            "Show summary, transactions and charts",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new("filter", "Apply or show the active filter", FILTER_USAGE, cmd_filter),
        CommandEntry::new(
            "reset-filter",
            "Clear the active filter",
            "reset-filter",
            cmd_reset_filter,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 0, "list")?;
    let state = context.tracker.state();
    context.renderer.render_list(&state.visible_transactions())?;
    if !state.active_filter().is_unrestricted() {
        io::print_hint(format!("Filter: {}", state.active_filter()));
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 0, "summary")?;
    let totals = context.tracker.state().totals();
    context.renderer.render_summary(&totals)?;
    Ok(())
}

fn cmd_charts(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 0, "charts")?;
    let charts = context.tracker.state().chart_data();
    context.renderer.render_charts(&charts)?;
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 0, "dashboard")?;
    context.tracker.render(&mut context.renderer)?;
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        io::print_info(format!("Filter: {}", context.tracker.state().active_filter()));
        return Ok(());
    }
    let filter = parse_filter_args(args)?;
    context.tracker.apply_filter(filter, &mut context.renderer)?;
    io::print_info(format!("Filter: {}", context.tracker.state().active_filter()));
    Ok(())
}

fn cmd_reset_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 0, "reset-filter")?;
    context.tracker.reset_filter(&mut context.renderer)?;
    io::print_info("Filter cleared.");
    Ok(())
}

/// Flag values are handed to [`Filter::from_inputs`], so malformed dates
/// widen the range instead of failing.
pub(crate) fn parse_filter_args(args: &[&str]) -> Result<Filter, CommandError> {
    let (mut from, mut to, mut category, mut kind) = ("", "", "", "");
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let slot = match *flag {
            "--from" => &mut from,
            "--to" => &mut to,
            "--category" => &mut category,
            "--type" => &mut kind,
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown filter option `{}`; usage: {}",
                    other, FILTER_USAGE
                )))
            }
        };
        *slot = iter.next().copied().ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` needs a value", flag))
        })?;
    }
    Ok(Filter::from_inputs(from, to, category, kind))
}
