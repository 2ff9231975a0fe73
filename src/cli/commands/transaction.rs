use tracing::debug;

use crate::cli::core::{expect_args, CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table_renderer::{Table, TableColumn};
use crate::cli::ui::short_id;
use crate::core::services::TransactionService;
use crate::currency::format_currency_value;
use crate::ledger::{categories_for, TransactionDraft, TransactionKind, DATE_FORMAT};

const ADD_USAGE: &str = "add [<income|expense> <amount> <category> [YYYY-MM-DD|today] [description...]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "delete",
            "Remove a transaction by id or id prefix",
            "delete <id>",
            cmd_delete,
        ),
        CommandEntry::new(
            "categories",
            "List built-in categories",
            "categories [income|expense]",
            cmd_categories,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = if args.is_empty() {
        if !context.is_interactive() {
            return Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE)));
        }
        forms::transaction_form(&context.theme, forms::today())?
    } else {
        draft_from_args(args)?
    };

    let transaction = context.tracker.submit(draft, &mut context.renderer)?;
    debug!(id = %transaction.id, "transaction added from shell");
    let amount = format_currency_value(
        transaction.amount,
        &context.config.currency_code(),
        &context.config.locale_config(),
    );
    io::print_success(format!(
        "{} of {} recorded ({}).",
        transaction.kind.label(),
        amount,
        short_id(&transaction.id)
    ));
    Ok(())
}

/// Positional form: `<kind> <amount> <category> [date|today] [description...]`.
pub(crate) fn draft_from_args(args: &[&str]) -> Result<TransactionDraft, CommandError> {
    if args.len() < 3 {
        return Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE)));
    }
    let date = match args.get(3) {
        None => forms::today().format(DATE_FORMAT).to_string(),
        Some(value) if value.eq_ignore_ascii_case("today") => {
            forms::today().format(DATE_FORMAT).to_string()
        }
        Some(value) => value.to_string(),
    };
    Ok(TransactionDraft {
        kind: args[0].to_string(),
        amount: args[1].to_string(),
        category: args[2].to_string(),
        date,
        description: args.get(4..).map(|rest| rest.join(" ")).unwrap_or_default(),
    })
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 1, 1, "delete <id>")?;
    let id = TransactionService::resolve(&context.tracker.state().ledger, args[0])?;

    if context.is_interactive()
        && !io::confirm_action(&context.theme, "Delete this transaction?", false)?
    {
        io::print_info("Nothing deleted.");
        return Ok(());
    }

    let removed = context.tracker.remove_transaction(id, &mut context.renderer)?;
    io::print_success(format!("Deleted transaction {}.", short_id(&removed.id)));
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    expect_args(args, 0, 1, "categories [income|expense]")?;
    let kinds = match args.first() {
        Some(kind) => vec![kind.parse::<TransactionKind>()?],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };

    let mut table = Table::new(vec![
        TableColumn::left("Tag"),
        TableColumn::left("Label"),
        TableColumn::left("Type"),
    ]);
    for kind in kinds {
        for info in categories_for(kind) {
            table.push_row(vec![
                info.tag.to_string(),
                info.label.to_string(),
                info.kind.label().to_string(),
            ]);
        }
    }
    println!("{}", table.render());
    io::print_hint("Any other tag is accepted and shown as typed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_args_build_a_draft() {
        let draft = draft_from_args(&["expense", "12.50", "food", "2024-03-02", "lunch", "out"])
            .unwrap();
        assert_eq!(draft.kind, "expense");
        assert_eq!(draft.amount, "12.50");
        assert_eq!(draft.date, "2024-03-02");
        assert_eq!(draft.description, "lunch out");
    }

    #[test]
    fn missing_date_defaults_to_today() {
        let draft = draft_from_args(&["income", "10", "gift"]).unwrap();
        assert_eq!(draft.date, forms::today().format(DATE_FORMAT).to_string());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn too_few_args_is_a_usage_error() {
        assert!(matches!(
            draft_from_args(&["expense", "5"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}
