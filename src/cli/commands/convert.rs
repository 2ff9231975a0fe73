use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;
use crate::core::TrackerError;
use crate::currency::CurrencyCode;

const CONVERT_USAGE: &str = "convert <amount> [from] <to>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "convert",
        "Convert an amount using live exchange rates",
        CONVERT_USAGE,
        cmd_convert,
    )]
}

/// With two arguments the source currency is the configured one.
fn cmd_convert(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (amount, from, to) = match args {
        [amount, to] => (*amount, context.config.currency_code(), CurrencyCode::new(*to)),
        [amount, from, to] => (*amount, CurrencyCode::new(*from), CurrencyCode::new(*to)),
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {}",
                CONVERT_USAGE
            )))
        }
    };

    match context
        .tracker
        .convert(amount, &from, &to, &mut context.renderer)
    {
        Ok(_) => Ok(()),
        // Already shown in the converter panel.
        Err(TrackerError::Conversion(_)) => Ok(()),
        Err(other) => Err(other.into()),
    }
}
