pub mod config;
pub mod convert;
pub mod system;
pub mod transaction;
pub mod views;

use crate::cli::registry::CommandEntry;

/// Every shell command, in help order.
pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = transaction::definitions();
    entries.extend(views::definitions());
    entries.extend(convert::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries
}
