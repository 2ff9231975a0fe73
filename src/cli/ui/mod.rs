pub mod table_renderer;
pub mod terminal;

pub use terminal::{short_id, TerminalRenderer};
