//! Application core: services, state, rendering port, and the controller.

pub mod render;
pub mod services;
pub mod state;
pub mod tracker;
pub mod utils;

pub use render::{ChartData, DisplayMode, Renderer};
pub use state::AppState;
pub use tracker::{ExpenseTracker, PendingConversion, TrackerError, TrackerResult};
