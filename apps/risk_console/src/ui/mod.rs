//! UI layer for the risk console: app shell and colour theme.

pub mod app;
pub mod theme;

pub use app::RiskConsoleApp;
