//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (settings, snapshot loading, dates, JSON output)
//! - `analysis` - Pattern, trend, forecast, comparison and suggestion commands
//! - `reports` - Monthly, annual and executive summary reports

pub mod analysis;
pub mod core;
pub mod reports;

// Re-export command functions for main.rs
pub use analysis::*;
pub use core::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
