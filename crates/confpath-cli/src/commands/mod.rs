//! Command implementations for confpath-cli

pub mod apply;
pub mod check;
pub mod flatten;
pub mod search;

pub use apply::run_apply;
pub use check::run_check;
pub use flatten::run_flatten;
pub use search::run_search;
