//! Command implementations.

pub mod assess;
pub mod config;
pub mod extract;

pub use self::assess::execute_assess;
pub use self::config::execute_config;
pub use self::extract::execute_extract;
