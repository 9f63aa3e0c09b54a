//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    if args.reset {
        Config::default().save_to(path)?;
        println!(
            "{}",
            formatter.success(&format!("Configuration reset: {}", path.display()))
        );
        return Ok(());
    }

    println!("{}", formatter.info(&format!("Configuration file: {}", path.display())));
    if args.show {
        println!("{}", config.to_toml()?);
    }
    Ok(())
}
