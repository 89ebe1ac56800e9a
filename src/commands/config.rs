//! Config command - show or change settings

use crate::VaultError;
use crate::cli::ConfigCommands;
use crate::config::VaultConfig;
use crate::output::OutputWriter;
use ::config::ConfigError;
use std::path::Path;

type Result<T> = std::result::Result<T, VaultError>;

/// Execute a config subcommand against the file at `path`
///
/// # Errors
///
/// Returns `VaultError::ConfigError` if a value is invalid or the file
/// cannot be written.
pub fn execute(
    command: &ConfigCommands,
    mut config: VaultConfig,
    path: &Path,
    out: &dyn OutputWriter,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            if config.session_cookie.is_some() {
                config.session_cookie = Some("<redacted>".to_string());
            }
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;
            out.write(rendered.trim_end());
        }
        ConfigCommands::Set { key, value } => {
            config.set_value(key, value)?;
            config.save_to(path)?;
            if !quiet {
                out.success(&format!("Set {key} in {}", path.display()));
            }
        }
        ConfigCommands::Path => out.write(&path.display().to_string()),
    }
    Ok(())
}
