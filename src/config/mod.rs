//! Configuration module.
//!
//! Settings resolve in order: defaults, TOML config file, environment,
//! command-line flags.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_with_precedence, merge_config, CliOverrides, ConfigError, ConfigFile,
    ResolvedConfig, DEFAULT_OUTPUT,
};

/// Resolve the full configuration for a run.
///
/// # Errors
///
/// Returns `ConfigError` if a config file exists but is unreadable or
/// invalid, or if a setting has an out-of-range value.
pub fn resolve(
    config_path: Option<std::path::PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file)?;
    let with_env = apply_env_overrides(merged)?;
    Ok(apply_cli_overrides(with_env, cli))
}
