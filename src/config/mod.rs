//! Configuration module.

pub mod column_order;
pub mod loader;

pub use column_order::{default_column_order_path, load_column_order, save_column_order};
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ConfigError,
    ConfigFile, ResolvedConfig,
};
