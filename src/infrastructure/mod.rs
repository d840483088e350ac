//! Infrastructure layer for filesystem and environment interactions.
//!
//! # Modules
//!
//! - [`paths`]: Config and data directories
//! - [`credentials`]: OAuth token file loading

pub mod credentials;
pub mod paths;

pub use credentials::{load_token, OAuthToken};
pub use paths::{default_config_file, default_token_file, expand_tilde, get_config_dir, get_data_dir};
