pub mod config;
pub mod constants;
pub mod get_env;
pub mod mime;
pub mod urls;
