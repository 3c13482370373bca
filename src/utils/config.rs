use crate::cli::args::Cli;
use crate::utils::constants::{DEFAULT_API_URL, DEFAULT_LOG_FILTER, DEFAULT_PROMPT};
use crate::utils::get_env::get_env_var_or;
use crate::utils::urls::to_api_url;
use anyhow::Error;
use url::Url;

pub const API_URL_VAR: &str = "LENS_API_URL";
pub const PROMPT_VAR: &str = "LENS_PROMPT";
pub const LOG_VAR: &str = "LENS_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub prompt: String,
    pub log_filter: String,
    pub use_colors: bool,
}

impl Config {
    // flags override environment, environment overrides defaults
    pub fn resolve(cli: &Cli) -> Result<Config, Error> {
        let raw_url = match &cli.api_url {
            Some(url) => url.clone(),
            None => get_env_var_or(API_URL_VAR, DEFAULT_API_URL),
        };
        let prompt = match &cli.prompt {
            Some(prompt) => prompt.clone(),
            None => get_env_var_or(PROMPT_VAR, DEFAULT_PROMPT),
        };
        let log_filter = get_env_var_or(LOG_VAR, &get_env_var_or("RUST_LOG", DEFAULT_LOG_FILTER));

        Ok(Config {
            api_url: to_api_url(&raw_url)?,
            prompt,
            log_filter,
            use_colors: !cli.no_color,
        })
    }
}
