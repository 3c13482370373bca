use anyhow::Error;
use dotenv::dotenv;
use std::env;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    Ok(env::var(key)?)
}

// unset and blank values both fall back to `default`
pub fn get_env_var_or(key: &str, default: &str) -> String {
    match get_env_var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw,
        _ => default.to_string(),
    }
}
