use crate::core::registry::Registry;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

pub const HELP: &str = "\
add <path>...   upload images (non-image files are skipped)
remove <id>     remove one image; any unique id prefix works
clear           remove every image and the last result
list            show uploaded images
prompt [text]   show or replace the instruction sent with each request
analyze         submit the images and prompt
retry           submit again after a failure
status          show the current analysis status
raw             print the last result without formatting
help            show this help
quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<PathBuf>),
    Remove(String),
    Clear,
    List,
    Prompt(Option<String>),
    Analyze,
    Retry,
    Status,
    Raw,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("no image matches `{0}`")]
    NoMatch(String),
    #[error("`{0}` matches more than one image")]
    Ambiguous(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "add" | "upload" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("add <path>..."));
            }
            Command::Add(rest.split_whitespace().map(PathBuf::from).collect())
        }
        "remove" | "rm" => match rest.split_whitespace().next() {
            Some(id) => Command::Remove(id.to_string()),
            None => return Err(CommandError::Usage("remove <id>")),
        },
        "clear" => Command::Clear,
        "list" | "ls" => Command::List,
        "prompt" => Command::Prompt((!rest.is_empty()).then(|| rest.to_string())),
        "analyze" | "identify" => Command::Analyze,
        "retry" => Command::Retry,
        "status" => Command::Status,
        "raw" | "copy" => Command::Raw,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

/// Finds the single record whose id starts with `prefix`.
pub fn resolve_id(registry: &Registry, prefix: &str) -> Result<Uuid, CommandError> {
    let prefix = prefix.to_ascii_lowercase();
    let mut matches = registry
        .iter()
        .map(|record| record.id)
        .filter(|id| id.to_string().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(CommandError::NoMatch(prefix)),
        (Some(_), Some(_)) => Err(CommandError::Ambiguous(prefix)),
    }
}
