//! Structured commands for the interactive shell.
//!
//! The first word of a line picks the command and is matched
//! case-insensitively; the rest of the line is the argument, trimmed but
//! otherwise kept as typed so file names and shop names survive intact.

use std::path::PathBuf;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Add,
    List,
    /// Shop to filter by; prompted for when absent.
    Select(Option<String>),
    /// Target file; falls back to the configured data file when absent.
    Save(Option<PathBuf>),
    Load(Option<PathBuf>),
    Help,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };
        let argument = (!rest.is_empty()).then(|| rest.to_string());

        let command = match (keyword.to_lowercase().as_str(), argument) {
            ("add", None) => Command::Add,
            ("list", None) => Command::List,
            ("select", shop) => Command::Select(shop),
            ("save", path) => Command::Save(path.map(PathBuf::from)),
            ("load", path) => Command::Load(path.map(PathBuf::from)),
            ("help", None) => Command::Help,
            ("exit", None) => Command::Exit,
            _ => Command::Unknown(line.to_string()),
        };
        Some(command)
    }
}
