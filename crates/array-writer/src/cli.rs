//! Logic behind the `array-writer` binary.
//!
//! The document arrives as JSON text, one operation is applied, and the
//! result is returned as JSON text:
//!
//! ```text
//! array-writer get <path>
//! array-writer add <path> <value> [new-key] [old-key]
//! array-writer edit <path> <value>
//! array-writer cp|cp-safe|mv|mv-safe <from> <to>
//! array-writer merge <from> <into>
//! array-writer mv-up <path>
//! array-writer rm <path>
//! array-writer wrap <path> <wrapper-key>
//! array-writer forget <path>
//! ```
//!
//! `<value>` is parsed as JSON; text that is not valid JSON is taken as a
//! plain string. `get` and `forget` print the value read, every other command
//! prints the edited document.

use thiserror::Error;

use crate::editor::ArrayWriter;
use crate::error::WriterError;
use crate::value::Value;

pub const USAGE: &str = "usage: array-writer <get|add|edit|cp|cp-safe|mv|mv-safe|merge|mv-up|rm|wrap|forget> <args...>";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", USAGE)]
    Usage,
    #[error("{command}: expected {expected} argument(s), got {got}")]
    Arity {
        command: String,
        expected: &'static str,
        got: usize,
    },
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Writer(#[from] WriterError),
}

fn parse_value(text: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Value::from(json),
        Err(_) => Value::String(text.to_string()),
    }
}

fn arity(command: &str, args: &[String], min: usize, max: usize, expected: &'static str) -> Result<(), CliError> {
    if args.len() < min || args.len() > max {
        return Err(CliError::Arity {
            command: command.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Apply the command in `args` (without the program name) to `doc`.
pub fn run(doc: &str, args: &[String]) -> Result<String, CliError> {
    let (command, rest) = args.split_first().ok_or(CliError::Usage)?;
    let mut tree = Value::from(serde_json::from_str::<serde_json::Value>(doc)?);
    let writer = ArrayWriter::new();

    match command.as_str() {
        "get" => {
            arity(command, rest, 1, 1, "1")?;
            return Ok(writer.get(&tree, &rest[0])?.to_string());
        }
        "forget" => {
            arity(command, rest, 1, 1, "1")?;
            return Ok(writer.get_and_forget(&mut tree, &rest[0])?.to_string());
        }
        "add" => {
            arity(command, rest, 2, 4, "2 to 4")?;
            let new_key = rest.get(2).map_or("", String::as_str);
            let old_key = rest.get(3).map_or("", String::as_str);
            writer.add_with_keys(&mut tree, &rest[0], parse_value(&rest[1]), new_key, old_key)?;
        }
        "edit" => {
            arity(command, rest, 2, 2, "2")?;
            writer.edit(&mut tree, &rest[0], parse_value(&rest[1]))?;
        }
        "cp" | "cp-safe" | "mv" | "mv-safe" | "merge" => {
            arity(command, rest, 2, 2, "2")?;
            let (from, to) = (&rest[0], &rest[1]);
            match command.as_str() {
                "cp" => writer.cp(&mut tree, from, to)?,
                "cp-safe" => writer.cp_safe(&mut tree, from, to)?,
                "mv" => writer.mv(&mut tree, from, to)?,
                "mv-safe" => writer.mv_safe(&mut tree, from, to)?,
                _ => writer.merge(&mut tree, from, to)?,
            }
        }
        "mv-up" => {
            arity(command, rest, 1, 1, "1")?;
            writer.mv_up(&mut tree, &rest[0])?;
        }
        "rm" => {
            arity(command, rest, 1, 1, "1")?;
            writer.rm(&mut tree, &rest[0])?;
        }
        "wrap" => {
            arity(command, rest, 2, 2, "2")?;
            writer.wrap(&mut tree, &rest[0], &rest[1])?;
        }
        other => return Err(CliError::UnknownCommand(other.to_string())),
    }

    Ok(tree.to_string())
}
