//! Pager support for text reports
//!
//! `--pager=CMD` names a pager explicitly; bare `--pager` falls back to the
//! PAGER environment variable. Neither available is a usage error.

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors from pager resolution and spawning
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("no pager is available; set PAGER or pass a pager name to --pager")]
    NoPager,

    #[error("failed to run pager '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
}

/// Resolve the pager command: an explicit non-empty value beats the PAGER
/// variable; an empty value (`--pager=`) falls through to it.
pub fn resolve_pager(flag: Option<String>) -> Result<String, PagerError> {
    flag.filter(|command| !command.is_empty())
        .or_else(|| std::env::var("PAGER").ok().filter(|command| !command.is_empty()))
        .ok_or(PagerError::NoPager)
}

/// Pipe `text` through the pager and wait for it to exit.
pub fn page_output(command: &str, text: &str) -> Result<(), PagerError> {
    let mut child = Command::new(command)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|source| PagerError::Spawn {
            command: command.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        // EPIPE is fine: the user may quit the pager before the end.
        let _ = stdin.write_all(text.as_bytes());
    }

    child.wait().map_err(|source| PagerError::Spawn {
        command: command.to_string(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_pager_wins() {
        let pager = resolve_pager(Some("less".to_string())).unwrap();
        assert_eq!(pager, "less");
    }

    #[test]
    fn test_empty_explicit_value_falls_through_to_env() {
        // Single test because PAGER is process-global state; parallel tests
        // mutating it would race.
        std::env::set_var("PAGER", "more");
        assert_eq!(resolve_pager(Some(String::new())).unwrap(), "more");
        assert_eq!(resolve_pager(None).unwrap(), "more");

        // An empty PAGER cannot name a pager either.
        std::env::set_var("PAGER", "");
        assert!(matches!(resolve_pager(Some(String::new())), Err(PagerError::NoPager)));

        std::env::remove_var("PAGER");
        assert!(matches!(resolve_pager(Some(String::new())), Err(PagerError::NoPager)));
        assert!(matches!(resolve_pager(None), Err(PagerError::NoPager)));
    }

    #[test]
    fn test_page_output_through_cat() {
        // cat exits after consuming stdin; good enough as a pager stand-in.
        page_output("cat", "hello pager\n").unwrap();
    }

    #[test]
    fn test_missing_pager_binary_is_spawn_error() {
        let err = page_output("definitely-not-a-pager-binary", "x").unwrap_err();
        assert!(matches!(err, PagerError::Spawn { .. }));
    }
}
