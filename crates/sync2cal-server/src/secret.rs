//! Secret references for credentials in `config.toml`.

use std::process::Command;

use crate::error::{ServerError, ServerResult};

/// Where a configured credential actually lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretRef<'a> {
    /// An entry in the `pass` password store.
    Pass(&'a str),
    /// An environment variable.
    Env(&'a str),
    /// The value itself.
    Plain(&'a str),
}

impl<'a> SecretRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(entry) = value.strip_prefix("pass::") {
            Self::Pass(entry)
        } else if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else {
            Self::Plain(value)
        }
    }

    /// Reads the secret. Resolved values are trimmed.
    pub fn resolve(self) -> ServerResult<String> {
        match self {
            Self::Pass(entry) => pass_show(entry),
            Self::Env(var) => std::env::var(var).map(|v| v.trim().to_string()).map_err(|_| {
                ServerError::config(format!("environment variable `{}` is not set", var))
            }),
            Self::Plain(value) => Ok(value.to_string()),
        }
    }
}

/// Resolves a configured value that may be a secret reference.
pub fn resolve(value: &str) -> ServerResult<String> {
    SecretRef::parse(value).resolve()
}

/// The first line of `pass show <entry>`.
fn pass_show(entry: &str) -> ServerResult<String> {
    let output = Command::new("pass")
        .args(["show", entry])
        .output()
        .map_err(|e| ServerError::config(format!("cannot run pass for `{}`: {}", entry, e)))?;

    if !output.status.success() {
        return Err(ServerError::config(format!(
            "pass entry `{}` unavailable ({}): {}",
            entry,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ServerError::config(format!("pass entry `{}` is empty", entry)))
}
