//! Secret reference resolver.
//!
//! Values in `config.toml` can use special prefixes to reference secrets
//! stored outside the file:
//!
//! - `env::VAR_NAME`: reads `$VAR_NAME` from the environment
//! - `file::/path/to/secret`: reads the file, without its trailing newline
//! - anything else is returned as-is (plain text)

use std::path::Path;

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else if let Some(path) = value.strip_prefix("file::") {
        resolve_file(Path::new(path))
    } else {
        Ok(value.to_string())
    }
}

/// Resolves an optional value; blank results count as absent.
pub fn resolve_opt(value: Option<&str>) -> Result<Option<String>, String> {
    match value {
        Some(v) => resolve(v).map(|s| Some(s).filter(|s| !s.trim().is_empty())),
        None => Ok(None),
    }
}

/// Reads an environment variable.
fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

/// Reads a secret file and strips the trailing line break.
fn resolve_file(path: &Path) -> Result<String, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read secret file `{}`: {}", path.display(), e))?;
    Ok(content.trim_end_matches(['\r', '\n']).to_string())
}
