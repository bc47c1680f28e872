//! Configuration commands.

use std::path::Path;

use crate::config::SiteConfig;
use crate::error::WebResult;

/// Dump the effective configuration to stdout.
pub fn dump(config: &SiteConfig, path: &Path) -> WebResult<()> {
    let toml_str = config.to_toml()?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);
    Ok(())
}

/// Validate the configuration, printing every problem found.
pub fn validate(config: &SiteConfig) -> WebResult<()> {
    let problems = config.problems();
    for problem in &problems {
        eprintln!("  - {}", problem);
    }
    config.validate()?;

    if config.resend_api_key()?.is_none() || config.contact_recipient().is_none() {
        println!("Contact form is not configured; submissions will be rejected.");
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> WebResult<()> {
    let exists = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("config: {}{}", path.display(), exists);
    Ok(())
}
