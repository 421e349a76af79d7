//! Interactive setup for Claude Desktop.
//!
//! Writes an `mcpServers.smartlead` entry into the Claude Desktop
//! configuration so the assistant can launch this binary over stdio.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

/// Options for the `install` subcommand.
#[derive(Debug, Default)]
pub struct InstallOptions {
    /// Overwrite an existing `smartlead` entry.
    pub force: bool,
    /// Target config file; defaults to the Claude Desktop location.
    pub config_path: Option<PathBuf>,
    /// API key; prompted for interactively when absent.
    pub api_key: Option<String>,
}

/// Default Claude Desktop config location for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library").join("Application Support"))
    } else {
        dirs::config_dir()
    };
    base.map(|dir| dir.join("Claude").join("claude_desktop_config.json"))
}

/// Run the interactive install flow.
pub fn run(options: InstallOptions) -> Result<()> {
    println!("SmartLead MCP server setup\n");

    let config_path = match options.config_path {
        Some(path) => path,
        None => default_config_path()
            .context("could not determine the Claude Desktop config directory")?,
    };

    let api_key = match options.api_key {
        Some(key) => key,
        None => prompt("Enter your SmartLead API key: ")?,
    };
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    let executable = std::env::current_exe().context("could not resolve this executable's path")?;

    write_server_entry(&config_path, &executable, api_key.trim(), options.force)?;

    println!("✓ Updated {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Restart Claude Desktop");
    println!("  2. Look for the SmartLead tools in the tool picker");
    Ok(())
}

/// Merge the `mcpServers.smartlead` entry into the config file, creating
/// the file and its parent directories if needed.
pub fn write_server_entry(
    config_path: &Path,
    executable: &Path,
    api_key: &str,
    force: bool,
) -> Result<()> {
    let mut config: Value = match std::fs::read_to_string(config_path) {
        Ok(raw) => serde_json::from_str(&raw).with_context(|| {
            format!("{} exists but is not valid JSON", config_path.display())
        })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => json!({}),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", config_path.display()))
        }
    };

    if !config.is_object() {
        bail!("{} does not contain a JSON object", config_path.display());
    }

    let servers = config
        .as_object_mut()
        .and_then(|root| {
            if !root.contains_key("mcpServers") {
                root.insert("mcpServers".to_string(), json!({}));
            }
            root.get_mut("mcpServers")
        })
        .and_then(Value::as_object_mut)
        .context("mcpServers is not a JSON object")?;

    if servers.contains_key("smartlead") && !force {
        bail!(
            "a smartlead entry already exists in {}; re-run with --force to overwrite",
            config_path.display()
        );
    }

    servers.insert(
        "smartlead".to_string(),
        json!({
            "command": executable.to_string_lossy(),
            "args": [],
            "env": { "SMARTLEAD_API_KEY": api_key },
        }),
    );

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let pretty = serde_json::to_string_pretty(&config)?;
    std::fs::write(config_path, pretty)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    Ok(())
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_fresh_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("claude_desktop_config.json");

        write_server_entry(&config_path, Path::new("/usr/bin/smartlead-mcp"), "sk-test", false)
            .unwrap();

        let config: Value =
            serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
        let entry = &config["mcpServers"]["smartlead"];
        assert_eq!(entry["command"], "/usr/bin/smartlead-mcp");
        assert_eq!(entry["env"]["SMARTLEAD_API_KEY"], "sk-test");
    }

    #[test]
    fn test_preserves_other_servers() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("claude_desktop_config.json");
        std::fs::write(
            &config_path,
            r#"{"mcpServers":{"github":{"command":"gh-mcp"}},"theme":"dark"}"#,
        )
        .unwrap();

        write_server_entry(&config_path, Path::new("/bin/x"), "sk", false).unwrap();

        let config: Value =
            serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(config["mcpServers"]["github"]["command"], "gh-mcp");
        assert_eq!(config["theme"], "dark");
        assert!(config["mcpServers"]["smartlead"].is_object());
    }

    #[test]
    fn test_existing_entry_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("claude_desktop_config.json");
        std::fs::write(&config_path, r#"{"mcpServers":{"smartlead":{"command":"old"}}}"#).unwrap();

        let err =
            write_server_entry(&config_path, Path::new("/bin/new"), "sk", false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_server_entry(&config_path, Path::new("/bin/new"), "sk", true).unwrap();
        let config: Value =
            serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
        assert_eq!(config["mcpServers"]["smartlead"]["command"], "/bin/new");
    }

    #[test]
    fn test_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("claude_desktop_config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let err =
            write_server_entry(&config_path, Path::new("/bin/x"), "sk", false).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }
}
