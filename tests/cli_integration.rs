//! CLI Integration Tests
//!
//! Exercises the binary end-to-end: flags, startup diagnostics, the
//! install flow, and a full MCP handshake over stdio.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get the binary to test.
fn smartlead_mcp() -> Command {
    Command::cargo_bin("smartlead-mcp").unwrap()
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    smartlead_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("MCP server for the SmartLead"));
}

#[test]
fn test_short_help_flag() {
    smartlead_mcp().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    smartlead_mcp()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_short_version_flag() {
    smartlead_mcp()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("smartlead-mcp"));
}

#[test]
fn test_install_help() {
    smartlead_mcp()
        .args(["install", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Register this server"));
}

#[test]
fn test_unknown_subcommand_fails() {
    smartlead_mcp().arg("frobnicate").assert().failure();
}

// ============================================================================
// Startup Diagnostics
// ============================================================================

#[test]
fn test_missing_api_key_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    smartlead_mcp()
        .current_dir(dir.path())
        .env_remove("SMARTLEAD_API_KEY")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SMARTLEAD_API_KEY"));
}

#[test]
fn test_blank_api_key_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    smartlead_mcp()
        .current_dir(dir.path())
        .env("SMARTLEAD_API_KEY", "   ")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_invalid_numeric_override_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    smartlead_mcp()
        .current_dir(dir.path())
        .env("SMARTLEAD_API_KEY", "sk-test")
        .env("SMARTLEAD_MAX_RETRIES", "lots")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("SMARTLEAD_MAX_RETRIES"));
}

// ============================================================================
// Server over stdio
// ============================================================================

#[test]
fn test_serve_exits_cleanly_on_stdin_eof() {
    let dir = tempfile::tempdir().unwrap();
    smartlead_mcp()
        .current_dir(dir.path())
        .env("SMARTLEAD_API_KEY", "sk-test")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn test_initialize_and_list_tools_over_stdio() {
    let dir = tempfile::tempdir().unwrap();
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );

    smartlead_mcp()
        .current_dir(dir.path())
        .env("SMARTLEAD_API_KEY", "sk-test")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"protocolVersion\""))
        .stdout(predicate::str::contains("smartlead_create_campaign"))
        .stdout(predicate::str::contains("smartlead_fetch_all_campaigns"));
}

#[test]
fn test_unknown_method_over_stdio() {
    let dir = tempfile::tempdir().unwrap();
    smartlead_mcp()
        .current_dir(dir.path())
        .env("SMARTLEAD_API_KEY", "sk-test")
        .write_stdin(r#"{"jsonrpc":"2.0","id":1,"method":"resources/list"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("-32601"));
}

// ============================================================================
// Install Flow
// ============================================================================

#[test]
fn test_install_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("claude_desktop_config.json");

    smartlead_mcp()
        .args(["install", "--config-path"])
        .arg(&config_path)
        .args(["--api-key", "sk-install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps"));

    let config: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config_path).unwrap()).unwrap();
    assert_eq!(
        config["mcpServers"]["smartlead"]["env"]["SMARTLEAD_API_KEY"],
        "sk-install"
    );
}

#[test]
fn test_install_refuses_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("claude_desktop_config.json");
    std::fs::write(&config_path, r#"{"mcpServers":{"smartlead":{"command":"old"}}}"#).unwrap();

    smartlead_mcp()
        .args(["install", "--config-path"])
        .arg(&config_path)
        .args(["--api-key", "sk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    smartlead_mcp()
        .args(["install", "--force", "--config-path"])
        .arg(&config_path)
        .args(["--api-key", "sk"])
        .assert()
        .success();
}
