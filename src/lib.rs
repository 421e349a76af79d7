//! # SmartLead MCP Server
//!
//! Exposes the SmartLead email-campaign-automation REST API as Model
//! Context Protocol tools for AI assistant clients.
//!
//! Every tool follows the same shape: validate the arguments against a
//! typed schema, issue exactly one upstream call through the shared
//! [`client::BaseClient`] (which owns auth, timeouts and retry with
//! backoff), and wrap the outcome in a uniform success/error envelope.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install smartlead-mcp
//!
//! # Register with Claude Desktop
//! smartlead-mcp install
//!
//! # Or run the stdio server directly
//! SMARTLEAD_API_KEY=... smartlead-mcp
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod install;
pub mod mcp;
pub mod tools;

pub use client::{ApiError, SmartleadClient};
pub use config::{Config, ConfigError};
pub use mcp::McpServer;
pub use tools::{build_registry, ToolEnvelope, ToolRegistry};
