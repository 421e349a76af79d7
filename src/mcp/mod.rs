//! Model Context Protocol serving layer.
//!
//! [`protocol`] holds the JSON-RPC and MCP wire types; [`server`] runs
//! the stdio loop that exposes the tool registry to MCP clients.

pub mod protocol;
mod server;

pub use server::{McpServer, ServeError};
