//! MCP tool implementations, one module per service adapter
//!
//! Each service directory holds one submodule per tool plus a register
//! function the server calls to populate the registry. Tool modules own
//! their description text and JSON schema; shared behavior lives in
//! `tool_registry`, `responses` and `shared_utils`.

pub mod asana;
pub mod bitbucket;
pub mod confluence;
pub mod jira;
pub mod testrail;
