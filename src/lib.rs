//! The edgecli client library.
//!
//! This crate provides the core functionality for the edgecli client: the
//! edge platform API client, the data models and the `cache-settings update`
//! engine that turns user input into a single validated partial update.
//!
//! # Modules
//!
//! - `actions`: Command implementations
//! - `change_set`: Requested changes and strict boolean parsing
//! - `commands`: CLI command parsing
//! - `configuration`: Configuration management
//! - `edge_api`: Edge platform API client
//! - `format`: JSON and YAML output
//! - `input`: Resolution of flags and input documents into a change set
//! - `model`: Data models for edge applications and cache settings
//! - `patch`: The partial-update payload
//! - `validation`: Ordered dependency rules

pub mod actions;
pub mod change_set;
pub mod cli;
pub mod commands;
pub mod configuration;
pub mod edge_api;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod format_utils;
pub mod http_utils;
pub mod input;
pub mod model;
pub mod patch;
pub mod validation;
