//! Quilt Planner Library
//!
//! Core of a quilt layout designer: quilt geometry, region classification,
//! the paint layer, fabric yardage estimates, and the JSON layout format,
//! plus the state store that the terminal editor, the CLI, and the web API
//! share.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod parser;
pub mod services;
#[cfg(feature = "ratatui")]
pub mod shortcuts;
pub mod store;
#[cfg(feature = "ratatui")]
pub mod tui;
#[cfg(feature = "web")]
pub mod web;
