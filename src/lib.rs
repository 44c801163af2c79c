//! sql_access library - relational access over PostgreSQL and SQLite
//!
//! Provides the access layer (connection targets, per-call connections,
//! parameterized CRUD operations and idempotent bootstrap) together with the
//! command execution and output formatting behind the `sql_access` CLI.

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod logging;
pub mod output;

#[cfg(test)]
#[macro_use]
mod test_macros;

#[cfg(test)]
pub mod test_utils;
