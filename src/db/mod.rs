//! Relational access layer.
//!
//! This module provides the database abstraction used by the CLI and by
//! embedding applications:
//! - Connection targets and per-call connections (PostgreSQL or SQLite)
//! - Statement rendering with bound parameters for the generic CRUD operations
//! - The [`Database`] handle exposing select, upsert, delete, count and max-id
//! - Idempotent database/table bootstrap guarded by catalog existence checks
//!
//! # Architecture
//!
//! Every public operation on [`Database`] renders its statement first, then
//! opens a fresh connection, executes, and drops the connection before
//! returning. Nothing is pooled or cached between calls.
//!
//! # Failure model
//!
//! Problems the layer can detect on its own (no configured target, columns
//! and values that don't pair up, a missing predicate, an identifier that
//! isn't a plain SQL name) are reported as the operation's neutral value:
//! an empty [`ResultSet`], `false`, or `0`. With the target's debug flag set
//! the reason is logged. Anything the driver or server reports comes back as
//! an [`AccessError`] and is never retried.

mod access;
mod backend;
mod bootstrap;
mod config;
mod connection;
mod ident;
pub mod pg;
mod query;
pub mod sqlite;
pub mod statement;
mod value;

use std::fmt;

pub use access::Database;
pub use backend::{Connection, ResultSet, Row};
pub use config::{ConnectionTarget, DatabaseConfig};
pub use connection::open;
pub use statement::{Predicate, Statement};
pub use value::Value;

use thiserror::Error;

/// Errors raised by the driver or server, and bootstrap postcondition failures.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("Failed to connect to {backend} database: {message}")]
    ConnectFailed {
        backend: &'static str,
        message: String,
    },

    #[error("Query failed: {message}")]
    QueryFailed { message: String },

    #[error("Cannot convert column '{column}': {message}")]
    Conversion { column: String, message: String },

    #[error("{kind} '{name}' still does not exist after running its creation statement")]
    NotCreated { kind: ObjectKind, name: String },

    #[error("Invalid connection URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl AccessError {
    pub(crate) fn query_failed(e: impl fmt::Display) -> Self {
        AccessError::QueryFailed {
            message: e.to_string(),
        }
    }
}

/// Argument-shape problems detected while rendering a statement.
///
/// These never reach the server; the public operations turn them into their
/// neutral return value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{columns} column(s) but {values} value(s)")]
    LengthMismatch { columns: usize, values: usize },

    #[error("No predicate given")]
    NoPredicate,

    #[error("No columns given")]
    NoColumns,

    #[error("Invalid identifier '{name}'")]
    InvalidIdentifier { name: String },
}

/// Kind of schema object handled by bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Database,
    Table,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Database => write!(f, "Database"),
            ObjectKind::Table => write!(f, "Table"),
        }
    }
}
