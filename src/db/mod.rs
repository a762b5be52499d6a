//! Database connection lifecycle.
//!
//! # Responsibilities
//! - Establish the single per-process MongoDB connection at startup
//! - Track connection state and log driver-driven transitions
//! - Mask credentials before any URI reaches the logs

pub mod connection;

pub use connection::{
    connect, mask_credentials, open, ConnectError, ConnectionState, DatabaseHandle,
};
