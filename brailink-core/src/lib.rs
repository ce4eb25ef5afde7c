//! Host-side driver core for HandyTech-family braille displays
//!
//! This crate contains all driver logic that does not depend on a
//! particular serial implementation:
//!
//! - Model registry and per-model geometry
//! - Display buffer management with dot translation
//! - Key decoding into navigation commands, with autorepeat
//! - Connection state machine with timeout recovery
//! - Session configuration
//!
//! The host opens a [`Session`] over any [`brailink_hal::SerialPort`] and
//! calls [`Session::poll`] periodically.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod keys;
pub mod model;
pub mod session;

pub use command::{ColumnAction, Command, Key};
pub use config::SessionConfig;
pub use error::Error;
pub use keys::{InputContext, InputMode};
pub use model::ModelDescriptor;
pub use session::{Session, State};
