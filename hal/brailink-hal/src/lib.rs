//! Brailink transport abstraction
//!
//! The driver core never touches a serial device directly. It talks to a
//! [`SerialPort`], which a host (termios, a USB-serial bridge, a UART on a
//! microcontroller) or a test harness implements.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  brailink-core (Session)                │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  brailink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  host serial  │       │ scripted port │
//! │    device     │       │   (tests)     │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{DataBits, Parity, SerialConfig, SerialPort, StopBits};
