//! Braille display wire protocol
//!
//! This crate defines the byte-level protocol spoken over the serial link
//! between the host and a HandyTech-family refreshable braille display.
//! Unlike framed protocols, almost every signal is a single byte:
//!
//! ```text
//! host → device   0xFF                       describe probe
//! device → host   0xFE 0xFE <id>             description reply / re-announce
//! host → device   <start> <status> <main> <end>   cell update frame
//! device → host   0x7E | 0x7D                write acknowledgement
//! device → host   [0x80 |] <key code>        key press / release
//! device → host   0x06                       fault / disconnect
//! ```
//!
//! Cell bytes use the host's standard dot numbering and must be passed
//! through [`dots::to_device`] before transmission.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod dots;
pub mod frame;
pub mod keys;
pub mod wire;

pub use frame::{Envelope, Frame, FrameError, MAX_FRAME_SIZE, MAX_MAIN_CELLS, MAX_STATUS_CELLS};
pub use keys::{KeyByte, KeyCode};
