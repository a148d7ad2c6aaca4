//! # soi2c
//!
//! A portable, no_std Rust engine for exchanging terminator-delimited messages with a
//! peripheral over a half-duplex I2C-style bus that has no interrupt line and no flow control.
//!
//! The peripheral cannot push data to the host. It can only be polled, and every poll
//! answer reports how many bytes it still has pending. This crate implements the host
//! side of that protocol:
//! - `embedded-hal` traits for the bus and for blocking delays
//! - chunked, paced transmission with a one-byte length header per chunk
//! - polled, chunked reception that ends on the message terminator
//! - receive buffer overflow protection and a bounded polling budget
//!
//! Message contents are opaque. Only the final [`TERMINATOR`](consts::TERMINATOR) byte is
//! inspected, so any encoding (JSON, binary JSON, ...) can be layered on top.
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]` support |
//! | `defmt-0-3` | Uses `defmt` logging |
//! | `log`       | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use soi2c::driver::Context;
//! use soi2c::request::Request;
//! use soi2c::transport::I2cTransport;
//!
//! let mut context = Context::new(0x17, I2cTransport::new(i2c, delay));
//! context.reset()?;
//!
//! let mut req = [0u8; 512];
//! let len = encode_request(&mut req); // must end with b'\n' and leave one byte free
//! let mut rsp = [0u8; 1024];
//! let rsp_len = context.transaction(Request::new(&mut req, len), Some(&mut rsp))?;
//! decode_response(&rsp[..rsp_len]);
//! ```
//!
//! Or, let a [`Session`](session::Session) own the buffers:
//!
//! ```rust,ignore
//! let mut session: Session<_, 512, 1024> = Session::new(context);
//! let rsp = session.request(br#"{"req":"card.version"}"#)?;
//! ```
//!
//! ## Integration Notes
//!
//! - Every operation blocks; transmit chunks are paced at 250 ms and the receive phase
//!   polls every 50 ms for up to 5 s
//! - One transaction may be in flight per [`Context`](driver::Context)
//! - A transport call that hangs blocks the engine; bus timeouts belong to the HAL
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

pub use embedded_hal;

pub(crate) mod macros;

pub mod config;
pub mod consts;
pub mod driver;
pub mod error;
pub(crate) mod poll;
pub mod request;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
