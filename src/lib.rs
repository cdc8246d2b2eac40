//! The LED Button Service (LBS), a minimal custom GATT service.
//!
//! The service exposes three characteristics:
//! * **Button** (read): the current state of a button, queried from the application on every read.
//! * **LED** (write): a single byte (`0x00` or `0x01`) that switches an LED.
//! * **Sensor** (notify): a little-endian `u32` pushed to the peer once it subscribed.
//!
//! This crate does not contain a BLE stack. Connection handling, the ATT transport, MTU exchange
//! and security all belong to whatever stack embeds the service. The stack calls into
//! [`LedButtonService`] when a peer reads or writes one of its attributes, and the application
//! sends notifications through a [`Transport`] implemented on top of the stack.
//!
//! # Using the service
//!
//! ```
//! use lbs_gatt::{att::Handle, lbs::{Callbacks, LedButtonService}};
//!
//! let mut service = LedButtonService::new(Handle::from_raw(0x0010)).unwrap();
//! service
//!     .initialize(Some(
//!         Callbacks::new()
//!             .on_led_write(|on: bool| { let _ = on; })
//!             .on_button_read(|| true),
//!     ))
//!     .unwrap();
//! ```
//!
//! [`LedButtonService`]: lbs/struct.LedButtonService.html
//! [`Transport`]: lbs/trait.Transport.html

// We're `#[no_std]`, except when we're testing
#![cfg_attr(not(test), no_std)]
// Deny a few warnings in doctests, since rustdoc `allow`s many warnings by default
#![doc(test(attr(deny(unused_imports, unused_must_use))))]
#![warn(rust_2018_idioms)]
// The claims of this lint are dubious, disable it
#![allow(clippy::trivially_copy_pass_by_ref)]

#[macro_use]
mod logging;
#[macro_use]
mod utils;
pub mod att;
pub mod bytes;
mod error;
pub mod gatt;
pub mod lbs;
pub mod uuid;

pub use self::error::Error;
pub use self::lbs::LedButtonService;
pub use self::utils::HexSlice;
