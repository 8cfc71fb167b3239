//! Firmware library - testable modules for the Epicycle watchface.
//!
//! The binary (`main.rs`) uses this library and adds the embedded-specific
//! code. Run the host tests with:
//!
//! ```bash
//! cargo test -p epicycle-pico2 --lib --target x86_64-unknown-linux-gnu
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]

pub mod wall_clock;
