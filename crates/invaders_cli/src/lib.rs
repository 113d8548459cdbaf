//! # Invaders CLI
//!
//! Console front end for the invaders simulation.
//!
//! The simulation core never prints; this crate renders its events to
//! stdout, keeps diagnostics on stderr, and owns the pacing delay that
//! makes the output humanly readable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod console;
