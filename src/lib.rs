//! Handyhub Application Library
//!
//! Ties the books and workers modules to the kernel registry. The binary
//! and the integration tests both build the app through here.

pub mod modules;
