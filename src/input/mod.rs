//! Input adapters for the explorer.
//!
//! This module contains adapters that receive input from various sources
//! and translate them into session operations and render requests.

pub mod cli;
