//! Port definitions for the interactive controller.
//!
//! Contains the trait the controller publishes finished renders through.

pub mod presenter;
