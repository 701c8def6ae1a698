#![doc = include_str!("../../../README.md")]
//!

//! This crate bundles the metric buffer with the SVG chart backend.

pub use lager_core::*;
pub use lager_plot as plot;
