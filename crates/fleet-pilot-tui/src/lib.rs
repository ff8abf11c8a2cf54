//! fleet-pilot-tui: terminal front end for the fleet dashboard
//!
//! Renders the panels resolved by `fleet-pilot-core` and drives refreshes
//! from a background task.
//!
//! # Modules
//!
//! - [`app`] - Event loop, key mapping and refresh dispatch
//! - [`action`] - Actions produced by key events and ticks
//! - [`components`] - One component per tab plus the header
//! - [`tui`] - Terminal setup and restore
//! - [`ui_ext`] - Color mappings for core indicator types

pub mod action;
pub mod app;
pub mod components;
pub mod tui;
pub mod ui_ext;

pub use app::{App, Feed};
