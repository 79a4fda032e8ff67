//! # Connect Four
//!
//! Two-player Connect Four: an in-memory game engine that reports every
//! change to a pluggable renderer, a terminal UI built with Ratatui, and a
//! plain-text mode for scripted play.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: grid, player, state machine, controller, renderer trait
//! - [`ui`] — Terminal UI: board view, falling-piece animation, key handling
//! - [`script`] — Headless play from a list of columns
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — `tracing` subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod script;
pub mod ui;
