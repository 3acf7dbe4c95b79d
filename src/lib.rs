//! Grid Snake - a deterministic snake engine with a terminal front end
//!
//! This library provides:
//! - Pure game-state engine: board model, food placement, ticks, input reducers (game module)
//! - Timed-round controller and terminal loop (modes module)
//! - TUI rendering and key mapping (render, input modules)
//! - JSON settings (config module)

pub mod config;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
