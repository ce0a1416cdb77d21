// SPDX-License-Identifier: GPL-3.0-only
pub mod cli;
pub mod commands;
pub mod platform;

// Re-export the main run function
pub use app_main::run;

mod app_main;
