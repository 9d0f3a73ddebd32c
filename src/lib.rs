// src/lib.rs — Library root for ontodash

pub mod api;
pub mod cli;
pub mod dashboard;
pub mod infra;
pub mod tui;
