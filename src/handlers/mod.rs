//! HTTP handlers

pub mod health;
pub mod analyze;
pub mod stats;
pub mod analyses;
pub mod indicators;
pub mod predict;
