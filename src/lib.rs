//! autoblog: article generation with quality gating and graceful degradation
//!
//! Requests an article from a local text-generation backend, checks it against
//! a structural quality gate, retries a bounded number of times, and falls back
//! to a deterministic template when the backend never produces usable text.

pub mod cli;
pub mod config;
pub mod error;
pub mod generation;
pub mod init;
pub mod logging;
pub mod prompt;
pub mod provider;
pub mod quality;
pub mod store;
pub mod synthesis;
pub mod topic;
