//! Integration tests for the autoblog generation pipeline

mod backend_client;
mod orchestrator_scenarios;
mod persistence;
pub mod test_utils;
