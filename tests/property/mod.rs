//! Property-based tests for the quality gate and template synthesis

mod quality_gate;
mod template;
