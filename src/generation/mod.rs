pub mod document;
pub mod orchestrator;

pub use document::{
    DocumentSource, GeneratedDocument, GenerationAttempt, GenerationReport, Provenance,
};
pub use orchestrator::{GenerationConfig, GenerationOrchestrator, GenerationState};
