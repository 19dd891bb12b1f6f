//! Deep Dissect: structured AI analysis tools backed by a key-gated primary
//! provider and a schema-constrained fallback provider.

pub mod config;
pub mod history;
pub mod integrity;
pub mod llm;
pub mod logging;
pub mod orchestrator;
pub mod proxy;
pub mod settings;
pub mod storage;
pub mod tools;

pub use orchestrator::Orchestrator;
