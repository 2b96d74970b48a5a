//! Core conversion pipeline: error taxonomy, data model, ports, image
//! collection, and the orchestrator that drives one archive-to-EPUB run.

pub mod collect;
pub mod error;
pub mod job;
pub mod pipeline;
pub mod ports;
