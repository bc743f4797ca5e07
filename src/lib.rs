//! Resume screening service: deterministic signal extraction, weighted
//! criterion scoring, and comparative explanations behind an HTTP and CLI
//! surface.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
