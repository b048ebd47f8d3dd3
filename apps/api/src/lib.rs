//! Screener — LLM-assisted resume screening against a job description.
//!
//! The [`screening`] module is the core: it extracts text from uploaded
//! documents via an external extraction service, scores each resume with an
//! LLM-backed analyze call, parses the model output into a fixed record, and
//! exports the accumulated results as CSV. The remaining modules host the
//! service's own HTTP boundary (`POST /api/analyze`) that wraps the LLM
//! provider, consumed by the screening pipeline and by the web UI.

pub mod config;
pub mod errors;
pub mod llm_client;
pub mod routes;
pub mod screening;
pub mod state;
