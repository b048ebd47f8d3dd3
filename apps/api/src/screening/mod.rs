// Resume screening engine.
// Implements: text extraction, prompt construction, LLM scoring, reply parsing,
// batch orchestration, and CSV export.
// All LLM traffic goes through the scoring transport — no direct Groq calls here.

pub mod document;
pub mod export;
pub mod extraction;
pub mod orchestrator;
pub mod parser;
pub mod prompts;
pub mod records;
pub mod scoring;
pub mod session;
pub mod transport;
