//! Recommendation flow: wizard answers → prompt → LLM → college cards.

pub mod currency;
pub mod extractor;
pub mod handlers;
pub mod preferences;
pub mod prompts;
pub mod wizard;
