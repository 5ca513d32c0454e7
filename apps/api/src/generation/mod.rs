// Resume, cover letter and portfolio generation.
// All remote calls go through llm_client::TextGenerator, wrapped by client::GenerationClient.

pub mod client;
pub mod document;
pub mod handlers;
pub mod profile;
pub mod prompts;
