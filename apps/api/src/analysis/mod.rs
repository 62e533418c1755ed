// Résumé analysis pipeline.
// Implements: PDF text extraction, ATS prompt composition, remote evaluation, verdict rendering.
// All LLM calls go through llm_client, never direct HTTP calls to the model here.

pub mod extractor;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod verdict;

#[cfg(test)]
pub(crate) mod fixtures;
