// Course outline generation: prompt in, structured outline out.
// All LLM calls go through the `CompletionService` port in llm_client.

pub mod cleaning;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
