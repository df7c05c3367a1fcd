// Press-release generation
// Implements: category registry, prompt building, generation, section parsing,
// and the request pipeline shared by the HTML form and the JSON API.
// All LLM calls go through llm_client.

pub mod categories;
pub mod generator;
pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod sections;
