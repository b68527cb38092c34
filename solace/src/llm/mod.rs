mod api;
pub mod prompts;
mod provider;

pub use api::{build_support_messages, LlmApiClient};
pub use prompts::UseCase;
pub use provider::LlmProvider;
