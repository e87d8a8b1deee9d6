//! AI edit gateway: the integration boundary to the external generative
//! text service.

mod client;
mod models;
mod prompt;
mod sanitize;
mod service;
mod types;

pub use client::{ClientError, ClientResult, GenerativeClient};
pub use models::{AppliedAction, ChatMessage, Role};
pub use prompt::{FileKind, edit_prompt, generate_prompt, infer_file_kind};
pub use sanitize::clean_code;
pub use service::{AssistantReply, AssistantService, SubmitError};
pub use types::GenerationConfig;
