//! Assistant service: one instruction in, at most one workspace mutation out.
//!
//! Coordinates inference, prompt construction, the external call, response
//! sanitization, and the apply policy. Every failure is converted into a
//! single assistant chat message at this boundary; nothing below it ever
//! leaves the workspace store partially mutated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::workspace::{WorkspaceFile, WorkspaceStore};

use super::client::GenerativeClient;
use super::models::{AppliedAction, ChatMessage, Role};
use super::prompt::{FileKind, edit_prompt, generate_prompt, infer_file_kind};
use super::sanitize::clean_code;

/// Greeting shown before any exchange has happened.
const GREETING: &str = "Hi! I'm your AI coding assistant. I can help you write, debug, and improve your code. What would you like to work on?";

/// Reply for endpoint or transport failures.
const ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Fixed substitute when the endpoint answers without usable text.
const EMPTY_REPLY: &str = "Sorry, I couldn't generate a response.";

/// Reply when no API key was configured; the gateway fails closed.
const NOT_CONFIGURED_REPLY: &str =
    "The assistant is not configured: set an API key and restart.";

/// Reply when the captured target file vanished while the call was in
/// flight.
const TARGET_GONE_REPLY: &str =
    "The file you were editing was closed before the result arrived, so nothing was applied.";

/// Sanitized output at or below this length is noise, not code.
const NOISE_THRESHOLD: usize = 2;

/// Errors rejected synchronously, before any message is logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The instruction was empty after trimming.
    #[error("instruction must not be blank")]
    BlankInstruction,

    /// Another call is still in flight; instructions are not queued.
    #[error("an assistant request is already in flight")]
    Busy,
}

/// Outcome of one accepted assistant invocation.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// The assistant message appended to the log for this exchange.
    pub message: ChatMessage,
    /// The workspace mutation performed, if any.
    pub action: AppliedAction,
}

/// The AI edit gateway service.
pub struct AssistantService {
    client: Option<GenerativeClient>,
    workspace: Arc<RwLock<WorkspaceStore>>,
    messages: RwLock<Vec<ChatMessage>>,
    busy: AtomicBool,
}

impl AssistantService {
    /// Create a new service.
    ///
    /// `client` is `None` when no API key was configured; submissions then
    /// fail closed with a configuration message instead of attempting HTTP.
    pub fn new(client: Option<GenerativeClient>, workspace: Arc<RwLock<WorkspaceStore>>) -> Self {
        Self {
            client,
            workspace,
            messages: RwLock::new(vec![ChatMessage::new(Role::Assistant, GREETING)]),
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a call is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The full exchange log, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    /// Handle one natural-language instruction.
    ///
    /// Performs at most one workspace mutation (create XOR update). The edit
    /// target is the active file captured here, at dispatch time; selection
    /// changes while the call is in flight do not redirect the result, and a
    /// target that disappears drops the edit.
    pub async fn submit(&self, instruction: &str) -> Result<AssistantReply, SubmitError> {
        let instruction = instruction.trim();
        if instruction.is_empty() {
            return Err(SubmitError::BlankInstruction);
        }

        let _guard = self.acquire()?;
        self.push(ChatMessage::new(Role::User, instruction)).await;

        let target: Option<WorkspaceFile> = self.workspace.read().await.active_file().cloned();

        let Some(client) = &self.client else {
            warn!("assistant invoked without an API key configured");
            return Ok(self.conclude(NOT_CONFIGURED_REPLY, AppliedAction::None).await);
        };

        let kind = infer_file_kind(instruction, target.as_ref());
        let prompt = match &target {
            Some(file) if !file.content.trim().is_empty() => edit_prompt(file, kind, instruction),
            _ => generate_prompt(kind, instruction),
        };

        let raw = match client.generate(&prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "generation request failed");
                return Ok(self.conclude(ERROR_REPLY, AppliedAction::None).await);
            }
        };

        let Some(raw) = raw else {
            return Ok(self.conclude(EMPTY_REPLY, AppliedAction::None).await);
        };

        let clean = clean_code(&raw);
        if clean.len() <= NOISE_THRESHOLD {
            info!(len = clean.len(), "generation produced a near-empty result, not applying");
            return Ok(self.conclude(EMPTY_REPLY, AppliedAction::None).await);
        }

        let action = self.apply(&clean, target.as_ref(), kind).await;
        if action == AppliedAction::None {
            return Ok(self.conclude(TARGET_GONE_REPLY, action).await);
        }
        Ok(self.conclude(&clean, action).await)
    }

    /// Apply clean code to the captured target, or create a new file.
    async fn apply(
        &self,
        clean: &str,
        target: Option<&WorkspaceFile>,
        kind: FileKind,
    ) -> AppliedAction {
        let mut workspace = self.workspace.write().await;
        match target {
            Some(file) => {
                if workspace.update_content(&file.id, clean) {
                    info!(file_id = %file.id, name = %file.name, "applied generated edit");
                    AppliedAction::Updated {
                        file_id: file.id.clone(),
                    }
                } else {
                    warn!(file_id = %file.id, "edit target vanished mid-flight, dropping result");
                    AppliedAction::None
                }
            }
            None => {
                let name = format!(
                    "generated-{}.{}",
                    Utc::now().timestamp_millis(),
                    kind.extension()
                );
                let file = workspace.create_file(&name, clean, Some(kind.language()));
                info!(file_id = %file.id, name = %file.name, "created generated file");
                AppliedAction::Created {
                    file_id: file.id.clone(),
                    name: file.name.clone(),
                }
            }
        }
    }

    /// Append the assistant's closing message and build the reply.
    async fn conclude(&self, content: &str, action: AppliedAction) -> AssistantReply {
        let message = ChatMessage::new(Role::Assistant, content);
        self.push(message.clone()).await;
        AssistantReply { message, action }
    }

    async fn push(&self, message: ChatMessage) {
        self.messages.write().await.push(message);
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, SubmitError> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SubmitError::Busy)?;
        Ok(BusyGuard(&self.busy))
    }
}

/// Clears the in-flight flag when the submission path unwinds, on every
/// outcome.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
