//! The HR chat pipeline: intent → context → prompt → model.

use crate::agents::{hr_assistant, persona};
use crate::error::Error;
use crate::models::settings::AssistantSettings;
use crate::providers::common::{ChatMessage, CompletionRequest, LanguageModel};
use crate::services::context::ContextBuilder;
use crate::services::directory::DirectoryService;
use crate::utils::string::{MAX_PREVIEW_LEN, safe_preview};
use std::sync::Arc;
use uuid::Uuid;

/// Reply used when no model credential is configured. Locally generated,
/// so the pipeline still produces an answer shaped like one.
const OFFLINE_REPLY: &str = "I could not reach the language model because no API credential is \
configured. I did gather the organizational context for your question, so please try again once \
a credential is set up.";

/// Reply used when the model call fails for any other reason.
const DEGRADED_REPLY: &str = "I ran into a problem generating a full answer just now. Please try \
asking again in a moment.";

/// Orchestrates one question end to end. Requests are independent; the
/// only shared state is the directory's advisory cache.
pub struct HrAssistant {
    directory: Arc<DirectoryService>,
    context_builder: ContextBuilder,
    provider: Arc<dyn LanguageModel>,
    settings: AssistantSettings,
}

impl HrAssistant {
    pub fn new(
        directory: Arc<DirectoryService>,
        provider: Arc<dyn LanguageModel>,
        settings: AssistantSettings,
    ) -> Self {
        let context_builder = ContextBuilder::new(Arc::clone(&directory));
        Self {
            directory,
            context_builder,
            provider,
            settings,
        }
    }

    /// Answer a free-text HR question. Never fails: model faults degrade
    /// to a fixed local reply.
    pub async fn answer(&self, question: &str) -> String {
        let context = self.context_builder.build_context(question).await;

        let roster = self.directory.roster().await;
        let departments = self.directory.departments().await;
        let relationships = self.directory.relationships().await;

        let mut system_prompt =
            hr_assistant::render_org_prompt(&roster, &departments, &relationships);
        system_prompt.push_str(&hr_assistant::render_context(&context));

        tracing::debug!(
            question = %safe_preview(question, MAX_PREVIEW_LEN),
            summary = %context.summary,
            "assembled question context"
        );

        let request = CompletionRequest::from_settings(
            &self.settings,
            vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(question),
            ],
        );

        match self.provider.complete(request).await {
            Ok(reply) => reply,
            Err(Error::MissingCredentials(reason)) => {
                tracing::info!(reason, "language model unavailable, using offline reply");
                if context.summary.is_empty() {
                    OFFLINE_REPLY.to_string()
                } else {
                    format!("{} Context gathered: {}.", OFFLINE_REPLY, context.summary)
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "language model call failed");
                DEGRADED_REPLY.to_string()
            }
        }
    }

    /// The system prompt for chatting as one person, with that person's
    /// stored settings resolved. Always yields a prompt: a person that
    /// cannot be loaded gets the fixed fallback sentence.
    pub async fn person_system_prompt(&self, person_id: Uuid) -> String {
        let settings = self.directory.assistant_settings(person_id).await;

        match self.directory.person_prompt_data(person_id).await {
            Some(data) => persona::render_person_prompt(&data, &settings),
            None => persona::FALLBACK_PROMPT.to_string(),
        }
    }
}
