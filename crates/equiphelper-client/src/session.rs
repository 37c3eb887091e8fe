use std::path::{Path, PathBuf};

use equiphelper_types::{AskRequest, ChatMessage};

use crate::backend::AskBackend;
use crate::catalog::{Equipment, EquipmentCatalog};
use crate::conversation::{Conversation, FALLBACK_REPLY};
use crate::export::{export_conversation, ExportError};
use crate::storage::ConversationStorage;

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text
    Ignored,
    /// Reply appended; carries the image reference the service matched
    Answered { image_url: Option<String> },
    /// Fallback reply appended
    Failed,
}

/// Client-side conversation controller
///
/// Owns the visible messages and keeps them mirrored into storage after
/// every change. Storage failures are logged and never surface to the user.
///
/// Submitting borrows the session mutably, so at most one request is in
/// flight. A submission dropped before its reply arrived is closed with the
/// fallback reply when the next one starts.
pub struct ChatSession<B, S> {
    backend: B,
    storage: S,
    catalog: EquipmentCatalog,
    conversation: Conversation,
    session_id: Option<String>,
    selected: Option<Equipment>,
    draft: String,
    awaiting_reply: bool,
}

impl<B: AskBackend, S: ConversationStorage> ChatSession<B, S> {
    /// Restores the stored conversation or starts with the greeting
    pub fn open(backend: B, storage: S, catalog: EquipmentCatalog) -> Self {
        let conversation = match storage.load() {
            Ok(Some(messages)) => Conversation::restored(messages),
            Ok(None) => Conversation::fresh(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored conversation");
                Conversation::fresh()
            }
        };
        tracing::debug!(
            messages = conversation.len(),
            first_visit = conversation.is_first_visit(),
            "Conversation opened"
        );

        Self {
            backend,
            storage,
            catalog,
            conversation,
            session_id: None,
            selected: None,
            draft: String::new(),
            awaiting_reply: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    pub fn is_first_visit(&self) -> bool {
        self.conversation.is_first_visit()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn selected_equipment(&self) -> Option<Equipment> {
        self.selected
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Questions offered for the selected category, empty when none is selected
    pub fn predefined_questions(&self) -> &[String] {
        match self.selected {
            Some(equipment) => self.catalog.questions(equipment),
            None => &[],
        }
    }

    pub fn select_equipment(&mut self, equipment: Option<Equipment>) {
        self.selected = equipment;
        self.draft.clear();
    }

    /// Submits the current draft
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        self.submit_question(&text).await
    }

    pub async fn select_predefined_question(&mut self, question: &str) -> SubmitOutcome {
        self.draft = question.to_string();
        self.submit_question(question).await
    }

    pub async fn submit_question(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        self.close_interrupted();

        self.conversation.push_user(text);
        self.awaiting_reply = true;
        self.persist();
        self.draft.clear();

        let mut request = AskRequest::new(text);
        if let Some(session_id) = &self.session_id {
            request = request.with_session(session_id.clone());
        }

        let outcome = match self.backend.ask(request).await {
            Ok(response) => {
                self.session_id = Some(response.session_id);
                self.conversation.push_ai(response.answer);
                SubmitOutcome::Answered {
                    image_url: response.image_url,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Answer request failed");
                self.conversation.push_ai(FALLBACK_REPLY);
                SubmitOutcome::Failed
            }
        };

        self.awaiting_reply = false;
        self.persist();
        outcome
    }

    /// Back to the greeting alone with nothing persisted and a new server session
    pub fn clear_history(&mut self) {
        self.conversation.reset();
        self.session_id = None;
        self.awaiting_reply = false;
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Failed to clear stored conversation");
        }
    }

    pub fn export_to_document(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_conversation(self.conversation.messages(), dir)
    }

    /// Answers a user message left without reply by a dropped submission
    fn close_interrupted(&mut self) {
        if !self.awaiting_reply {
            return;
        }
        tracing::warn!("Previous question was interrupted before its reply");
        self.conversation.push_ai(FALLBACK_REPLY);
        self.awaiting_reply = false;
        self.persist();
    }

    fn persist(&self) {
        if self.conversation.is_empty() {
            return;
        }
        if let Err(e) = self.storage.save(self.conversation.messages()) {
            tracing::warn!(error = %e, "Failed to store conversation");
        }
    }
}
