use std::sync::Arc;
use std::time::{Duration, Instant};

use equiphelper_llm::{ChatClient, ChatOptions, ChatRequest};
use equiphelper_persist::{TranscriptStore, Turn};
use equiphelper_types::AskResponse;
use futures::future::try_join_all;
use serde_json::Value;

use crate::config::Config;
use super::deadline::{with_deadline, CallOutcome};
use super::error::{AnswerError, Stage};
use super::image::find_image_url;
use super::prompt::{build_context, normalize_answer, render_prompt};
use super::reference::ReferenceFetcher;

/// Tunables for answering a question
#[derive(Debug, Clone)]
pub struct AnswerSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub sources: Vec<String>,
    pub max_context_chars: usize,
    pub fetch_timeout: Duration,
    pub llm_timeout: Duration,
}

impl From<&Config> for AnswerSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
            sources: config.reference.sources.clone(),
            max_context_chars: config.reference.max_context_chars,
            fetch_timeout: config.reference.timeout(),
            llm_timeout: config.llm.timeout(),
        }
    }
}

/// Answers equipment questions from reference data and the session transcript
pub struct AnswerService {
    llm_client: Arc<dyn ChatClient>,
    fetcher: Arc<dyn ReferenceFetcher>,
    store: Arc<dyn TranscriptStore>,
    settings: AnswerSettings,
}

impl AnswerService {
    pub fn new(
        llm_client: Arc<dyn ChatClient>,
        fetcher: Arc<dyn ReferenceFetcher>,
        store: Arc<dyn TranscriptStore>,
        settings: AnswerSettings,
    ) -> Self {
        Self {
            llm_client,
            fetcher,
            store,
            settings,
        }
    }
    
    pub fn settings(&self) -> &AnswerSettings {
        &self.settings
    }
    
    pub fn store(&self) -> &Arc<dyn TranscriptStore> {
        &self.store
    }
    
    /// Answer `question` within the given session, starting a new session when none is supplied
    /// 
    /// The transcript is only extended once an answer has been produced.
    pub async fn answer(
        &self,
        question: &str,
        session_id: Option<&str>,
    ) -> Result<AskResponse, AnswerError> {
        let session_id = match session_id.filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                tracing::debug!(session_id = %id, "Starting new session");
                id
            }
        };
        
        let history = self.store.get(&session_id).await?;
        
        let documents = self.fetch_references().await?;
        let context = build_context(&documents, self.settings.max_context_chars);
        let prompt = render_prompt(&context, &history.join("\n"), question);
        
        let raw = self.complete(prompt).await?;
        let answer = normalize_answer(&raw);
        
        let image_url = find_image_url(&documents, question);
        
        self.store
            .append(&session_id, Turn::new(question, answer.clone()))
            .await?;
        
        tracing::info!(
            session_id = %session_id,
            history_lines = history.len(),
            has_image = image_url.is_some(),
            "Question answered"
        );
        
        Ok(AskResponse {
            answer,
            image_url,
            session_id,
        })
    }
    
    /// Fetch every configured source concurrently; any failure fails the whole set
    async fn fetch_references(&self) -> Result<Vec<Value>, AnswerError> {
        let budget = self.settings.fetch_timeout;
        let fetches = self.settings.sources.iter().map(|url| async move {
            let started = Instant::now();
            match with_deadline(budget, self.fetcher.fetch(url)).await {
                CallOutcome::Success(document) => Ok(document),
                CallOutcome::Timeout => Err(AnswerError::Timeout {
                    stage: Stage::ReferenceFetch,
                    elapsed_ms: started.elapsed().as_millis(),
                }),
                CallOutcome::Error(source) => Err(AnswerError::ReferenceFetch {
                    url: url.clone(),
                    source,
                }),
            }
        });
        
        try_join_all(fetches).await
    }
    
    async fn complete(&self, prompt: String) -> Result<String, AnswerError> {
        let mut options = ChatOptions::new().temperature(self.settings.temperature);
        if let Some(max_tokens) = self.settings.max_tokens {
            options = options.max_tokens(max_tokens);
        }
        let request = ChatRequest::prompt(self.settings.model.clone(), prompt).with_options(options);
        
        let started = Instant::now();
        match with_deadline(self.settings.llm_timeout, self.llm_client.chat(request)).await {
            CallOutcome::Success(response) => {
                tracing::debug!(
                    duration_ms = started.elapsed().as_millis() as u64,
                    finish_reason = ?response.finish_reason,
                    "Completion received"
                );
                response.content.ok_or(AnswerError::EmptyAnswer)
            }
            CallOutcome::Timeout => Err(AnswerError::Timeout {
                stage: Stage::Completion,
                elapsed_ms: started.elapsed().as_millis(),
            }),
            CallOutcome::Error(e) => Err(AnswerError::Llm(e)),
        }
    }
}
