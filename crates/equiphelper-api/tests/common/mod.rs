#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use equiphelper_api::config::Config;
use equiphelper_api::router;
use equiphelper_api::service::{AnswerService, AnswerSettings, ReferenceFetcher};
use equiphelper_api::state::AppState;
use equiphelper_llm::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use equiphelper_persist::{InMemoryTranscriptStore, TranscriptStore};
use serde_json::Value;
use tower::ServiceExt;

pub const HELMET_SOURCE: &str = "http://reference.test/helmet.json";
pub const BOOTS_SOURCE: &str = "http://reference.test/boots.json";

/// Chat client that replies with canned text and records every prompt
pub struct FakeLlm {
    reply: Mutex<Box<dyn FnMut(usize) -> anyhow::Result<String> + Send>>,
    pub prompts: Mutex<Vec<String>>,
    pub options: Mutex<Vec<ChatOptions>>,
    delay: Option<Duration>,
    no_text: bool,
}

impl FakeLlm {
    pub fn replying(text: &'static str) -> Arc<Self> {
        Self::with(move |_| Ok(text.to_string()))
    }

    pub fn numbered() -> Arc<Self> {
        Self::with(|n| Ok(format!("answer {}", n + 1)))
    }

    pub fn failing() -> Arc<Self> {
        Self::with(|_| Err(anyhow::anyhow!("OpenAI API error (500): upstream down")))
    }

    /// Answers only after `delay`
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::build(|_| Ok("too late".to_string()))
        })
    }

    /// Completes without any message content
    pub fn silent() -> Arc<Self> {
        Arc::new(Self {
            no_text: true,
            ..Self::build(|_| Ok(String::new()))
        })
    }

    pub fn with(reply: impl FnMut(usize) -> anyhow::Result<String> + Send + 'static) -> Arc<Self> {
        Arc::new(Self::build(reply))
    }

    fn build(reply: impl FnMut(usize) -> anyhow::Result<String> + Send + 'static) -> Self {
        Self {
            reply: Mutex::new(Box::new(reply)),
            prompts: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
            delay: None,
            no_text: false,
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn options(&self) -> Vec<ChatOptions> {
        self.options.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for FakeLlm {
    async fn chat(&self, request: ChatRequest) -> anyhow::Result<ChatResponse> {
        let prompt = request.last_content().unwrap_or_default().to_string();
        self.options.lock().unwrap().push(request.options);
        let index = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt);
            prompts.len() - 1
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let text = {
            let mut reply = self.reply.lock().unwrap();
            (&mut **reply)(index)?
        };
        if self.no_text {
            return Ok(ChatResponse::default());
        }
        Ok(ChatResponse::text(text))
    }
}

/// Reference fetcher serving documents from memory
pub struct FakeFetcher {
    documents: HashMap<String, Value>,
    delay: Option<Duration>,
}

impl FakeFetcher {
    pub fn new(documents: impl IntoIterator<Item = (&'static str, Value)>) -> Arc<Self> {
        Arc::new(Self {
            documents: documents
                .into_iter()
                .map(|(url, doc)| (url.to_string(), doc))
                .collect(),
            delay: None,
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            documents: standard_documents()
                .into_iter()
                .map(|(url, doc)| (url.to_string(), doc))
                .collect(),
            delay: Some(delay),
        })
    }
}

#[async_trait]
impl ReferenceFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> anyhow::Result<Value> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused: {}", url))
    }
}

pub fn standard_documents() -> Vec<(&'static str, Value)> {
    vec![
        (
            HELMET_SOURCE,
            serde_json::json!({
                "keywords": ["helmet", "faceshield"],
                "imageUrl": "/PPE Images/helmet.png",
                "care": "Wash the shell with mild soap."
            }),
        ),
        (
            BOOTS_SOURCE,
            serde_json::json!([
                {"keywords": ["boots"], "imageUrl": "/PPE Images/boots.png"}
            ]),
        ),
    ]
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.reference.sources = vec![HELMET_SOURCE.to_string(), BOOTS_SOURCE.to_string()];
    config.reference.timeout_ms = 50;
    config.llm.timeout_ms = 500;
    config
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryTranscriptStore>,
}

pub fn spawn_app(llm: Arc<FakeLlm>, fetcher: Arc<FakeFetcher>) -> TestApp {
    spawn_app_with(test_config(), llm, fetcher)
}

pub fn spawn_app_with(config: Config, llm: Arc<FakeLlm>, fetcher: Arc<FakeFetcher>) -> TestApp {
    let store = Arc::new(InMemoryTranscriptStore::new());
    let answers = AnswerService::new(
        llm,
        fetcher,
        store.clone() as Arc<dyn TranscriptStore>,
        AnswerSettings::from(&config),
    );
    let state = Arc::new(AppState::new(config, answers));
    TestApp {
        router: router(state),
        store,
    }
}

pub async fn post_json(router: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(router, req).await
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, req).await
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = router.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
