use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::types::{ChatMessage, LlmError, LlmProvider, LlmResponse};

type ReplyFn = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

/// Провайдер для тестов: ответ вычисляется по тексту промпта
pub struct ScriptedProvider {
    reply: Box<ReplyFn>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<F>(reply: F) -> Self
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Всегда отвечает одним и тем же текстом
    pub fn constant(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<LlmResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt.clone());

        let content = (self.reply)(&prompt)?;
        Ok(LlmResponse {
            content,
            tokens_used: None,
            model: "scripted".to_string(),
            finish_reason: Some("end_turn".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "Scripted"
    }
}
