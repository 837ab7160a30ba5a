use async_trait::async_trait;
use retail_banking_chain::{
    Error, Result,
    llm::{InferenceRequest, LlmClient},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock LLM client that records every request and replays queued replies.
#[derive(Debug, Clone)]
pub struct MockLlmClient {
    pub name: String,
    pub responses: Arc<Mutex<VecDeque<Result<String>>>>,
    pub requests: Arc<Mutex<Vec<InferenceRequest>>>,
}

impl MockLlmClient {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn with_error(self, error: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(Error::llm(error.to_string())));
        self
    }

    pub fn get_requests(&self) -> Vec<InferenceRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn backend_name(&self) -> &str {
        &self.name
    }

    async fn try_generate(&self, request: &InferenceRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::llm("No more mock responses available")))
    }
}
