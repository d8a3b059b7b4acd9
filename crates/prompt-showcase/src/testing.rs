// MockService: scripted completion service for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use prompt_showcase_types::{BoxFuture, Completion, CompletionService, Error, Message};

/// A completion service that replays queued replies in FIFO order and
/// records every conversation it was sent.
pub struct MockService {
    name: String,
    replies: Mutex<VecDeque<Result<Completion, Error>>>,
    recorded: Mutex<Vec<Vec<Message>>>,
    call_count: AtomicUsize,
}

impl MockService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(VecDeque::new()),
            recorded: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Queue a successful reply carrying `text`.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_completion(Completion::text(text))
    }

    /// Queue a full completion.
    pub fn with_completion(self, completion: Completion) -> Self {
        self.replies.lock().unwrap().push_back(Ok(completion));
        self
    }

    /// Queue an error.
    pub fn with_error(self, error: Error) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Clone of every conversation passed to `complete()`, in call order.
    pub fn recorded_conversations(&self) -> Vec<Vec<Message>> {
        self.recorded.lock().unwrap().clone()
    }
}

impl CompletionService for MockService {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(
        &'a self,
        conversation: &'a [Message],
    ) -> BoxFuture<'a, Result<Completion, Error>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().unwrap().push(conversation.to_vec());
        let next = self.replies.lock().unwrap().pop_front();
        Box::pin(async move {
            next.unwrap_or_else(|| Err(Error::configuration("MockService: no replies queued")))
        })
    }
}
