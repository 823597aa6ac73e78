//! Recording mocks for the tracker's collaborator traits.
//!
//! Each mock is `Clone` over shared state so a test can keep a handle after boxing one into
//! the components under test. Failures are scripted as a queue consumed one per call.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracker_core::{
    MessageId, Notifier, PublishedPage, Publisher, Result, TrackerError, Translator,
};

/// One recorded notifier call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { id: MessageId, text: String },
    Edit { id: MessageId, text: String },
}

impl Call {
    pub fn text(&self) -> &str {
        match self {
            Call::Send { text, .. } | Call::Edit { text, .. } => text,
        }
    }
}

#[derive(Default)]
struct NotifierState {
    calls: Vec<Call>,
    next_id: MessageId,
    send_failures: VecDeque<TrackerError>,
    send_attempts: usize,
    failing_send: Option<(usize, TrackerError)>,
    edit_failures: VecDeque<TrackerError>,
}

/// Records sends and edits; sent messages get ids 100, 101, ...
#[derive(Clone)]
pub struct MockNotifier {
    state: Arc<Mutex<NotifierState>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(NotifierState {
                next_id: 100,
                ..Default::default()
            })),
        }
    }

    /// Next send fails with `error` (queued; one per call).
    pub fn fail_next_send(&self, error: TrackerError) {
        self.state.lock().unwrap().send_failures.push_back(error);
    }

    /// Send attempt number `attempt` (1-based, counting failed attempts) fails with `error`.
    pub fn fail_send_attempt(&self, attempt: usize, error: TrackerError) {
        self.state.lock().unwrap().failing_send = Some((attempt, error));
    }

    pub fn fail_next_edit(&self, error: TrackerError) {
        self.state.lock().unwrap().edit_failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn sends(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<(MessageId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Edit { id, text } => Some((id, text)),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, text: &str) -> Result<MessageId> {
        let mut state = self.state.lock().unwrap();
        state.send_attempts += 1;
        let attempt = state.send_attempts;
        if matches!(&state.failing_send, Some((n, _)) if *n == attempt) {
            if let Some((_, error)) = state.failing_send.take() {
                return Err(error);
            }
        }
        if let Some(error) = state.send_failures.pop_front() {
            return Err(error);
        }
        let id = state.next_id;
        state.next_id += 1;
        state.calls.push(Call::Send {
            id,
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn edit(&self, message_id: MessageId, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.edit_failures.pop_front() {
            return Err(error);
        }
        state.calls.push(Call::Edit {
            id: message_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

/// Returns a fixed translation and counts calls.
#[derive(Clone)]
pub struct MockTranslator {
    translation: String,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn new(translation: &str) -> Self {
        Self {
            translation: translation.to_string(),
            inputs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.inputs.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> String {
        self.inputs.lock().unwrap().push(text.to_string());
        self.translation.clone()
    }
}

#[derive(Default)]
struct PublisherState {
    pages: Vec<(String, String)>,
    failures: VecDeque<TrackerError>,
}

/// Records `(title, html)` of every publish attempt and returns `https://telegra.ph/Page-{n}`.
#[derive(Clone, Default)]
pub struct MockPublisher {
    state: Arc<Mutex<PublisherState>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self, error: TrackerError) {
        self.state.lock().unwrap().failures.push_back(error);
    }

    /// Every attempt, failed ones included.
    pub fn attempts(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().pages.clone()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, title: &str, html: &str) -> Result<PublishedPage> {
        let mut state = self.state.lock().unwrap();
        state.pages.push((title.to_string(), html.to_string()));
        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }
        let n = state.pages.len();
        Ok(PublishedPage {
            url: format!("https://telegra.ph/Page-{n}"),
            path: format!("Page-{n}"),
        })
    }
}
