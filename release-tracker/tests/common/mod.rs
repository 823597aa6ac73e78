#![allow(dead_code)]

pub mod mocks;

use std::sync::Arc;

use release_tracker::{Product, ProductComponents, StateStore};
use storage::InMemoryKvStore;
use tracker_core::RetryPolicy;

use mocks::{MockNotifier, MockPublisher, MockTranslator};

/// Handles kept by a test after the mocks are boxed into [`ProductComponents`].
pub struct Harness {
    pub components: ProductComponents,
    pub notifier: MockNotifier,
    pub publisher: MockPublisher,
    pub translator: MockTranslator,
    pub kv: Arc<InMemoryKvStore>,
}

/// Components over recording mocks and an in-memory store; retries do not wait.
pub fn harness(product: Product, translation: &str) -> Harness {
    let notifier = MockNotifier::new();
    let publisher = MockPublisher::new();
    let translator = MockTranslator::new(translation);
    let kv = Arc::new(InMemoryKvStore::new());
    let components = ProductComponents {
        product,
        notifier: Box::new(notifier.clone()),
        publisher: Box::new(publisher.clone()),
        translator: Box::new(translator.clone()),
        state: StateStore::new(kv.clone()),
        retry: RetryPolicy::fixed(3, std::time::Duration::ZERO),
    };
    Harness {
        components,
        notifier,
        publisher,
        translator,
        kv,
    }
}

/// `lines` bullet lines of plain English text, no MarkdownV2 specials after cleaning.
pub fn english_body(lines: usize) -> String {
    (0..lines)
        .map(|_| "- Fixed issue with session handling")
        .collect::<Vec<_>>()
        .join("\n")
}

/// `lines` bullet lines of Chinese text.
pub fn chinese_body(lines: usize) -> String {
    (0..lines)
        .map(|_| "- 修复了会话处理的问题")
        .collect::<Vec<_>>()
        .join("\n")
}
