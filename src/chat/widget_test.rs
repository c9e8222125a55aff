use super::*;
use crate::i18n;
use crate::llm::LlmComplete;
use crate::llm::types::LlmError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

// =========================================================================
// Mocks
// =========================================================================

/// Answers `re: <message>`, yielding first so concurrent sends can interleave.
struct EchoLlm;

#[async_trait::async_trait]
impl LlmComplete for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        let message = prompt
            .rsplit("Current user message: ")
            .next()
            .unwrap_or_default();
        Ok(format!("re: {message}"))
    }
}

/// Fails with a non-success status.
struct FailingLlm;

#[async_trait::async_trait]
impl LlmComplete for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::ApiResponse { status: 500, body: "internal".into() })
    }
}

/// Holds every call until `release` is notified.
struct BlockingLlm {
    release: Notify,
}

#[async_trait::async_trait]
impl LlmComplete for BlockingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.release.notified().await;
        Ok("released".into())
    }
}

fn widget_with(llm: Arc<dyn LlmComplete>) -> Arc<ChatWidget> {
    Arc::new(ChatWidget::new(Uuid::new_v4(), CompletionGateway::new(Some(llm))))
}

async fn wait_for_len(widget: &ChatWidget, len: usize) {
    while widget.messages().await.len() < len {
        tokio::task::yield_now().await;
    }
}

// =========================================================================
// open / close
// =========================================================================

#[tokio::test]
async fn opening_empty_widget_seeds_pt_welcome() {
    let widget = widget_with(Arc::new(EchoLlm));
    widget.open(Language::Pt).await;

    assert!(widget.is_open().await);
    assert_eq!(widget.messages().await, vec![Message::assistant(i18n::welcome(Language::Pt))]);
}

#[tokio::test]
async fn reopening_does_not_seed_again() {
    let widget = widget_with(Arc::new(EchoLlm));
    assert!(widget.toggle(Language::En).await);
    assert!(!widget.toggle(Language::En).await);
    assert!(widget.toggle(Language::Es).await);

    let messages = widget.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, i18n::welcome(Language::En));
}

#[tokio::test]
async fn new_widget_is_closed_and_empty() {
    let widget = widget_with(Arc::new(EchoLlm));
    let view = widget.view().await;
    assert!(!view.open);
    assert!(view.messages.is_empty());
    assert_eq!(view.composition, "");
    assert_eq!(view.id, widget.id());
}

// =========================================================================
// send
// =========================================================================

#[tokio::test]
async fn send_appends_user_then_reply() {
    let widget = widget_with(Arc::new(EchoLlm));
    widget.open(Language::En).await;
    widget.update_composition("Do you integrate with Instagram?").await;

    let outcome = widget.send(Language::En).await.unwrap();
    assert_eq!(outcome.user_index, 1);
    assert_eq!(outcome.reply_index, 2);
    assert!(outcome.user_index < outcome.reply_index);
    assert_eq!(outcome.reply, "re: Do you integrate with Instagram?");

    let messages = widget.messages().await;
    assert_eq!(messages[1], Message::user("Do you integrate with Instagram?"));
    assert_eq!(messages[2], Message::assistant("re: Do you integrate with Instagram?"));
    assert_eq!(widget.composition().await, "");
}

#[tokio::test]
async fn send_blank_composition_is_rejected() {
    let widget = widget_with(Arc::new(EchoLlm));
    widget.update_composition("   ").await;

    assert!(matches!(widget.send(Language::En).await, Err(ChatError::EmptyMessage)));
    assert!(widget.messages().await.is_empty());
    assert_eq!(widget.composition().await, "   ");
}

#[tokio::test]
async fn send_text_clears_composition() {
    let widget = widget_with(Arc::new(EchoLlm));
    widget.update_composition("half-typed").await;

    widget.send_text("hello", Language::En).await.unwrap();
    assert_eq!(widget.composition().await, "");
}

#[tokio::test]
async fn failed_completion_appends_es_fallback() {
    let widget = widget_with(Arc::new(FailingLlm));

    widget
        .send_text("Quero agendar uma demonstração", Language::Es)
        .await
        .unwrap();

    assert_eq!(
        widget.messages().await,
        vec![
            Message::user("Quero agendar uma demonstração"),
            Message::assistant(i18n::connection_fallback(Language::Es)),
        ]
    );
}

#[tokio::test]
async fn user_message_visible_before_reply_resolves() {
    let llm = Arc::new(BlockingLlm { release: Notify::new() });
    let widget = widget_with(llm.clone());

    let pending = tokio::spawn({
        let widget = Arc::clone(&widget);
        async move { widget.send_text("Hi", Language::En).await }
    });

    wait_for_len(&widget, 1).await;
    assert_eq!(widget.messages().await, vec![Message::user("Hi")]);

    llm.release.notify_one();
    pending.await.unwrap().unwrap();
    assert_eq!(widget.messages().await, vec![Message::user("Hi"), Message::assistant("released")]);
}

#[tokio::test]
async fn reply_after_close_is_still_appended() {
    let llm = Arc::new(BlockingLlm { release: Notify::new() });
    let widget = widget_with(llm.clone());
    widget.open(Language::En).await;

    let pending = tokio::spawn({
        let widget = Arc::clone(&widget);
        async move { widget.send_text("Hi", Language::En).await }
    });
    wait_for_len(&widget, 2).await;

    widget.close().await;
    llm.release.notify_one();
    pending.await.unwrap().unwrap();

    assert!(!widget.is_open().await);
    assert_eq!(widget.messages().await.len(), 3);
}

#[tokio::test]
async fn back_to_back_sends_are_serialized() {
    let widget = widget_with(Arc::new(EchoLlm));

    let (first, second) = tokio::join!(widget.send_text("Hi", Language::En), widget.send_text("Hi", Language::En));
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_eq!((first.user_index, first.reply_index), (0, 1));
    assert_eq!((second.user_index, second.reply_index), (2, 3));
    assert_eq!(
        widget.messages().await,
        vec![
            Message::user("Hi"),
            Message::assistant("re: Hi"),
            Message::user("Hi"),
            Message::assistant("re: Hi"),
        ]
    );
}

#[tokio::test]
async fn concurrent_sends_keep_send_order() {
    let widget = widget_with(Arc::new(EchoLlm));

    let (a, b, c) = tokio::join!(
        widget.send_text("one", Language::En),
        widget.send_text("two", Language::En),
        widget.send_text("three", Language::En),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());

    let texts: Vec<String> = widget
        .messages()
        .await
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, ["one", "re: one", "two", "re: two", "three", "re: three"]);
}

#[tokio::test]
async fn dropped_send_still_appends_its_reply() {
    let llm = Arc::new(BlockingLlm { release: Notify::new() });
    let widget = widget_with(llm.clone());

    let dropped = tokio::time::timeout(Duration::from_millis(50), widget.send_text("first", Language::En)).await;
    assert!(dropped.is_err());
    assert_eq!(widget.messages().await, vec![Message::user("first")]);
    assert!(widget.is_sending());

    llm.release.notify_one();
    wait_for_len(&widget, 2).await;
    assert_eq!(widget.messages().await, vec![Message::user("first"), Message::assistant("released")]);
}

#[tokio::test]
async fn send_after_dropped_send_waits_for_its_reply() {
    let llm = Arc::new(BlockingLlm { release: Notify::new() });
    let widget = widget_with(llm.clone());

    let dropped = tokio::time::timeout(Duration::from_millis(50), widget.send_text("first", Language::En)).await;
    assert!(dropped.is_err());

    let next = tokio::spawn({
        let widget = Arc::clone(&widget);
        async move { widget.send_text("second", Language::En).await }
    });
    tokio::task::yield_now().await;
    assert_eq!(widget.messages().await.len(), 1);

    llm.release.notify_one();
    wait_for_len(&widget, 3).await;
    llm.release.notify_one();
    let outcome = next.await.unwrap().unwrap();
    assert_eq!((outcome.user_index, outcome.reply_index), (2, 3));

    let texts: Vec<String> = widget
        .messages()
        .await
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, ["first", "released", "second", "released"]);
}

#[tokio::test]
async fn idle_widget_is_not_sending() {
    let widget = widget_with(Arc::new(EchoLlm));
    assert!(!widget.is_sending());
    widget.send_text("Hi", Language::En).await.unwrap();
    assert!(!widget.is_sending());
}
