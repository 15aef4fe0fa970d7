use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use mchat::prelude::*;
use mprovider::{DispatchReply, DispatchRequest, ProviderError, ProviderFuture};

#[derive(Default)]
struct ScriptedDispatcher {
    replies: Mutex<VecDeque<Result<DispatchReply, ProviderError>>>,
    requests: Mutex<Vec<DispatchRequest>>,
}

impl ScriptedDispatcher {
    fn new(replies: Vec<Result<DispatchReply, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            ..Self::default()
        })
    }

    fn requests(&self) -> Vec<DispatchRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl TextDispatcher for ScriptedDispatcher {
    fn dispatch<'a>(
        &'a self,
        request: DispatchRequest,
    ) -> ProviderFuture<'a, Result<DispatchReply, ProviderError>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            self.replies
                .lock()
                .expect("replies lock")
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::other("script exhausted")))
        })
    }
}

fn exhausted() -> ProviderError {
    let last = ProviderError::rate_limited("HTTP 429: RESOURCE_EXHAUSTED").with_status(429);
    ProviderError::exhausted(3, &last)
}

fn blocked() -> DispatchReply {
    DispatchReply::Blocked {
        reason: "SAFETY".to_string(),
    }
}

#[tokio::test]
async fn exhaustion_diverges_between_entry_points() {
    let dispatcher = ScriptedDispatcher::new(vec![Err(exhausted()), Err(exhausted())]);
    let service = MentorService::new(dispatcher.clone());

    let chat = service.send_message("help me plan", None).await;
    let outline = service.generate_outline("help me plan").await;

    assert!(!chat.is_empty());
    assert_eq!(chat, Notices::default().connectivity_failure);
    assert_eq!(outline, None);
    assert_eq!(dispatcher.requests().len(), 2);
}

#[tokio::test]
async fn safety_block_yields_safety_notice_on_both_entry_points() {
    let dispatcher = ScriptedDispatcher::new(vec![Ok(blocked()), Ok(blocked())]);
    let service = MentorService::new(dispatcher);

    assert_eq!(
        service.send_message("edgy", None).await,
        Notices::default().safety_block
    );
    assert_eq!(
        service.generate_outline("edgy").await,
        Some(Notices::default().safety_block)
    );
}

#[tokio::test]
async fn text_reply_is_returned_verbatim() {
    let dispatcher = ScriptedDispatcher::new(vec![
        Ok(DispatchReply::Text("Start with one habit.".to_string())),
        Ok(DispatchReply::Text("- Goal\n  * Step\n    + Action".to_string())),
    ]);
    let service = MentorService::new(dispatcher.clone());

    assert_eq!(
        service.send_message("where do I start?", None).await,
        "Start with one habit."
    );
    assert_eq!(
        service.generate_outline("habits").await.as_deref(),
        Some("- Goal\n  * Step\n    + Action")
    );

    let requests = dispatcher.requests();
    assert!(requests[0].prompt.ends_with("USER: where do I start?\n\nMENTOR:"));
    assert!(requests[1].prompt.contains("\"habits\""));
    assert!(requests.iter().all(|request| request.attachment.is_none()));
}

#[tokio::test]
async fn attachment_is_forwarded_with_chat_message() {
    let dispatcher =
        ScriptedDispatcher::new(vec![Ok(DispatchReply::Text("A whiteboard.".to_string()))]);
    let service = MentorService::new(dispatcher.clone());

    service
        .send_message(
            "what is in this photo?",
            Some(Attachment::from_bytes("image/jpeg", b"jpeg-bytes")),
        )
        .await;

    let requests = dispatcher.requests();
    let attachment = requests[0].attachment.as_ref().expect("attachment forwarded");
    assert_eq!(attachment.mime_type, "image/jpeg");
}

#[tokio::test]
async fn custom_notices_replace_defaults() {
    let dispatcher = ScriptedDispatcher::new(vec![Err(exhausted()), Ok(blocked())]);
    let service = MentorService::builder(dispatcher)
        .notices(
            Notices::default()
                .with_connectivity_failure("offline")
                .with_safety_block("blocked"),
        )
        .build();

    assert_eq!(service.send_message("a", None).await, "offline");
    assert_eq!(service.send_message("b", None).await, "blocked");
}

#[tokio::test]
async fn try_send_message_surfaces_exhaustion() {
    let dispatcher = ScriptedDispatcher::new(vec![Err(exhausted())]);
    let service = MentorService::new(dispatcher);

    let error = service
        .try_send_message("hello", None)
        .await
        .expect_err("exhaustion surfaces");

    assert_eq!(error.kind, ChatErrorKind::Provider);
    assert!(error.is_exhausted());
}
