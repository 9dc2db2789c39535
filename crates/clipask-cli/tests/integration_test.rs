//! Integration tests for clipask.
//!
//! These run the ask pipeline end to end against mock collaborators, without
//! an X display or an API key.

use clipask_cli::cli::Invocation;
use clipask_cli::commands::ask::{request_prompt, AskPipeline};
use clipask_core::{ClipaskError, Config, ConversationStore, UserIntent};
use clipask_desktop::{CaptureError, ContextReader, ContextSource, DeliveryError, ReplySink};
use clipask_provider::*;

use async_trait::async_trait;
use std::sync::Mutex;
use tempfile::TempDir;

// -- Mock collaborators --

struct MockReader {
    fail: bool,
    reads: Mutex<Vec<ContextSource>>,
}

impl MockReader {
    fn new() -> Self {
        Self {
            fail: false,
            reads: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContextReader for MockReader {
    async fn read(&self, source: ContextSource) -> Result<String, CaptureError> {
        self.reads.lock().unwrap().push(source);
        if self.fail {
            return Err(CaptureError::Exit {
                tool: "xclip".to_string(),
                code: 1,
                stderr: "Error: Can't open display".to_string(),
            });
        }
        Ok(format!("<{source}>"))
    }
}

struct MockTransport {
    fail: bool,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            fail: false,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn current_model(&self) -> &str {
        "mock-model"
    }

    fn set_model(&mut self, _model: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        if self.fail {
            return Err(TransportError::Api {
                status: 401,
                body: "invalid api key".to_string(),
            });
        }
        Ok(Response {
            text: format!("reply {n}"),
            model: "mock-model".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

#[derive(Default)]
struct MockSink {
    delivered: Mutex<Vec<(String, bool)>>,
}

#[async_trait]
impl ReplySink for MockSink {
    async fn deliver(&self, text: &str, to_clipboard: bool) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .unwrap()
            .push((text.to_string(), to_clipboard));
        Ok(())
    }
}

fn config() -> Config {
    Config {
        system_prompt: "sys".to_string(),
        ..Default::default()
    }
}

// -- Tests --

#[tokio::test]
async fn test_clipboard_mode_opens_reply_in_editor() {
    let (reader, transport, sink, config) =
        (MockReader::new(), MockTransport::new(), MockSink::default(), config());
    let intent = UserIntent::context_only(Invocation::Clipboard.default_source());

    let reply = AskPipeline::new(&reader, &transport, &sink, &config)
        .run(&intent, &request_prompt(Invocation::Clipboard, &intent))
        .await
        .unwrap();
    assert_eq!(reply, "reply 1");

    assert_eq!(*reader.reads.lock().unwrap(), vec![ContextSource::ClipboardPrimary]);

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].store);
    assert_eq!(requests[0].messages[0].role, "system");
    assert_eq!(requests[0].messages[0].content, "sys");
    assert_eq!(requests[0].messages[1].role, "user");
    assert_eq!(requests[0].messages[1].content, "<clipboard>");

    assert_eq!(
        *sink.delivered.lock().unwrap(),
        vec![("reply 1".to_string(), false)]
    );
}

#[tokio::test]
async fn test_floating_directives_route_reply() {
    let (reader, transport, sink, config) =
        (MockReader::new(), MockTransport::new(), MockSink::default(), config());
    let intent = UserIntent::confirmed("/c /s what does this do?");

    AskPipeline::new(&reader, &transport, &sink, &config)
        .run(&intent, &request_prompt(Invocation::Floating, &intent))
        .await
        .unwrap();

    assert_eq!(*reader.reads.lock().unwrap(), vec![ContextSource::Selection]);
    let requests = transport.requests.lock().unwrap();
    assert_eq!(
        requests[0].messages[1].content,
        "what does this do?\n<selection>"
    );
    assert_eq!(
        *sink.delivered.lock().unwrap(),
        vec![("reply 1".to_string(), true)]
    );
}

#[tokio::test]
async fn test_capture_failure_stops_before_sending() {
    let mut reader = MockReader::new();
    reader.fail = true;
    let (transport, sink, config) = (MockTransport::new(), MockSink::default(), config());
    let intent = UserIntent::context_only(ContextSource::Selection);

    let err = AskPipeline::new(&reader, &transport, &sink, &config)
        .run(&intent, "")
        .await
        .unwrap_err();
    assert!(matches!(err, ClipaskError::Capture(CaptureError::Exit { code: 1, .. })));
    assert!(transport.requests.lock().unwrap().is_empty());
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_failure_delivers_nothing() {
    let mut transport = MockTransport::new();
    transport.fail = true;
    let (reader, sink, config) = (MockReader::new(), MockSink::default(), config());
    let intent = UserIntent::context_only(ContextSource::ClipboardPrimary);

    let err = AskPipeline::new(&reader, &transport, &sink, &config)
        .run(&intent, "")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClipaskError::Transport(TransportError::Api { status: 401, .. })
    ));
    assert!(sink.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_history_carries_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let (reader, transport, sink, config) =
        (MockReader::new(), MockTransport::new(), MockSink::default(), config());
    let intent = UserIntent::context_only(ContextSource::ClipboardPrimary);

    for _ in 0..2 {
        AskPipeline::new(&reader, &transport, &sink, &config)
            .with_history(&path)
            .run(&intent, "")
            .await
            .unwrap();
    }

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[0].messages.len(), 2);
    assert_eq!(requests[1].messages.len(), 4);
    assert_eq!(requests[1].messages[2].role, "assistant");
    assert_eq!(requests[1].messages[2].content, "reply 1");

    let saved = ConversationStore::load(&path, "sys", config.max_history).unwrap();
    assert_eq!(saved.len(), 5);
    assert_eq!(saved.messages()[4].content(), "reply 2");
}

#[tokio::test]
async fn test_history_window_is_bounded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let (reader, transport, sink) = (MockReader::new(), MockTransport::new(), MockSink::default());
    let config = Config {
        max_history: 4,
        ..config()
    };
    let intent = UserIntent::context_only(ContextSource::ClipboardPrimary);

    for _ in 0..6 {
        AskPipeline::new(&reader, &transport, &sink, &config)
            .with_history(&path)
            .run(&intent, "")
            .await
            .unwrap();
    }

    for request in transport.requests.lock().unwrap().iter() {
        assert_eq!(request.messages[0].content, "sys");
        assert!(request.messages.len() <= config.max_history + 1);
    }
}

#[tokio::test]
async fn test_corrupt_history_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not json").unwrap();
    let (reader, transport, sink, config) =
        (MockReader::new(), MockTransport::new(), MockSink::default(), config());
    let intent = UserIntent::context_only(ContextSource::ClipboardPrimary);

    AskPipeline::new(&reader, &transport, &sink, &config)
        .with_history(&path)
        .run(&intent, "")
        .await
        .unwrap();

    assert_eq!(transport.requests.lock().unwrap()[0].messages.len(), 2);
    let saved = ConversationStore::load(&path, "sys", config.max_history).unwrap();
    assert_eq!(saved.len(), 3);
}
