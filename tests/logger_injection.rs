use std::sync::{Arc, Mutex};
use std::time::Duration;

struct BridgeCapture {
    messages: Arc<Mutex<Vec<String>>>,
}

impl BridgeCapture {
    fn new() -> Self { Self { messages: Arc::new(Mutex::new(Vec::new())) } }
}

impl fieldops_app::domains::logger::DomainLogger for BridgeCapture {
    fn info(&self, msg: &str) { self.messages.lock().unwrap().push(format!("INFO:{}", msg)); }
    fn warn(&self, msg: &str) { self.messages.lock().unwrap().push(format!("WARN:{}", msg)); }
    fn error(&self, msg: &str) { self.messages.lock().unwrap().push(format!("ERR:{}", msg)); }
}

#[tokio::test]
async fn test_buffered_and_noop_logger() {
    let capture = Arc::new(BridgeCapture::new());
    let bridge = capture.clone() as Arc<dyn fieldops_app::domains::logger::DomainLogger>;

    // Create a buffered logger that forwards to the bridge with small capacity
    let buffered = fieldops_app::adapters::outbound::init_buffered_logger(bridge.clone(), 8);

    // Send messages
    buffered.info("one");
    buffered.warn("two");
    buffered.error("three");

    // Give the background task a moment
    tokio::time::sleep(Duration::from_millis(50)).await;

    let msgs = capture.messages.lock().unwrap();
    assert!(msgs.iter().any(|m| m.contains("INFO:one")));
    assert!(msgs.iter().any(|m| m.contains("WARN:two")));
    assert!(msgs.iter().any(|m| m.contains("ERR:three")));

    // No-op logger should accept calls and not panic; ensure it exists
    let noop = fieldops_app::adapters::outbound::init_noop_logger();
    noop.info("ignored");
    noop.error("ignored-err");
}

#[tokio::test]
async fn test_file_logger_writes_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dispatch.log");

    let logger = fieldops_app::adapters::outbound::init_file_logger(path.to_str().unwrap())
        .expect("fast_log init");
    logger.info("file-logged message");
    log::logger().flush();

    // fast_log writes from a background thread; poll briefly.
    for _ in 0..20 {
        let written = std::fs::read_to_string(&path)
            .map(|content| content.contains("file-logged message"))
            .unwrap_or(false);
        if written {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("log file was not written");
}

#[tokio::test]
async fn test_console_logger_accepts_calls() {
    let console = fieldops_app::adapters::outbound::init_console_logger();
    console.info("console info");
    console.warn("console warn");
    console.error("console error");
}
