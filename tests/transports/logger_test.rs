//! Logger transport tests.

use mailroom::transports::LoggerTransport;
use mailroom::{Attachment, Email, Mailer, RawEmail, Role, Transport};

fn hello() -> Email {
    Email::new()
        .sender(Role::address_only("tony.stark@example.com").unwrap())
        .recipient(Role::address_only("steve.rogers@example.com").unwrap())
        .subject("Hello, Avengers!")
        .plain_body("Hello!")
}

// ============================================================================
// Basic Dispatch Tests
// ============================================================================

#[tokio::test]
async fn send_succeeds() {
    let mailer = Mailer::new(LoggerTransport::new());
    assert!(mailer.send(&hello()).await.is_ok());
}

#[tokio::test]
async fn send_with_full_logging_succeeds() {
    let mailer = Mailer::new(LoggerTransport::full());

    let email = hello()
        .html_body("<h1>Hello!</h1>")
        .attachment(Attachment::from_bytes(b"data".to_vec(), "text/csv").file_name("data.csv"));

    assert!(mailer.send(&email).await.is_ok());
}

#[tokio::test]
async fn always_accepts() {
    let transport = LoggerTransport::new();
    let message = Mailer::new(transport.clone())
        .compose(&hello())
        .unwrap()
        .remove(0);

    assert!(transport.dispatch(&message).await);
    assert!(
        transport
            .dispatch_raw(&RawEmail::new("x@example.com", "S", "B", ""))
            .await
    );
}

#[tokio::test]
async fn send_email_returns_true() {
    let mailer = Mailer::new(LoggerTransport::full());
    assert!(mailer.send_email("x@example.com", "S", "B", "X-A: 1").await);
}

#[tokio::test]
async fn log_full_can_be_switched_off() {
    let mailer = Mailer::new(LoggerTransport::full().log_full(false));
    assert!(mailer.send(&hello()).await.is_ok());
    assert_eq!(mailer.transport().transport_name(), "logger");
}
