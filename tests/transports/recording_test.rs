//! Recording transport tests.

use mailroom::transports::RecordingTransport;
use mailroom::{Email, Mailer, RawEmail, Role, Transport};

fn hello(to: &str) -> Email {
    Email::new()
        .sender(Role::address_only("tony.stark@example.com").unwrap())
        .recipient(Role::address_only(to).unwrap())
        .subject("Hello, Avengers!")
        .plain_body("Hello!")
}

// ============================================================================
// Basic Recording Tests
// ============================================================================

#[tokio::test]
async fn records_each_dispatched_message() {
    let transport = RecordingTransport::new();
    let mailer = Mailer::new(transport.clone());

    mailer.send(&hello("steve.rogers@example.com")).await.unwrap();
    mailer.send(&hello("natasha.romanoff@example.com")).await.unwrap();

    assert_eq!(transport.count_sent_messages(), 2);
    assert_eq!(
        transport.first_sent_message().unwrap().to.address(),
        "steve.rogers@example.com"
    );
    assert_eq!(
        transport.last_sent_message().unwrap().to.address(),
        "natasha.romanoff@example.com"
    );
}

#[tokio::test]
async fn starts_empty() {
    let transport = RecordingTransport::new();

    assert_eq!(transport.count_sent_messages(), 0);
    assert!(transport.last_sent_message().is_none());
    assert!(transport.last_raw_email().is_none());
    assert_eq!(transport.last_recipient(), "");
    assert_eq!(transport.last_subject(), "");
    assert_eq!(transport.last_body(), "");
    assert_eq!(transport.last_headers(), "");
    assert!(transport.faked_return_value());
}

#[tokio::test]
async fn clones_share_recordings() {
    let transport = RecordingTransport::new();
    let handle = transport.clone();

    transport
        .dispatch_raw(&RawEmail::new("a@example.com", "S", "B", "H"))
        .await;

    assert_eq!(handle.last_recipient(), "a@example.com");
}

#[tokio::test]
async fn find_messages_and_sent_to() {
    let transport = RecordingTransport::new();
    let mailer = Mailer::new(transport.clone());

    mailer.send(&hello("steve.rogers@example.com")).await.unwrap();
    mailer
        .send(&hello("natasha.romanoff@example.com").subject("Mission"))
        .await
        .unwrap();

    let missions = transport.find_messages(|m| m.subject == "Mission");
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0].to.address(), "natasha.romanoff@example.com");

    assert!(transport.sent_to("STEVE.ROGERS@example.com"));
    assert!(!transport.sent_to("bruce.banner@example.com"));
}

// ============================================================================
// Raw Email Tests
// ============================================================================

#[tokio::test]
async fn records_raw_fields_verbatim() {
    let transport = RecordingTransport::new();

    let accepted = transport
        .dispatch_raw(&RawEmail::new(
            "x@example.com",
            "Subj",
            "Body\r\n",
            "X-Tag: 1",
        ))
        .await;

    assert!(accepted);
    assert_eq!(transport.last_recipient(), "x@example.com");
    assert_eq!(transport.last_subject(), "Subj");
    assert_eq!(transport.last_body(), "Body\r\n");
    assert_eq!(transport.last_headers(), "X-Tag: 1");
    assert_eq!(transport.all_raw_emails().len(), 1);
    assert_eq!(transport.count_sent_messages(), 0);
}

// ============================================================================
// Faked Return Value Tests
// ============================================================================

#[tokio::test]
async fn faked_return_value_is_answered_but_still_recorded() {
    let transport = RecordingTransport::new();
    transport.set_faked_return_value(false);

    let message = Mailer::new(transport.clone())
        .compose(&hello("steve.rogers@example.com"))
        .unwrap()
        .remove(0);

    assert!(!transport.dispatch(&message).await);
    assert!(!transport.dispatch_raw(&RawEmail::default()).await);
    assert_eq!(transport.count_sent_messages(), 1);
    assert_eq!(transport.all_raw_emails().len(), 1);
}

// ============================================================================
// Clean Up Tests
// ============================================================================

#[tokio::test]
async fn clean_up_resets_everything() {
    let transport = RecordingTransport::new();
    let mailer = Mailer::new(transport.clone());
    transport.set_faked_return_value(false);

    mailer.send(&hello("steve.rogers@example.com")).await.unwrap();
    mailer.send_email("raw@example.com", "S", "B", "").await;

    transport.clean_up();

    assert_eq!(transport.count_sent_messages(), 0);
    assert!(transport.all_raw_emails().is_empty());
    assert_eq!(transport.last_recipient(), "");
    assert!(transport.faked_return_value());
}

#[tokio::test]
async fn transport_name() {
    assert_eq!(RecordingTransport::new().transport_name(), "recording");
}
