//! Email and Role tests.

use mailroom::{Attachment, Email, MailError, Role, ToRole};

// ============================================================================
// Role Tests
// ============================================================================

#[test]
fn role_with_non_empty_address_is_created() {
    for address in ["john@example.com", "x", "not even an address"] {
        let role = Role::new("John Doe", address).unwrap();
        assert_eq!(role.address(), address);
    }
}

#[test]
fn role_with_empty_address_is_invalid_input() {
    let err = Role::new("John Doe", "").unwrap_err();
    assert!(matches!(err, MailError::InvalidInput(_)));
    assert!(err.to_string().contains("address"));

    assert!(Role::address_only("").is_err());
}

#[test]
fn role_name_may_be_empty() {
    let role = Role::new("", "john@example.com").unwrap();
    assert_eq!(role.name(), "");
    assert_eq!(role.formatted(), "john@example.com");
}

#[test]
fn roles_with_same_address_but_different_names_differ_only_cosmetically() {
    let formal = Role::new("John Doe", "john@example.com").unwrap();
    let casual = Role::new("Johnny", "john@example.com").unwrap();
    assert_eq!(formal.address(), casual.address());
    assert_ne!(formal, casual);
}

// ============================================================================
// Constructor Tests
// ============================================================================

#[test]
fn new_creates_empty_email() {
    let email = Email::new();
    assert!(email.sender.is_none());
    assert!(email.recipients.is_empty());
    assert!(email.subject.is_empty());
    assert!(email.plain_body.is_none());
    assert!(email.html_body.is_none());
    assert!(email.attachments.is_empty());
    assert!(email.return_path.is_none());
}

// ============================================================================
// Sender Tests
// ============================================================================

#[test]
fn sender_replaces_previous_sender() {
    let email = Email::new()
        .sender(Role::address_only("tony.stark@example.com").unwrap())
        .sender(Role::new("Steve Rogers", "steve.rogers@example.com").unwrap());

    let sender = email.sender.unwrap();
    assert_eq!(sender.address(), "steve.rogers@example.com");
    assert_eq!(sender.name(), "Steve Rogers");
}

#[test]
fn try_sender_accepts_domain_types() {
    struct Organizer {
        title: String,
        email: String,
    }

    impl ToRole for Organizer {
        fn to_role(&self) -> Result<Role, MailError> {
            Role::new(&self.title, &self.email)
        }
    }

    let organizer = Organizer {
        title: "Event Team".to_string(),
        email: "events@example.com".to_string(),
    };
    let email = Email::new().try_sender(&organizer).unwrap();
    assert_eq!(email.sender.unwrap().name(), "Event Team");

    let nobody = Organizer {
        title: "Nobody".to_string(),
        email: String::new(),
    };
    assert!(Email::new().try_sender(&nobody).is_err());
}

// ============================================================================
// Recipient Tests
// ============================================================================

#[test]
fn recipient_adds_in_order() {
    let email = Email::new()
        .recipient(Role::address_only("one@example.com").unwrap())
        .recipient(Role::address_only("two@example.com").unwrap());

    let addresses: Vec<&str> = email.recipients.iter().map(Role::address).collect();
    assert_eq!(addresses, vec!["one@example.com", "two@example.com"]);
}

#[test]
fn put_recipients_replaces_all() {
    let email = Email::new()
        .recipient(Role::address_only("old@example.com").unwrap())
        .put_recipients(vec![Role::address_only("new@example.com").unwrap()]);

    assert_eq!(email.recipients.len(), 1);
    assert_eq!(email.recipients[0].address(), "new@example.com");
}

#[test]
fn try_recipient_accepts_tuples() {
    let email = Email::new()
        .try_recipient(("Jane Doe", "jane@example.com"))
        .unwrap();
    assert_eq!(email.recipients[0].name(), "Jane Doe");
}

// ============================================================================
// Content Tests
// ============================================================================

#[test]
fn subject_replaces_previous_subject() {
    let email = Email::new()
        .subject("Hello, Avengers!")
        .subject("Welcome, I am Jarvis");
    assert_eq!(email.subject, "Welcome, I am Jarvis");
}

#[test]
fn bodies_are_stored_verbatim() {
    let email = Email::new()
        .plain_body("line\r\n\r\n\r\nline")
        .html_body("<h1>Hello</h1>");

    assert_eq!(email.plain_body.as_deref(), Some("line\r\n\r\n\r\nline"));
    assert_eq!(email.html_body.as_deref(), Some("<h1>Hello</h1>"));
    assert!(email.has_plain_body());
    assert!(email.has_html_body());
}

#[test]
fn return_path_is_stored() {
    let email = Email::new().return_path("bounces@example.com");
    assert_eq!(email.return_path.as_deref(), Some("bounces@example.com"));
}

#[test]
fn attachment_adds_in_order() {
    let email = Email::new()
        .attachment(Attachment::from_bytes(b"a".to_vec(), "text/plain").file_name("a.txt"))
        .attachment(Attachment::from_path("/srv/b.pdf", "application/pdf"));

    assert!(email.has_attachments());
    assert_eq!(email.attachments[0].resolve_file_name(), "a.txt");
    assert_eq!(email.attachments[1].resolve_file_name(), "b.pdf");
}

#[test]
fn email_serializes_to_json() {
    let email = Email::new()
        .sender(Role::new("Shop", "shop@example.com").unwrap())
        .subject("Hi");

    let json = serde_json::to_value(&email).unwrap();
    assert_eq!(json["sender"]["address"], "shop@example.com");
    assert_eq!(json["subject"], "Hi");
    assert!(json["return_path"].is_null());
}
