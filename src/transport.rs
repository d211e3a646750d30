//! Transport trait: the delivery capability the mailer hands messages to.
//!
//! # Why `async_trait`?
//!
//! Mailers are often stored behind `Arc<dyn Transport>` (the global mailer,
//! transports picked from environment variables at runtime). Native async
//! trait methods are not object safe, so the futures are boxed with
//! `#[async_trait]`. Delivery is I/O-bound and the allocation is noise next to
//! a network round trip.
//!
//! Callers that know the concrete transport can use it directly through
//! `Mailer<RecordingTransport>` and friends; boxing of the transport itself
//! only happens with `Mailer<Arc<dyn Transport>>`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::message::{RawEmail, SentMessage};

/// Delivery capability consumed by [`Mailer`](crate::Mailer).
///
/// Both methods report success as a boolean. A `false` is a refusal, not an
/// error: the mailer never retries and never turns it into a `MailError`.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use mailroom::{RawEmail, SentMessage, Transport};
///
/// struct Outbox;
///
/// #[async_trait]
/// impl Transport for Outbox {
///     async fn dispatch(&self, message: &SentMessage) -> bool {
///         queue_for_delivery(message).await.is_ok()
///     }
///
///     async fn dispatch_raw(&self, email: &RawEmail) -> bool {
///         queue_raw(email).await.is_ok()
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one per-recipient message.
    async fn dispatch(&self, message: &SentMessage) -> bool;

    /// Deliver a mail from the low-level raw path.
    async fn dispatch_raw(&self, email: &RawEmail) -> bool;

    /// Get the transport name (for logging/debugging).
    fn transport_name(&self) -> &'static str {
        "unknown"
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn dispatch(&self, message: &SentMessage) -> bool {
        (**self).dispatch(message).await
    }

    async fn dispatch_raw(&self, email: &RawEmail) -> bool {
        (**self).dispatch_raw(email).await
    }

    fn transport_name(&self) -> &'static str {
        (**self).transport_name()
    }
}

impl std::fmt::Debug for dyn Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("name", &self.transport_name())
            .finish()
    }
}
