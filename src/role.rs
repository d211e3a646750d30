//! Mail participants (senders and recipients).

use crate::error::MailError;
use serde::Serialize;
use std::fmt;

/// A named participant of an email, usable as sender or recipient.
///
/// The address identifies the participant for delivery; the name is only
/// shown to humans and may be empty.
///
/// # Examples
///
/// ```
/// use mailroom::Role;
///
/// let role = Role::new("John Doe", "john@example.com").unwrap();
/// assert_eq!(role.name(), "John Doe");
/// assert_eq!(role.address(), "john@example.com");
///
/// // The address is required
/// assert!(Role::new("John Doe", "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    name: String,
    address: String,
}

impl Role {
    /// Create a participant with a display name and an address.
    ///
    /// Only emptiness is checked; the address syntax is left to the transport.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Result<Self, MailError> {
        let address = address.into();
        if address.is_empty() {
            return Err(MailError::empty("address"));
        }

        Ok(Self {
            name: name.into(),
            address,
        })
    }

    /// Create a participant without a display name.
    pub fn address_only(address: impl Into<String>) -> Result<Self, MailError> {
        Self::new(String::new(), address)
    }

    /// The display name (may be empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The email address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Format as "Name <address>" or just "address" if there is no name.
    pub fn formatted(&self) -> String {
        if self.name.is_empty() {
            self.address.clone()
        } else {
            format!("{} <{}>", self.name, self.address)
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

impl TryFrom<&str> for Role {
    type Error = MailError;

    fn try_from(address: &str) -> Result<Self, Self::Error> {
        Self::address_only(address)
    }
}

impl TryFrom<(&str, &str)> for Role {
    type Error = MailError;

    fn try_from((name, address): (&str, &str)) -> Result<Self, Self::Error> {
        Self::new(name, address)
    }
}

/// Trait for domain types that can take part in an email.
///
/// Implement this for your user or contact types so they can be passed
/// straight to [`Email::try_sender`](crate::Email::try_sender) and
/// [`Email::try_recipient`](crate::Email::try_recipient).
///
/// ```
/// use mailroom::{MailError, Role, ToRole};
///
/// struct Organizer {
///     title: String,
///     email: String,
/// }
///
/// impl ToRole for Organizer {
///     fn to_role(&self) -> Result<Role, MailError> {
///         Role::new(&self.title, &self.email)
///     }
/// }
/// ```
pub trait ToRole {
    /// Convert to a [`Role`], failing if the address is empty.
    fn to_role(&self) -> Result<Role, MailError>;
}

impl<T: ToRole + ?Sized> ToRole for &T {
    fn to_role(&self) -> Result<Role, MailError> {
        (**self).to_role()
    }
}

impl ToRole for Role {
    fn to_role(&self) -> Result<Role, MailError> {
        Ok(self.clone())
    }
}

impl ToRole for str {
    fn to_role(&self) -> Result<Role, MailError> {
        Role::address_only(self)
    }
}

impl<N: AsRef<str>, A: AsRef<str>> ToRole for (N, A) {
    fn to_role(&self) -> Result<Role, MailError> {
        Role::new(self.0.as_ref(), self.1.as_ref())
    }
}
