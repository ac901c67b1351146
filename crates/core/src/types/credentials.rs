//! Login form input.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Reasons a login form is rejected before it reaches the API.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("email is required")]
    MissingEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("password is required")]
    MissingPassword,
}

/// A syntactically valid email address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse and normalize an email address.
    ///
    /// Surrounding whitespace is trimmed. The address needs exactly one `@`
    /// with a non-empty local part and a dotted domain.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialsError`] describing the first failed check.
    pub fn parse(raw: &str) -> Result<Self, CredentialsError> {
        let s = raw.trim();
        if s.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(CredentialsError::EmailTooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(CredentialsError::InvalidEmail)?;
        let domain_ok = !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
        if local.is_empty() || !domain_ok {
            return Err(CredentialsError::InvalidEmail);
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated login credentials, ready to post to the API's `/login/`.
///
/// `Debug` redacts the password.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl Credentials {
    /// Validate raw form fields.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialsError`] if the email is invalid or the password is empty.
    pub fn parse(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        Ok(Self {
            email,
            password: password.to_owned(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_email() {
        let email = Email::parse("  baker@crumbs.co.uk ").ok();
        assert_eq!(email.as_ref().map(Email::as_str), Some("baker@crumbs.co.uk"));
    }

    #[test]
    fn rejects_malformed_email() {
        assert_eq!(Email::parse(""), Err(CredentialsError::MissingEmail));
        assert_eq!(Email::parse("baker"), Err(CredentialsError::InvalidEmail));
        assert_eq!(Email::parse("@crumbs.com"), Err(CredentialsError::InvalidEmail));
        assert_eq!(Email::parse("baker@crumbs"), Err(CredentialsError::InvalidEmail));
        assert_eq!(Email::parse("a@b@c.com"), Err(CredentialsError::InvalidEmail));
    }

    #[test]
    fn requires_password() {
        let err = Credentials::parse("baker@crumbs.com", "").err();
        assert_eq!(err, Some(CredentialsError::MissingPassword));
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials::parse("baker@crumbs.com", "hunter22").ok();
        let debug = format!("{creds:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter22"));
    }
}
