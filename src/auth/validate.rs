use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use crate::http::Credentials;

pub const MIN_PASSWORD_LEN: usize = 6;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email cannot be empty.")]
    EmptyEmail,

    #[error("Password cannot be empty.")]
    EmptyPassword,

    #[error("Host cannot be empty.")]
    EmptyHost,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,

    #[error("Please enter a valid host.")]
    InvalidHost,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Accepts a bare `host[:port]`; anything that would add userinfo, a path,
/// a query or a fragment to the login URL is refused.
pub fn is_valid_host(host: &str) -> bool {
    if host.contains(['/', '\\', '?', '#', '@']) {
        return false;
    }
    let Ok(url) = Url::parse(&format!("https://{host}")) else {
        return false;
    };
    url.host_str().is_some() && url.username().is_empty() && url.password().is_none()
}

/// Passwords are measured in user-perceived characters (grapheme clusters).
pub fn password_len(password: &str) -> usize {
    password.graphemes(true).count()
}

/// Checks run in a fixed order and the first failure wins.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if credentials.email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if credentials.host.is_empty() {
        return Err(ValidationError::EmptyHost);
    }
    if !is_valid_email(&credentials.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password_len(&credentials.password) < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if !is_valid_host(&credentials.host) {
        return Err(ValidationError::InvalidHost);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str, host: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
            host: host.to_string(),
        }
    }

    #[test]
    fn valid_triples_pass() {
        for (email, password, host) in [
            ("testuser@mofa.onice.io", "Password123456", "mofa.onice.io"),
            ("a.b+c%d_e-f@x-y.co", "secret", "localhost"),
            ("USER@EXAMPLE.ORG", "123456", "10.0.0.1:8443"),
        ] {
            assert_eq!(validate_credentials(&creds(email, password, host)), Ok(()));
        }
    }

    #[test]
    fn each_rule_reports_its_own_message() {
        let cases = [
            (creds("", "secret", "h"), "Email cannot be empty."),
            (creds("a@b.io", "", "h"), "Password cannot be empty."),
            (creds("a@b.io", "secret", ""), "Host cannot be empty."),
            (creds("not-an-email", "secret", "h"), "Please enter a valid email address."),
            (creds("a@b.io", "12345", "h"), "Password must be at least 6 characters long."),
        ];

        for (input, message) in cases {
            let err = validate_credentials(&input).unwrap_err();
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn empty_fields_are_checked_before_format() {
        assert_eq!(
            validate_credentials(&creds("bad", "", "")),
            Err(ValidationError::EmptyPassword)
        );
        assert_eq!(
            validate_credentials(&creds("bad", "123", "")),
            Err(ValidationError::EmptyHost)
        );
    }

    #[test]
    fn email_pattern_must_match_whole_input() {
        assert!(is_valid_email("user@example.com"));
        assert!(!is_valid_email(" user@example.com"));
        assert!(!is_valid_email("user@example.com extra"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example.c0m"));
    }

    #[test]
    fn password_length_counts_graphemes() {
        assert_eq!(validate_credentials(&creds("a@b.io", "ääääää", "h")), Ok(()));
        assert_eq!(
            validate_credentials(&creds("a@b.io", "äääää", "h")),
            Err(ValidationError::PasswordTooShort)
        );

        // "e" + combining acute: two chars, one grapheme.
        let five_accented = "e\u{301}".repeat(5);
        assert_eq!(five_accented.chars().count(), 10);
        assert_eq!(password_len(&five_accented), 5);
        assert_eq!(
            validate_credentials(&creds("a@b.io", &five_accented, "h")),
            Err(ValidationError::PasswordTooShort)
        );
        let six_accented = "e\u{301}".repeat(6);
        assert_eq!(validate_credentials(&creds("a@b.io", &six_accented, "h")), Ok(()));
    }

    #[test]
    fn host_must_be_bare_host_and_port() {
        for host in ["mofa.onice.io", "localhost", "10.0.0.1:8443", "127.0.0.1:3000"] {
            assert!(is_valid_host(host), "{host} should be accepted");
        }
        for host in [
            "a@evil.com",
            "user:pw@evil.com",
            "mofa.onice.io/other",
            "mofa.onice.io?x=1",
            "mofa.onice.io#frag",
            "bad host",
            "host:99999",
        ] {
            assert!(!is_valid_host(host), "{host} should be rejected");
        }
    }

    #[test]
    fn spliced_host_is_rejected_before_network() {
        assert_eq!(
            validate_credentials(&creds("a@b.io", "secret", "a@evil.com")),
            Err(ValidationError::InvalidHost)
        );
        let err = validate_credentials(&creds("a@b.io", "secret", "x/y")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid host.");
    }
}
