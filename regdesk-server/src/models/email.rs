//! Email shape check
//!
//! Deliberately permissive: one `@`, a dot somewhere in the domain, no
//! whitespace. Not an RFC 5322 parser.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// True when `email` is empty (the field is optional) or has the
/// `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || EMAIL_RE.is_match(email)
}
