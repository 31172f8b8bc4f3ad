//! Reveal-link and messaging deep-link builders.
//!
//! # Responsibility
//! - Format per-participant reveal URLs from a public base URL.
//! - Build `wa.me` deep links carrying a pre-filled invitation message.
//!
//! # Invariants
//! - Phone numbers are reduced to their digits before link building.
//! - Message text is percent-encoded with the RFC 3986 unreserved set.

/// Joins the public base URL with a participant slug path segment.
///
/// Trailing slashes on `base_url` are tolerated so organizer configuration
/// stays forgiving.
pub fn reveal_url(base_url: &str, slug: &str) -> String {
    format!("{}/{slug}", base_url.trim_end_matches('/'))
}

/// Builds a WhatsApp deep link with a pre-filled message.
///
/// Non-digit characters are stripped from `contact` ("+55 (11) 9..." and
/// "5511 9..." produce the same link target).
pub fn whatsapp_link(contact: &str, message: &str) -> String {
    let digits: String = contact.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}?text={}", percent_encode(message))
}

/// Pre-filled greeting pointing one participant at their reveal link.
pub fn reveal_message(participant_name: &str, link: &str) -> String {
    format!(
        "Hello {participant_name}!\n\nWelcome to our Secret Santa.\n\nOpen your result: {link}"
    )
}

// Minimal query-component encoder; no URL crate is pulled in for one format
// string. Unreserved characters pass through, everything else becomes
// UTF-8 %XX triplets.
fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    encoded
}
