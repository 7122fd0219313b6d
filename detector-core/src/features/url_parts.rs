//! URL component splitting.
//!
//! Splits text into scheme / netloc / path / params / query / fragment using
//! the generic URI syntax, without normalizing anything. The training data
//! was produced from raw components (no default ports, no trailing `/`, no
//! host lowercasing of the path), so a normalizing parser such as
//! `url::Url` would shift the length and count features.
//!
//! Text without a recognizable scheme is accepted: it has an empty netloc
//! and the whole remainder is the path.

use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;

use super::extractor::ExtractionError;

/// Schemes whose last path segment may carry `;params`
const SCHEMES_WITH_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp",
    "rtsps", "rtspu", "sip", "sips", "mms", "sftp", "tel",
];

/// `v<hex>.<anything>`, lowercase `v` only
static IPV_FUTURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\Av[a-fA-F0-9]+\..+\z").expect("valid IPvFuture pattern")
});

/// Raw components of a URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts<'a> {
    /// Lowercased scheme, empty when absent
    pub scheme: String,
    /// Authority including userinfo and port, case preserved
    pub netloc: &'a str,
    pub path: &'a str,
    pub params: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Hostname as used by the feature set: the whole netloc, lowercased
    pub fn hostname(&self) -> String {
        self.netloc.to_lowercase()
    }
}

fn is_c0_or_space(c: char) -> bool {
    c <= ' '
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// Strip leading controls and embedded tab/CR/LF, returning a borrowed
/// slice when nothing had to be removed.
pub fn sanitize(raw: &str) -> std::borrow::Cow<'_, str> {
    let trimmed = raw.trim_start_matches(is_c0_or_space);
    if trimmed.contains(['\t', '\r', '\n']) {
        std::borrow::Cow::Owned(trimmed.chars().filter(|c| !matches!(c, '\t' | '\r' | '\n')).collect())
    } else {
        std::borrow::Cow::Borrowed(trimmed)
    }
}

/// Split already-sanitized text into components.
///
/// Fails only on a malformed authority, mostly bracket misuse around an
/// IPv6 or IPvFuture host.
pub fn split(url: &str) -> Result<UrlParts<'_>, ExtractionError> {
    let mut rest = url;
    let mut scheme = String::new();

    if let Some(colon) = rest.find(':') {
        let candidate = &rest[..colon];
        let starts_alpha = candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if starts_alpha && candidate.chars().all(is_scheme_char) {
            scheme = candidate.to_ascii_lowercase();
            rest = &rest[colon + 1..];
        }
    }

    let mut netloc = "";
    if let Some(after) = rest.strip_prefix("//") {
        let end = after.find(['/', '?', '#']).unwrap_or(after.len());
        netloc = &after[..end];
        rest = &after[end..];
        check_netloc(netloc)?;
    }

    let (rest, fragment) = match rest.split_once('#') {
        Some((before, frag)) => (before, frag),
        None => (rest, ""),
    };
    let (path, query) = match rest.split_once('?') {
        Some((before, q)) => (before, q),
        None => (rest, ""),
    };

    let (path, params) = if SCHEMES_WITH_PARAMS.contains(&scheme.as_str()) {
        split_params(path)
    } else {
        (path, "")
    };

    Ok(UrlParts { scheme, netloc, path, params, query, fragment })
}

/// Params belong to the last path segment only.
fn split_params(path: &str) -> (&str, &str) {
    let search_from = match path.rfind('/') {
        Some(slash) => slash,
        None => 0,
    };
    match path[search_from..].find(';') {
        Some(offset) => {
            let at = search_from + offset;
            (&path[..at], &path[at + 1..])
        }
        None => (path, ""),
    }
}

fn invalid_authority(netloc: &str, reason: &str) -> ExtractionError {
    ExtractionError::InvalidAuthority(format!("{} in '{}'", reason, netloc))
}

fn check_netloc(netloc: &str) -> Result<(), ExtractionError> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return Err(invalid_authority(netloc, "unbalanced brackets"));
    }
    if !open {
        return Ok(());
    }

    // Brackets anywhere in the authority commit it to a bracketed host
    let host_and_port = netloc.rsplit_once('@').map_or(netloc, |(_, h)| h);
    let Some((before, bracketed)) = host_and_port.split_once('[') else {
        return Err(invalid_authority(netloc, "brackets outside the host"));
    };
    if !before.is_empty() {
        return Err(invalid_authority(netloc, "text before '['"));
    }
    let (host, port) = bracketed.split_once(']').unwrap_or((bracketed, ""));
    if !port.is_empty() && !port.starts_with(':') {
        return Err(invalid_authority(netloc, "text between ']' and the port"));
    }

    if host.starts_with('v') {
        if !IPV_FUTURE.is_match(host) {
            return Err(invalid_authority(netloc, "invalid IPvFuture literal"));
        }
    } else if !is_ipv6_literal(host) {
        return Err(invalid_authority(netloc, "invalid IPv6 literal"));
    }
    Ok(())
}

/// IPv6 address with an optional non-empty `%zone`
fn is_ipv6_literal(host: &str) -> bool {
    let addr = match host.split_once('%') {
        Some((_, zone)) if zone.is_empty() || zone.contains('%') => return false,
        Some((addr, _)) => addr,
        None => host,
    };
    addr.parse::<Ipv6Addr>().is_ok()
}
