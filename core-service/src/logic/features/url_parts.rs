//! URL Splitting
//!
//! Splits a URL into scheme / netloc / path / params / query / fragment
//! with the same lenient rules the training pipeline used. No
//! normalization, no percent-decoding, no lowercasing of the host: the
//! lengths computed from these parts must match the training data exactly,
//! so a WHATWG parser is the wrong tool here.

use std::net::Ipv6Addr;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Schemes whose last path segment may carry `;params`
const USES_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtsps", "rtspu",
    "sip", "sips", "mms", "sftp", "tel",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlSplitError {
    #[error("Invalid IPv6 URL")]
    UnbalancedBrackets,

    #[error("Invalid bracketed host: {0}")]
    InvalidBracketedHost(String),

    #[error("netloc '{0}' contains invalid characters under NFKC normalization")]
    NormalizedSeparator(String),
}

/// Components of a split URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlParts {
    pub scheme: String,
    pub netloc: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

impl UrlParts {
    pub fn parse(input: &str) -> Result<Self, UrlSplitError> {
        let cleaned: String = input
            .trim_start_matches(|c: char| c <= ' ')
            .chars()
            .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
            .collect();

        let mut rest = cleaned.as_str();
        let mut parts = UrlParts::default();

        if let Some(i) = rest.find(':') {
            let candidate = &rest[..i];
            let starts_alpha = candidate.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
            if starts_alpha && candidate.chars().all(is_scheme_char) {
                parts.scheme = candidate.to_ascii_lowercase();
                rest = &rest[i + 1..];
            }
        }

        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            let netloc = &after[..end];
            check_netloc(netloc)?;
            parts.netloc = netloc.to_string();
            rest = &after[end..];
        }

        if let Some((head, fragment)) = rest.split_once('#') {
            parts.fragment = fragment.to_string();
            rest = head;
        }

        if let Some((head, query)) = rest.split_once('?') {
            parts.query = query.to_string();
            rest = head;
        }

        if USES_PARAMS.contains(&parts.scheme.as_str()) && rest.contains(';') {
            let (path, params) = split_params(rest);
            parts.path = path.to_string();
            parts.params = params.to_string();
        } else {
            parts.path = rest.to_string();
        }

        Ok(parts)
    }

    /// First segment after the leading slash, if the path has one
    pub fn first_dir(&self) -> Option<&str> {
        self.path.split('/').nth(1)
    }
}

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// `;` after the last `/` starts the params; without any `/` the first `;` does
fn split_params(url: &str) -> (&str, &str) {
    let idx = match url.rfind('/') {
        Some(slash) => match url[slash..].find(';') {
            Some(i) => slash + i,
            None => return (url, ""),
        },
        None => match url.find(';') {
            Some(i) => i,
            None => return (url, ""),
        },
    };

    (&url[..idx], &url[idx + 1..])
}

/// Rejects what the training-time splitter rejected: unbalanced brackets, a
/// bad host in the first `[...]` span, and non-ASCII text that NFKC folds
/// into a separator
fn check_netloc(netloc: &str) -> Result<(), UrlSplitError> {
    let open = netloc.contains('[');
    let close = netloc.contains(']');

    if open != close {
        return Err(UrlSplitError::UnbalancedBrackets);
    }

    if open {
        let after = netloc.split_once('[').map_or("", |(_, rest)| rest);
        let host = after.split_once(']').map_or(after, |(host, _)| host);
        if !is_valid_bracketed_host(host) {
            return Err(UrlSplitError::InvalidBracketedHost(host.to_string()));
        }
    }

    check_normalized(netloc)
}

fn check_normalized(netloc: &str) -> Result<(), UrlSplitError> {
    if netloc.is_ascii() {
        return Ok(());
    }

    let stripped: String = netloc.chars().filter(|c| !matches!(c, '@' | ':' | '#' | '?')).collect();
    let normalized: String = stripped.nfkc().collect();
    if normalized == stripped {
        return Ok(());
    }

    if normalized.contains(['/', '?', '#', '@', ':']) {
        return Err(UrlSplitError::NormalizedSeparator(netloc.to_string()));
    }

    Ok(())
}

fn is_valid_bracketed_host(host: &str) -> bool {
    if let Some(future) = host.strip_prefix('v') {
        // IPvFuture: v<hex>.<anything>
        return match future.split_once('.') {
            Some((version, rest)) => {
                !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_hexdigit())
                    && !rest.is_empty()
            }
            None => false,
        };
    }

    // Zone ids must be non-empty and hold no second '%'
    let address = match host.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() && !zone.contains('%') => addr,
        Some(_) => return false,
        None => host,
    };
    address.parse::<Ipv6Addr>().is_ok()
}
