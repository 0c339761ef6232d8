//! Public Suffix Extraction
//!
//! Finds the ICANN public suffix ("com", "co.uk", ...) of whatever host a
//! URL string carries, using the public suffix list embedded by `psl`.
//! The host is derived leniently and independently of [`UrlParts`]: a
//! schemeless `bit.ly/x` still yields `ly`.
//!
//! [`UrlParts`]: super::url_parts::UrlParts

use std::net::Ipv4Addr;

/// Alternative full stops accepted as label separators
const DOT_VARIANTS: [char; 3] = ['\u{3002}', '\u{ff0e}', '\u{ff61}'];

/// ICANN public suffix of the URL's host, or "" if there is none
pub fn public_suffix(url: &str) -> String {
    let host = lenient_host(url);

    if host.is_empty() || host.starts_with('[') || host.parse::<Ipv4Addr>().is_ok() {
        return String::new();
    }

    icann_suffix(&host).unwrap_or_default()
}

/// Host part of a URL: scheme, path, userinfo and port removed, lowercased
pub fn lenient_host(url: &str) -> String {
    let schemeless = strip_scheme(url.trim());
    let authority = schemeless
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let after_userinfo = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

    if after_userinfo.starts_with('[') {
        return match after_userinfo.find(']') {
            Some(end) => after_userinfo[..=end].to_string(),
            None => String::new(),
        };
    }

    let hostname = after_userinfo.split(':').next().unwrap_or_default().trim();
    hostname
        .trim_end_matches(|c: char| c == '.' || DOT_VARIANTS.contains(&c))
        .replace(DOT_VARIANTS, ".")
        .to_lowercase()
}

fn strip_scheme(url: &str) -> &str {
    match url.find("//") {
        Some(0) => &url[2..],
        Some(i) => {
            let scheme = &url[..i];
            let valid = scheme
                .strip_suffix(':')
                .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')));
            if valid {
                &url[i + 2..]
            } else {
                url
            }
        }
        None => url,
    }
}

/// Longest ICANN suffix of `host`. Private-section matches (e.g.
/// `blogspot.com`) fall back to the ICANN suffix beneath them.
fn icann_suffix(host: &str) -> Option<String> {
    let mut candidate = host.to_string();

    loop {
        let suffix = psl::suffix(candidate.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }

        let text = std::str::from_utf8(suffix.as_bytes()).ok()?;
        match suffix.typ() {
            Some(psl::Type::Icann) => return Some(text.to_string()),
            _ => {
                let (_, parent) = text.split_once('.')?;
                candidate = parent.to_string();
            }
        }
    }
}
