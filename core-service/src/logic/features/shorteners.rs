//! URL Shortener Denylist
//!
//! Known shortening services. Matching is an unanchored, case-sensitive
//! substring search over the whole URL, so `t.co` also fires inside
//! `smart.com`: the model was trained with exactly this behavior.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shortener domains (duplicates kept as trained)
pub const SHORTENING_SERVICES: &[&str] = &[
    "bit.ly", "goo.gl", "shorte.st", "go2l.ink", "x.co", "ow.ly", "t.co", "tinyurl", "tr.im",
    "is.gd", "cli.gs", "yfrog.com", "migre.me", "ff.im", "tiny.cc", "url4.eu", "twit.ac",
    "su.pr", "twurl.nl", "snipurl.com", "short.to", "BudURL.com", "ping.fm", "post.ly",
    "Just.as", "bkite.com", "snipr.com", "fic.kr", "loopt.us", "doiop.com", "short.ie",
    "kl.am", "wp.me", "rubyurl.com", "om.ly", "to.ly", "bit.do", "t.co", "lnkd.in", "db.tt",
    "qr.ae", "adf.ly", "goo.gl", "bitly.com", "cur.lv", "tinyurl.com", "ow.ly", "bit.ly",
    "ity.im", "q.gs", "is.gd", "po.st", "bc.vc", "twitthis.com", "u.to", "j.mp", "buzurl.com",
    "cutt.us", "u.bb", "yourls.org", "x.co", "prettylinkpro.com", "scrnch.me", "filoops.info",
    "vzturl.com", "qr.net", "1url.com", "tweez.me", "v.gd", "tr.im", "link.zip.net",
];

static SHORTENER_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = SHORTENING_SERVICES
        .iter()
        .map(|domain| regex::escape(domain))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("shortener denylist is a valid regex")
});

/// True if any denylisted shortener appears anywhere in the URL
pub fn is_short_url(url: &str) -> bool {
    SHORTENER_RE.is_match(url)
}
