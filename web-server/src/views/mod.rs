//! HTML Views - Server-rendered pages
//!
//! Plain `format!` templates; every user-supplied string goes through
//! [`escape`] before it lands in markup.

pub mod chart;
mod pages;

pub use pages::{batch_page, index_page, prediction_page, BatchView};

/// Banner severity, mapped to a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Warning,
    Error,
}

impl BannerKind {
    fn class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Warning => "warning",
            BannerKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    /// Trusted markup (may contain `<strong>`)
    pub html: String,
}

impl Banner {
    pub fn new(kind: BannerKind, html: impl Into<String>) -> Self {
        Self { kind, html: html.into() }
    }

    /// Banner from untrusted text
    pub fn text(kind: BannerKind, text: &str) -> Self {
        Self::new(kind, escape(text))
    }

    pub fn render(&self) -> String {
        format!(
            "<div class=\"banner {}\" role=\"alert\">{}</div>\n",
            self.kind.class(),
            self.html
        )
    }
}

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #1f2937; }
h1 { font-size: 1.8rem; }
form { margin: 1rem 0 2rem; }
input[type=text] { width: 100%; padding: .5rem; box-sizing: border-box; }
button { margin-top: .5rem; padding: .4rem 1.2rem; }
.banner { padding: .75rem 1rem; border-radius: .4rem; margin: 1rem 0; }
.banner.success { background: #d1fae5; color: #065f46; }
.banner.warning { background: #fef3c7; color: #92400e; }
.banner.error { background: #fee2e2; color: #991b1b; }
table { border-collapse: collapse; width: 100%; font-size: .9rem; margin: 1rem 0; }
th, td { border-bottom: 1px solid #e5e7eb; padding: .3rem .5rem; text-align: left; word-break: break-all; }
.muted { color: #6b7280; font-size: .85rem; }
"#;

/// Wrap a body in the shared page shell
pub(crate) fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Malicious URL Detector</title>\n<style>{}</style>\n</head>\n<body>\n\
         <h1>🔍 Malicious URL Detection</h1>\n{}</body>\n</html>\n",
        STYLE, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_text_banner_is_escaped() {
        let banner = Banner::text(BannerKind::Error, "<script>");
        assert!(banner.render().contains("&lt;script&gt;"));
        assert!(banner.render().contains("banner error"));
    }
}
