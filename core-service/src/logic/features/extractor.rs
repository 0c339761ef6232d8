//! URL Feature Extractor
//!
//! URL string → feature vector. Pure, stateless, never fails: when the URL
//! cannot be split, hostname/path/suffix all fall back to "" and the
//! string-level counts are still computed from the raw input.

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;

use super::charclass::{is_alnum, is_alpha, is_digit};
use super::layout::{Feature, FeatureSchema};
use super::shorteners::is_short_url;
use super::suffix::public_suffix;
use super::url_parts::UrlParts;
use super::vector::{stack, FeatureVector};

/// URLs shorter than this count as "short"
pub const SHORT_URL_LENGTH: usize = 54;

static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.\d+\.\d+\.\d+").expect("IPv4 pattern is a valid regex"));

/// Parsed pieces shared by every feature of one URL
struct UrlContext<'a> {
    url: &'a str,
    parts: UrlParts,
    suffix: String,
}

impl<'a> UrlContext<'a> {
    fn new(url: &'a str) -> Self {
        let (parts, suffix) = match UrlParts::parse(url) {
            Ok(parts) => (parts, public_suffix(url)),
            Err(e) => {
                log::trace!("URL split failed ({}), using empty components", e);
                (UrlParts::default(), String::new())
            }
        };

        Self { url, parts, suffix }
    }

    fn compute(&self, feature: Feature) -> f32 {
        let url = self.url;
        let value = match feature {
            Feature::UrlLength => char_len(url),
            Feature::HostnameLength => char_len(&self.parts.netloc),
            Feature::PathLength => char_len(&self.parts.path),
            Feature::FdLength => self.parts.first_dir().map_or(0, char_len),
            Feature::TldLength => char_len(&self.suffix),
            Feature::CountDash => url.matches('-').count(),
            Feature::CountAt => url.matches('@').count(),
            Feature::CountQuestion => url.matches('?').count(),
            Feature::CountPercent => url.matches('%').count(),
            Feature::CountDot => url.matches('.').count(),
            Feature::CountEquals => url.matches('=').count(),
            // "https" contains "http": both are counted here
            Feature::CountHttp => url.matches("http").count(),
            Feature::CountHttps => url.matches("https").count(),
            Feature::CountWww => url.matches("www").count(),
            Feature::CountDigits => url.chars().filter(|&c| is_digit(c)).count(),
            Feature::CountLetters => url.chars().filter(|&c| is_alpha(c)).count(),
            Feature::CountSpecial => url.chars().filter(|&c| !is_alnum(c)).count(),
            Feature::CountDir => self.parts.path.matches('/').count(),
            Feature::UseOfIp => usize::from(IPV4_RE.is_match(&self.parts.netloc)),
            Feature::ShortUrl => usize::from(is_short_url(url)),
            Feature::ShortLength => usize::from(char_len(url) < SHORT_URL_LENGTH),
        };

        value as f32
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ============================================================================
// EXTRACTOR
// ============================================================================

/// Extracts vectors in one fixed schema
#[derive(Debug, Clone, Default)]
pub struct FeatureExtractor {
    schema: FeatureSchema,
}

impl FeatureExtractor {
    pub fn new(schema: FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn extract(&self, url: &str) -> FeatureVector {
        let ctx = UrlContext::new(url);
        let mut vector = FeatureVector::zeroed(&self.schema);

        for (i, feature) in self.schema.features().iter().enumerate() {
            vector.set(i, ctx.compute(*feature));
        }

        vector
    }

    pub fn extract_all<S: AsRef<str>>(&self, urls: &[S]) -> Vec<FeatureVector> {
        urls.iter().map(|u| self.extract(u.as_ref())).collect()
    }

    /// `[urls.len(), schema.len()]` matrix, rows in input order
    pub fn extract_matrix<S: AsRef<str>>(&self, urls: &[S]) -> Array2<f32> {
        stack(&self.extract_all(urls), self.schema.len())
    }
}

/// Extract with the canonical schema
pub fn extract_features(url: &str) -> FeatureVector {
    FeatureExtractor::default().extract(url)
}
