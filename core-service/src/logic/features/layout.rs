//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! A model artifact is trained against one ordered list of features. The
//! classifier receives plain numbers, so a reordered or shortened vector is
//! never rejected by the model itself: it just predicts garbage. Every
//! schema therefore carries a version byte and a CRC32 layout hash, and
//! artifacts are checked against both at load time.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature to a built-in layout → bump its version
//! 2. Change order → bump its version
//! 3. Remove feature → bump its version

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE CATALOGUE
// ============================================================================

/// Every feature the extractor knows how to compute.
///
/// The serde names are the column names used by the training pipeline and
/// by model artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "url_length")]
    UrlLength,
    #[serde(rename = "hostname_length")]
    HostnameLength,
    #[serde(rename = "path_length")]
    PathLength,
    #[serde(rename = "fd_length")]
    FdLength,
    #[serde(rename = "tld_length")]
    TldLength,
    #[serde(rename = "count-")]
    CountDash,
    #[serde(rename = "count@")]
    CountAt,
    #[serde(rename = "count?")]
    CountQuestion,
    #[serde(rename = "count%")]
    CountPercent,
    #[serde(rename = "count.")]
    CountDot,
    #[serde(rename = "count=")]
    CountEquals,
    #[serde(rename = "count-http")]
    CountHttp,
    #[serde(rename = "count-https")]
    CountHttps,
    #[serde(rename = "count-www")]
    CountWww,
    #[serde(rename = "count-digits")]
    CountDigits,
    #[serde(rename = "count-letters")]
    CountLetters,
    #[serde(rename = "count-special")]
    CountSpecial,
    #[serde(rename = "count_dir")]
    CountDir,
    #[serde(rename = "use_of_ip")]
    UseOfIp,
    #[serde(rename = "short_url")]
    ShortUrl,
    #[serde(rename = "short_length")]
    ShortLength,
}

impl Feature {
    pub const ALL: [Feature; 21] = [
        Feature::UrlLength,
        Feature::HostnameLength,
        Feature::PathLength,
        Feature::FdLength,
        Feature::TldLength,
        Feature::CountDash,
        Feature::CountAt,
        Feature::CountQuestion,
        Feature::CountPercent,
        Feature::CountDot,
        Feature::CountEquals,
        Feature::CountHttp,
        Feature::CountHttps,
        Feature::CountWww,
        Feature::CountDigits,
        Feature::CountLetters,
        Feature::CountSpecial,
        Feature::CountDir,
        Feature::UseOfIp,
        Feature::ShortUrl,
        Feature::ShortLength,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::UrlLength => "url_length",
            Feature::HostnameLength => "hostname_length",
            Feature::PathLength => "path_length",
            Feature::FdLength => "fd_length",
            Feature::TldLength => "tld_length",
            Feature::CountDash => "count-",
            Feature::CountAt => "count@",
            Feature::CountQuestion => "count?",
            Feature::CountPercent => "count%",
            Feature::CountDot => "count.",
            Feature::CountEquals => "count=",
            Feature::CountHttp => "count-http",
            Feature::CountHttps => "count-https",
            Feature::CountWww => "count-www",
            Feature::CountDigits => "count-digits",
            Feature::CountLetters => "count-letters",
            Feature::CountSpecial => "count-special",
            Feature::CountDir => "count_dir",
            Feature::UseOfIp => "use_of_ip",
            Feature::ShortUrl => "short_url",
            Feature::ShortLength => "short_length",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Human readable description for the UI
    pub fn description(&self) -> &'static str {
        match self {
            Feature::UrlLength => "Length of the full URL",
            Feature::HostnameLength => "Length of the network location",
            Feature::PathLength => "Length of the path",
            Feature::FdLength => "Length of the first directory in the path",
            Feature::TldLength => "Length of the public suffix",
            Feature::CountDash => "Number of '-' characters",
            Feature::CountAt => "Number of '@' characters (credential trick)",
            Feature::CountQuestion => "Number of '?' characters",
            Feature::CountPercent => "Number of '%' characters (encoding)",
            Feature::CountDot => "Number of '.' characters",
            Feature::CountEquals => "Number of '=' characters",
            Feature::CountHttp => "Occurrences of 'http' (includes 'https')",
            Feature::CountHttps => "Occurrences of 'https'",
            Feature::CountWww => "Occurrences of 'www'",
            Feature::CountDigits => "Number of digits",
            Feature::CountLetters => "Number of letters",
            Feature::CountSpecial => "Number of non-alphanumeric characters",
            Feature::CountDir => "Number of '/' in the path",
            Feature::UseOfIp => "Hostname contains an IPv4 literal",
            Feature::ShortUrl => "URL uses a known shortening service",
            Feature::ShortLength => "URL is shorter than 54 characters",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// BUILT-IN LAYOUTS (Authoritative source)
// ============================================================================

/// Version of the canonical layout
pub const FEATURE_VERSION: u8 = 1;

/// Version of the extended layout
pub const EXTENDED_FEATURE_VERSION: u8 = 2;

/// Canonical layout: the order the deployed random forest was trained on.
pub const FEATURE_LAYOUT: &[Feature] = &[
    // === Lengths (0-3) ===
    Feature::HostnameLength, // 0
    Feature::PathLength,     // 1
    Feature::FdLength,       // 2
    Feature::TldLength,      // 3

    // === Character counts (4-9) ===
    Feature::CountDash,      // 4
    Feature::CountAt,        // 5
    Feature::CountQuestion,  // 6
    Feature::CountPercent,   // 7
    Feature::CountDot,       // 8
    Feature::CountEquals,    // 9

    // === Substring counts (10-12) ===
    Feature::CountHttp,      // 10
    Feature::CountHttps,     // 11
    Feature::CountWww,       // 12

    // === Character classes (13-15) ===
    Feature::CountDigits,    // 13
    Feature::CountLetters,   // 14
    Feature::CountDir,       // 15

    // === Binary (16-17) ===
    Feature::UseOfIp,        // 16
    Feature::ShortUrl,       // 17
];

/// Total number of canonical features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 18;

/// Extended layout with the full URL length, special-character count and the
/// "shorter than 54" heuristic.
pub const EXTENDED_LAYOUT: &[Feature] = &[
    Feature::UrlLength,
    Feature::HostnameLength,
    Feature::PathLength,
    Feature::FdLength,
    Feature::TldLength,
    Feature::CountDash,
    Feature::CountAt,
    Feature::CountQuestion,
    Feature::CountPercent,
    Feature::CountDot,
    Feature::CountEquals,
    Feature::CountHttp,
    Feature::CountHttps,
    Feature::CountWww,
    Feature::CountDigits,
    Feature::CountLetters,
    Feature::CountDir,
    Feature::UseOfIp,
    Feature::ShortUrl,
    Feature::CountSpecial,
    Feature::ShortLength,
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("Unknown feature name: {0}")]
    UnknownFeature(String),

    #[error("Feature listed twice: {0}")]
    DuplicateFeature(String),

    #[error("Feature layout is empty")]
    Empty,

    #[error(
        "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
         got v{actual_version} (hash: {actual_hash:08x})"
    )]
    Mismatch {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },
}

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version and the ordered feature names
pub fn compute_layout_hash<'a, I>(version: u8, names: I) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Hasher::new();

    hasher.update(&[version]);

    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Hash of the canonical layout
pub fn layout_hash() -> u32 {
    compute_layout_hash(FEATURE_VERSION, FEATURE_LAYOUT.iter().map(Feature::name))
}

// ============================================================================
// SCHEMA
// ============================================================================

/// Ordered, versioned feature list shared by the extractor and a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    version: u8,
    features: Vec<Feature>,
    hash: u32,
}

impl FeatureSchema {
    pub fn new(version: u8, features: Vec<Feature>) -> Result<Self, LayoutError> {
        if features.is_empty() {
            return Err(LayoutError::Empty);
        }

        for (i, feature) in features.iter().enumerate() {
            if features[..i].contains(feature) {
                return Err(LayoutError::DuplicateFeature(feature.name().to_string()));
            }
        }

        let hash = compute_layout_hash(version, features.iter().map(Feature::name));
        Ok(Self { version, features, hash })
    }

    /// The 18-feature layout of the deployed model
    pub fn canonical() -> Self {
        Self {
            version: FEATURE_VERSION,
            features: FEATURE_LAYOUT.to_vec(),
            hash: layout_hash(),
        }
    }

    /// The 21-feature layout
    pub fn extended() -> Self {
        Self {
            version: EXTENDED_FEATURE_VERSION,
            features: EXTENDED_LAYOUT.to_vec(),
            hash: compute_layout_hash(
                EXTENDED_FEATURE_VERSION,
                EXTENDED_LAYOUT.iter().map(Feature::name),
            ),
        }
    }

    /// Look up a built-in layout by version
    pub fn builtin(version: u8) -> Option<Self> {
        match version {
            FEATURE_VERSION => Some(Self::canonical()),
            EXTENDED_FEATURE_VERSION => Some(Self::extended()),
            _ => None,
        }
    }

    /// Resolve the feature order an artifact declares
    pub fn from_names<S: AsRef<str>>(version: u8, names: &[S]) -> Result<Self, LayoutError> {
        let features = names
            .iter()
            .map(|n| {
                let name = n.as_ref();
                Feature::from_name(name).ok_or_else(|| LayoutError::UnknownFeature(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(version, features)
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn layout_hash(&self) -> u32 {
        self.hash
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(Feature::name)
    }

    pub fn position(&self, feature: Feature) -> Option<usize> {
        self.features.iter().position(|&f| f == feature)
    }

    /// Validate that incoming data matches this layout
    pub fn validate(&self, incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutError> {
        if incoming_version != self.version || incoming_hash != self.hash {
            return Err(LayoutError::Mismatch {
                expected_version: self.version,
                expected_hash: self.hash,
                actual_version: incoming_version,
                actual_hash: incoming_hash,
            });
        }

        Ok(())
    }

    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            version: self.version,
            hash: self.hash,
            feature_count: self.features.len(),
            feature_names: self.names().map(str::to_string).collect(),
        }
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::canonical()
    }
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl Default for LayoutInfo {
    fn default() -> Self {
        FeatureSchema::canonical().info()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 18);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(EXTENDED_LAYOUT.len(), 21);
    }

    #[test]
    fn test_canonical_order() {
        let schema = FeatureSchema::canonical();
        assert_eq!(schema.names().next(), Some("hostname_length"));
        assert_eq!(schema.names().nth(10), Some("count-http"));
        assert_eq!(schema.names().nth(16), Some("use_of_ip"));
        assert_eq!(schema.names().nth(17), Some("short_url"));
        assert_eq!(schema.names().nth(18), None);
    }

    #[test]
    fn test_names_round_trip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
        }
        assert_eq!(Feature::from_name("nonexistent"), None);
    }

    #[test]
    fn test_serde_uses_column_names() {
        let json = serde_json::to_string(&Feature::CountDash).unwrap();
        assert_eq!(json, "\"count-\"");
        let back: Feature = serde_json::from_str("\"count_dir\"").unwrap();
        assert_eq!(back, Feature::CountDir);
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(layout_hash(), layout_hash());
        assert_eq!(FeatureSchema::canonical().layout_hash(), layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_layout_hash_depends_on_version_and_order() {
        let names: Vec<&str> = FEATURE_LAYOUT.iter().map(Feature::name).collect();
        let other_version = compute_layout_hash(FEATURE_VERSION + 1, names.iter().copied());
        assert_ne!(other_version, layout_hash());

        let mut swapped = names.clone();
        swapped.swap(0, 1);
        let other_order = compute_layout_hash(FEATURE_VERSION, swapped.iter().copied());
        assert_ne!(other_order, layout_hash());
    }

    #[test]
    fn test_from_names_matches_builtin() {
        let names: Vec<&str> = FEATURE_LAYOUT.iter().map(Feature::name).collect();
        let schema = FeatureSchema::from_names(FEATURE_VERSION, &names).unwrap();
        assert_eq!(schema, FeatureSchema::canonical());
    }

    #[test]
    fn test_from_names_rejects_unknown() {
        let err = FeatureSchema::from_names(1, &["hostname_length", "entropy"]).unwrap_err();
        assert_eq!(err, LayoutError::UnknownFeature("entropy".to_string()));
    }

    #[test]
    fn test_from_names_rejects_duplicates_and_empty() {
        let err = FeatureSchema::from_names(1, &["count@", "count@"]).unwrap_err();
        assert_eq!(err, LayoutError::DuplicateFeature("count@".to_string()));

        let empty: [&str; 0] = [];
        assert_eq!(FeatureSchema::from_names(1, &empty).unwrap_err(), LayoutError::Empty);
    }

    #[test]
    fn test_validate_layout() {
        let schema = FeatureSchema::canonical();
        assert!(schema.validate(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(schema.validate(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(schema.validate(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(FeatureSchema::builtin(1), Some(FeatureSchema::canonical()));
        assert_eq!(FeatureSchema::builtin(2), Some(FeatureSchema::extended()));
        assert_eq!(FeatureSchema::builtin(9), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::default();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
