//! License field normalization and SPDX classification.
//!
//! CycloneDX producers disagree on how a component's license is written
//! down. [`LicenseField`] accepts every shape we have seen and
//! [`canonical_license`] folds them into one comparable string, so the
//! differ never has to care which shape a document used.

use super::UNKNOWN;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

/// Separator between several licenses declared for the same component.
pub const LICENSE_SEPARATOR: &str = ", ";

/// Any of the license representations found on a component entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    /// `"MIT"`
    Text(String),
    /// `[{"license": {"id": "MIT"}}, {"expression": "..."}, "BSD-3-Clause"]`
    Choices(Vec<LicenseChoice>),
    /// A single choice object outside a list
    Choice(LicenseChoice),
}

/// One entry of a CycloneDX `licenses` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LicenseChoice {
    /// `{"license": {"id": "MIT"}}`
    Wrapped { license: LicenseRef },
    /// `{"expression": "MIT OR Apache-2.0"}`
    Expression { expression: String },
    /// `{"id": "MIT"}` without the wrapper
    Bare(LicenseRef),
    /// `"MIT"`
    Text(String),
    /// Anything else; carries no license
    Other(serde_json::Value),
}

/// A CycloneDX license object: an SPDX id or a free-form name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LicenseRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub expression: Option<String>,
}

impl LicenseRef {
    fn value(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .or(self.expression.as_deref())
    }
}

impl LicenseChoice {
    fn value(&self) -> Option<&str> {
        match self {
            Self::Wrapped { license } | Self::Bare(license) => license.value(),
            Self::Expression { expression } => Some(expression.as_str()),
            Self::Text(text) => Some(text.as_str()),
            Self::Other(_) => None,
        }
    }
}

impl LicenseField {
    /// Every raw license string carried by this field, in declaration order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::Choices(choices) => choices.iter().filter_map(LicenseChoice::value).collect(),
            Self::Choice(choice) => choice.value().into_iter().collect(),
        }
    }
}

/// Collapse runs of whitespace and trim.
fn normalize_whitespace(raw: &str) -> String {
    static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();
    let trimmed = raw.trim();
    match WHITESPACE.get_or_init(|| Regex::new(r"\s+").ok()) {
        Some(re) => re.replace_all(trimmed, " ").into_owned(),
        None => trimmed.to_string(),
    }
}

/// Fold all license fields of a component into one canonical string.
///
/// Values are whitespace-normalized, de-duplicated and sorted, then joined
/// with [`LICENSE_SEPARATOR`]. Returns [`UNKNOWN`] when nothing usable is
/// declared.
pub fn canonical_license<'a>(fields: impl IntoIterator<Item = &'a LicenseField>) -> String {
    let values: BTreeSet<String> = fields
        .into_iter()
        .flat_map(LicenseField::values)
        .map(normalize_whitespace)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case(UNKNOWN))
        .collect();

    if values.is_empty() {
        UNKNOWN.to_string()
    } else {
        values.into_iter().collect::<Vec<_>>().join(LICENSE_SEPARATOR)
    }
}

/// License family classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LicenseFamily {
    PublicDomain,
    Permissive,
    WeakCopyleft,
    Copyleft,
    Proprietary,
    Other,
    Unknown,
}

impl LicenseFamily {
    /// Rank used to pick the most restrictive family of several licenses.
    pub const fn restrictiveness(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::PublicDomain => 1,
            Self::Permissive => 2,
            Self::Other => 3,
            Self::WeakCopyleft => 4,
            Self::Copyleft => 5,
            Self::Proprietary => 6,
        }
    }

    /// Classify a canonical license string.
    ///
    /// Several licenses joined by [`LICENSE_SEPARATOR`] all apply, so the most
    /// restrictive one wins.
    #[must_use]
    pub fn classify(canonical: &str) -> Self {
        if canonical == UNKNOWN {
            return Self::Unknown;
        }
        canonical
            .split(LICENSE_SEPARATOR)
            .map(classify_expression)
            .max_by_key(|family| family.restrictiveness())
            .unwrap_or(Self::Unknown)
    }
}

/// Classify one SPDX expression.
///
/// For OR expressions the licensee may pick the permissive branch; for AND
/// the most restrictive requirement applies.
fn classify_expression(expr: &str) -> LicenseFamily {
    let Ok(parsed) = spdx::Expression::parse_mode(expr, spdx::ParseMode::LAX) else {
        return family_from_substring(expr);
    };

    let mut has_or = false;
    let mut strongest = LicenseFamily::Unknown;
    let mut has_permissive = false;

    for node in parsed.iter() {
        match node {
            spdx::expression::ExprNode::Op(spdx::expression::Operator::Or) => has_or = true,
            spdx::expression::ExprNode::Req(req) => {
                let family = if let spdx::LicenseItem::Spdx { id, .. } = req.req.license {
                    classify_spdx_license(id)
                } else {
                    LicenseFamily::Other
                };
                if matches!(family, LicenseFamily::Permissive | LicenseFamily::PublicDomain) {
                    has_permissive = true;
                }
                if family.restrictiveness() > strongest.restrictiveness() {
                    strongest = family;
                }
            }
            _ => {}
        }
    }

    if has_or && has_permissive {
        LicenseFamily::Permissive
    } else {
        strongest
    }
}

/// Classify an SPDX license ID into a license family.
fn classify_spdx_license(id: spdx::LicenseId) -> LicenseFamily {
    let name = id.name;

    if name == "CC0-1.0" || name == "Unlicense" || name == "0BSD" {
        return LicenseFamily::PublicDomain;
    }

    if id.is_copyleft() {
        let name_upper = name.to_uppercase();
        if name_upper.contains("LGPL")
            || name_upper.starts_with("MPL")
            || name_upper.starts_with("EPL")
            || name_upper.starts_with("CDDL")
            || name_upper.starts_with("EUPL")
        {
            LicenseFamily::WeakCopyleft
        } else {
            LicenseFamily::Copyleft
        }
    } else if id.is_osi_approved() || id.is_fsf_free_libre() {
        LicenseFamily::Permissive
    } else {
        LicenseFamily::Other
    }
}

/// Fallback for expressions the SPDX parser rejects.
fn family_from_substring(expr: &str) -> LicenseFamily {
    let lower = expr.to_lowercase();
    if lower.contains("lgpl") || lower.contains("mpl") {
        LicenseFamily::WeakCopyleft
    } else if lower.contains("gpl") {
        LicenseFamily::Copyleft
    } else if lower.contains("mit")
        || lower.contains("apache")
        || lower.contains("bsd")
        || lower.contains("isc")
    {
        LicenseFamily::Permissive
    } else if lower.contains("proprietary") || lower.contains("commercial") {
        LicenseFamily::Proprietary
    } else {
        LicenseFamily::Other
    }
}

impl fmt::Display for LicenseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PublicDomain => write!(f, "public domain"),
            Self::Permissive => write!(f, "permissive"),
            Self::WeakCopyleft => write!(f, "weak copyleft"),
            Self::Copyleft => write!(f, "copyleft"),
            Self::Proprietary => write!(f, "proprietary"),
            Self::Other => write!(f, "other"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(json: &str) -> LicenseField {
        serde_json::from_str(json).expect("license shape should deserialize")
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(canonical_license([&field(r#""MIT""#)]), "MIT");
    }

    #[test]
    fn test_cyclonedx_licenses_array() {
        let f = field(r#"[{"license": {"id": "MIT"}}, {"license": {"name": "Custom EULA"}}]"#);
        assert_eq!(canonical_license([&f]), "Custom EULA, MIT");
    }

    #[test]
    fn test_unrecognized_entries_keep_valid_neighbours() {
        let f = field(r#"[{"license": {"id": "MIT"}}, 3, null, {"expression": "Apache-2.0"}]"#);
        assert_eq!(canonical_license([&f]), "Apache-2.0, MIT");
        assert_eq!(canonical_license([&field("[3, true]")]), UNKNOWN);
    }

    #[test]
    fn test_expression_choice() {
        let f = field(r#"[{"expression": "MIT  OR\tApache-2.0"}]"#);
        assert_eq!(canonical_license([&f]), "MIT OR Apache-2.0");
    }

    #[test]
    fn test_bare_object_and_text_list() {
        assert_eq!(canonical_license([&field(r#"{"id": "ISC"}"#)]), "ISC");
        assert_eq!(
            canonical_license([&field(r#"["BSD-3-Clause", "MIT", "MIT"]"#)]),
            "BSD-3-Clause, MIT"
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = field(r#"["MIT", "Apache-2.0"]"#);
        let b = field(r#"["Apache-2.0", "MIT"]"#);
        assert_eq!(canonical_license([&a]), canonical_license([&b]));
    }

    #[test]
    fn test_nothing_usable_is_unknown() {
        assert_eq!(canonical_license([&field(r#"[]"#)]), UNKNOWN);
        assert_eq!(canonical_license([&field(r#"[{"license": {}}]"#)]), UNKNOWN);
        assert_eq!(canonical_license([&field(r#""  ""#)]), UNKNOWN);
        assert_eq!(canonical_license(std::iter::empty()), UNKNOWN);
    }

    #[test]
    fn test_family_classification() {
        assert_eq!(LicenseFamily::classify("MIT"), LicenseFamily::Permissive);
        assert_eq!(LicenseFamily::classify("GPL-3.0-only"), LicenseFamily::Copyleft);
        assert_eq!(LicenseFamily::classify("LGPL-2.1-only"), LicenseFamily::WeakCopyleft);
        assert_eq!(
            LicenseFamily::classify("MIT OR GPL-3.0-only"),
            LicenseFamily::Permissive
        );
        assert_eq!(
            LicenseFamily::classify("Apache-2.0, GPL-2.0-only"),
            LicenseFamily::Copyleft
        );
        assert_eq!(LicenseFamily::classify(UNKNOWN), LicenseFamily::Unknown);
    }
}
