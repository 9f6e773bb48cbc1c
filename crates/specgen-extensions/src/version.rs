//! Version constraints on extension requirements.
//!
//! A constraint is a comma-separated list of specifiers that must all match:
//!
//! - `>= 1.0.0, < 2.0.0`
//! - `==1.2.0`
//! - `!=1.1` (a missing patch component defaults to 0)
//! - `*` accepts every version
//!
//! # Examples
//!
//! ```
//! use specgen_extensions::version::VersionConstraint;
//!
//! let constraint = VersionConstraint::parse(">= 1.0.0, < 2.0.0").unwrap();
//! assert!(constraint.satisfies("1.0.0"));
//! assert!(constraint.satisfies("1.4"));
//! assert!(!constraint.satisfies("2.0.0"));
//!
//! assert!(VersionConstraint::parse("*").unwrap().satisfies("0.1.0"));
//! ```

use std::fmt;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompareOp {
    Gte,
    Gt,
    Lte,
    Lt,
    Eq,
    Ne,
}

impl CompareOp {
    fn split(s: &str) -> (Self, &str) {
        // Two-character operators must be tried before their prefixes.
        const OPS: &[(&str, CompareOp)] = &[
            (">=", CompareOp::Gte),
            ("<=", CompareOp::Lte),
            ("!=", CompareOp::Ne),
            ("==", CompareOp::Eq),
            (">", CompareOp::Gt),
            ("<", CompareOp::Lt),
            ("=", CompareOp::Eq),
        ];

        OPS.iter()
            .find_map(|(prefix, op)| s.strip_prefix(prefix).map(|rest| (*op, rest)))
            .unwrap_or((CompareOp::Eq, s))
    }
}

#[derive(Debug, Clone)]
struct Specifier {
    op: CompareOp,
    version: semver::Version,
}

impl Specifier {
    fn parse(s: &str) -> Result<Self> {
        let (op, version_str) = CompareOp::split(s);
        let version_str = version_str.trim();
        let version = normalize_version(version_str).ok_or_else(|| Error::VersionConstraintParse {
            constraint: s.to_string(),
            reason: format!("invalid version: {version_str}"),
        })?;
        Ok(Self { op, version })
    }

    fn matches(&self, candidate: &semver::Version) -> bool {
        match self.op {
            CompareOp::Gte => candidate >= &self.version,
            CompareOp::Gt => candidate > &self.version,
            CompareOp::Lte => candidate <= &self.version,
            CompareOp::Lt => candidate < &self.version,
            CompareOp::Eq => candidate == &self.version,
            CompareOp::Ne => candidate != &self.version,
        }
    }
}

/// A parsed requirement constraint, checked against registered versions.
#[derive(Debug, Clone)]
pub struct VersionConstraint {
    /// Empty means any version.
    specifiers: Vec<Specifier>,
    raw: String,
}

impl VersionConstraint {
    /// Parse a constraint string.
    pub fn parse(constraint: &str) -> Result<Self> {
        let raw = constraint.trim().to_string();
        if raw == "*" {
            return Ok(Self::any());
        }

        let specifiers = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Specifier::parse)
            .collect::<Result<Vec<_>>>()?;

        if specifiers.is_empty() {
            return Err(Error::VersionConstraintParse {
                constraint: raw,
                reason: "empty constraint".to_string(),
            });
        }

        Ok(Self { specifiers, raw })
    }

    /// A constraint accepting every version.
    pub fn any() -> Self {
        Self {
            specifiers: Vec::new(),
            raw: "*".to_string(),
        }
    }

    /// Check a version string. Unparseable versions never satisfy.
    pub fn satisfies(&self, version: &str) -> bool {
        normalize_version(version).is_some_and(|v| self.satisfies_version(&v))
    }

    pub fn satisfies_version(&self, version: &semver::Version) -> bool {
        self.specifiers.iter().all(|spec| spec.matches(version))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse `major.minor.patch`, accepting `major.minor` as `major.minor.0`.
fn normalize_version(s: &str) -> Option<semver::Version> {
    let s = s.trim();
    semver::Version::parse(s)
        .or_else(|_| semver::Version::parse(&format!("{s}.0")))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_compound_with_spaces() {
        let c = VersionConstraint::parse(">= 1.0.0, < 2.0.0").unwrap();
        assert_eq!(c.specifiers.len(), 2);
        assert_eq!(c.as_str(), ">= 1.0.0, < 2.0.0");
    }

    #[test]
    fn test_parse_star_is_any() {
        let c = VersionConstraint::parse(" * ").unwrap();
        assert!(c.specifiers.is_empty());
        assert_eq!(c.to_string(), "*");
        assert!(c.satisfies("0.0.1"));
        assert!(c.satisfies("99.0.0"));
    }

    #[rstest]
    #[case("")]
    #[case(" , ")]
    #[case(">=abc")]
    #[case("<1")]
    fn test_parse_rejected(#[case] input: &str) {
        let err = VersionConstraint::parse(input).unwrap_err();
        assert!(matches!(err, Error::VersionConstraintParse { .. }));
    }

    #[rstest]
    #[case(">=1.0.0", "1.0.0", true)]
    #[case(">=1.0.0", "0.9.9", false)]
    #[case(">1.0", "1.0.1", true)]
    #[case(">1.0", "1.0.0", false)]
    #[case("<=2.0", "2.0.0", true)]
    #[case("<2.0.0", "2.0.0", false)]
    #[case("==1.2.0", "1.2.0", true)]
    #[case("=1.2", "1.2.1", false)]
    #[case("1.2.0", "1.2.0", true)]
    #[case("!=1.1", "1.1.0", false)]
    #[case("!=1.1", "1.2.0", true)]
    #[case(">= 1.0.0, < 2.0.0", "1.9.9", true)]
    #[case(">= 1.0.0, < 2.0.0", "2.0.0", false)]
    fn test_satisfies(#[case] constraint: &str, #[case] version: &str, #[case] expected: bool) {
        let c = VersionConstraint::parse(constraint).unwrap();
        assert_eq!(c.satisfies(version), expected, "{constraint} vs {version}");
    }

    #[test]
    fn test_invalid_version_never_satisfies() {
        let c = VersionConstraint::parse(">=1.0").unwrap();
        assert!(!c.satisfies("not-a-version"));
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("1.2"), Some(semver::Version::new(1, 2, 0)));
        assert_eq!(normalize_version(" 1.2.3 "), Some(semver::Version::new(1, 2, 3)));
        assert_eq!(normalize_version("1"), None);
    }
}
