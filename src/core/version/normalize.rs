// ─── Version Normalizer ───
// Splits a raw repository version into its base version and build number.
//
// Two historical spellings exist:
//   `1.18.2+build.3`  → base `1.18.2`, build 3
//   `1.14-pre1.2` / `19w02a.5` (legacy) → base before the last `-` when one
//   is present, otherwise before the last `.`
//
// The base and the build number use different split points in the legacy
// spelling. Both rules are kept as they are.

use crate::core::error::{MetaError, MetaResult};

/// Token separating the base version from the build number.
pub const BUILD_SEPARATOR: &str = "+build.";

/// Separator reported for versions without [`BUILD_SEPARATOR`].
pub const LEGACY_SEPARATOR: &str = ".";

/// A raw version split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVersion {
    pub raw: String,
    pub base: String,
    pub separator: &'static str,
    pub build: u32,
}

impl NormalizedVersion {
    pub fn parse(raw: &str) -> MetaResult<Self> {
        Ok(Self {
            raw: raw.to_string(),
            base: base_version(raw)?.to_string(),
            separator: separator(raw),
            build: build_number(raw)?,
        })
    }
}

/// The version with its build suffix removed.
///
/// Fails when the legacy spelling carries neither `-` nor `.`.
pub fn base_version(raw: &str) -> MetaResult<&str> {
    if let Some(idx) = raw.rfind(BUILD_SEPARATOR) {
        return Ok(&raw[..idx]);
    }

    let fallback = if raw.contains('-') { '-' } else { '.' };
    raw.rfind(fallback)
        .map(|idx| &raw[..idx])
        .ok_or_else(|| MetaError::Normalization {
            version: raw.to_string(),
            reason: format!("no {:?} to split the base version at", fallback),
        })
}

/// Separator as published in records: `+build.` or `.`.
pub fn separator(raw: &str) -> &'static str {
    if raw.contains(BUILD_SEPARATOR) {
        BUILD_SEPARATOR
    } else {
        LEGACY_SEPARATOR
    }
}

/// The integer after the final `.` of the raw string.
pub fn build_number(raw: &str) -> MetaResult<u32> {
    let suffix = match raw.rfind('.') {
        Some(idx) => &raw[idx + 1..],
        None => raw,
    };

    suffix.parse().map_err(|e| MetaError::Normalization {
        version: raw.to_string(),
        reason: format!("build number {:?} is not an integer: {}", suffix, e),
    })
}

/// Strips only the `+build.` suffix; legacy spellings are returned untouched.
pub fn release_version(raw: &str) -> &str {
    match raw.rfind(BUILD_SEPARATOR) {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn build_token_splits_at_last_occurrence() {
        let v = NormalizedVersion::parse("1.18.2+build.3").unwrap();
        assert_eq!(v.base, "1.18.2");
        assert_eq!(v.separator, "+build.");
        assert_eq!(v.build, 3);

        let v = NormalizedVersion::parse("1.0+build.2-x+build.7").unwrap();
        assert_eq!(v.base, "1.0+build.2-x");
        assert_eq!(v.build, 7);
    }

    #[test]
    fn legacy_prefers_dash_over_dot() {
        // Base splits at the last `-`, build at the last `.`.
        let v = NormalizedVersion::parse("1.14-pre1.2").unwrap();
        assert_eq!(v.base, "1.14");
        assert_eq!(v.separator, ".");
        assert_eq!(v.build, 2);
    }

    #[test]
    fn legacy_without_dash_splits_at_last_dot() {
        let v = NormalizedVersion::parse("19w02a.5").unwrap();
        assert_eq!(v.base, "19w02a");
        assert_eq!(v.separator, ".");
        assert_eq!(v.build, 5);
    }

    #[test]
    fn build_token_wins_over_dash() {
        let v = NormalizedVersion::parse("1.19-pre1+build.4").unwrap();
        assert_eq!(v.base, "1.19-pre1");
        assert_eq!(v.separator, "+build.");
        assert_eq!(v.build, 4);
    }

    #[test]
    fn non_numeric_build_is_fatal() {
        let err = NormalizedVersion::parse("1.14-pre1.beta").unwrap_err();
        assert!(matches!(err, MetaError::Normalization { version, .. } if version == "1.14-pre1.beta"));
    }

    #[test]
    fn base_without_any_separator_is_fatal() {
        assert!(base_version("snapshot").is_err());
        assert!(NormalizedVersion::parse("42").is_err());
    }

    #[test]
    fn release_version_keeps_legacy_spelling() {
        assert_eq!(release_version("0.17.0+build.2"), "0.17.0");
        assert_eq!(release_version("0.17.0-beta.3"), "0.17.0-beta.3");
    }

    proptest! {
        #[test]
        fn build_token_splits_any_base(base in "[0-9a-z.+-]{0,16}", build in any::<u32>()) {
            let raw = format!("{}+build.{}", base, build);
            let v = NormalizedVersion::parse(&raw).unwrap();
            prop_assert_eq!(v.base, base.clone());
            prop_assert_eq!(v.separator, BUILD_SEPARATOR);
            prop_assert_eq!(v.build, build);
            prop_assert_eq!(release_version(&raw), base.as_str());
        }

        #[test]
        fn legacy_base_splits_at_last_dash(
            head in "[0-9a-z.]{1,10}",
            tail in "[0-9a-z]{0,6}",
            build in any::<u32>()
        ) {
            let raw = format!("{}-{}.{}", head, tail, build);
            let v = NormalizedVersion::parse(&raw).unwrap();
            prop_assert_eq!(v.base, head);
            prop_assert_eq!(v.separator, LEGACY_SEPARATOR);
            prop_assert_eq!(v.build, build);
            prop_assert_eq!(release_version(&raw), raw.as_str());
        }

        #[test]
        fn dotted_legacy_splits_for_any_head(head in "[0-9a-z.]{1,10}", build in any::<u32>()) {
            let raw = format!("{}.{}", head, build);
            let v = NormalizedVersion::parse(&raw).unwrap();
            prop_assert_eq!(v.base, head);
            prop_assert_eq!(v.separator, LEGACY_SEPARATOR);
            prop_assert_eq!(v.build, build);
        }
    }
}
