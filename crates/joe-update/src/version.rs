//! Release tag normalization and version comparison

use semver::Version;

use crate::error::UpdateError;

/// Strip a single leading non-digit version marker from a release tag.
///
/// Registry tags are commonly written with a `v` prefix (`v1.2.3`); the
/// bare numeric form is what gets compared everywhere else. Stripping is
/// idempotent: an already-bare tag comes back unchanged.
pub fn normalize_tag(tag: &str) -> &str {
    match tag.chars().next() {
        Some(c) if !c.is_ascii_digit() => &tag[c.len_utf8()..],
        _ => tag,
    }
}

/// Parse a normalized tag into a semantic version.
///
/// Missing minor/patch components are treated as zero, so `1.2` parses
/// as `1.2.0`.
pub fn parse_version(tag: &str) -> Result<Version, UpdateError> {
    let normalized = normalize_tag(tag);

    if let Ok(version) = Version::parse(normalized) {
        return Ok(version);
    }

    let padded = match normalized.matches('.').count() {
        0 => format!("{normalized}.0.0"),
        1 => format!("{normalized}.0"),
        _ => normalized.to_string(),
    };

    Version::parse(&padded)
        .map_err(|e| UpdateError::parse(format!("invalid version tag {tag:?}: {e}")))
}

/// An update is warranted only when the latest version is strictly newer.
///
/// Equal or older registry versions never trigger an update, including when
/// the registry lags behind a locally patched build.
pub fn update_available(current: &Version, latest: &Version) -> bool {
    latest > current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn normalize_strips_single_marker() {
        assert_eq!(normalize_tag("v1.2.3"), "1.2.3");
        assert_eq!(normalize_tag("r2.0.0"), "2.0.0");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_tag("v1.2.3");
        assert_eq!(normalize_tag(once), once);
        assert_eq!(normalize_tag("1.2.3"), "1.2.3");
    }

    #[test]
    fn parse_accepts_prefixed_tags() {
        assert_eq!(parse_version("v1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn parse_pads_missing_components() {
        assert_eq!(parse_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_version("3").unwrap(), Version::new(3, 0, 0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            parse_version("not-a-version"),
            Err(UpdateError::Parse { .. })
        ));
    }

    #[test]
    fn comparison_is_numeric_per_field() {
        let a = parse_version("1.2.3").unwrap();
        let b = parse_version("1.10.0").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn update_only_on_strictly_newer() {
        let current = Version::new(1, 2, 0);
        assert!(update_available(&current, &Version::new(1, 2, 1)));
        assert!(!update_available(&current, &Version::new(1, 2, 0)));
        // Registry lagging behind a locally patched build
        assert!(!update_available(&current, &Version::new(1, 1, 9)));
    }
}
