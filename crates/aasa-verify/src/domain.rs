//! Domain normalization and manifest location.

use crate::error::{CheckError, CheckResult};

/// Well-known path of the association manifest.
pub const MANIFEST_PATH: &str = "/apple-app-site-association";

/// Strip scheme and path from a user-supplied domain.
///
/// `https://example.com/foo/bar` becomes `example.com`. A port is kept.
pub fn normalize_domain(input: &str) -> CheckResult<String> {
    let trimmed = input.trim();
    let without_scheme = strip_scheme(trimmed);
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string();

    if host.is_empty() {
        return Err(CheckError::InvalidDomain {
            input: input.to_string(),
        });
    }

    Ok(host)
}

fn strip_scheme(s: &str) -> &str {
    for scheme in ["https://", "http://"] {
        match (s.get(..scheme.len()), s.get(scheme.len()..)) {
            (Some(prefix), Some(rest)) if prefix.eq_ignore_ascii_case(scheme) => return rest,
            _ => {}
        }
    }
    s
}

/// Manifest URL for an already-normalized domain.
pub fn manifest_url(scheme: &str, domain: &str) -> String {
    format!("{}://{}{}", scheme, domain, MANIFEST_PATH)
}
