//! Pure helpers: content-type and transport error classification (no HTTP).

use std::error::Error as StdError;

use crate::error::{CheckError, Stage};
use crate::types::ContentKind;

/// MIME type of a signed manifest.
pub const ENVELOPE_MIME: &str = "application/pkcs7-mime";

/// MIME types accepted for plain manifests.
pub const JSON_MIMES: [&str; 2] = ["application/json", "text/json"];

/// Lowercased media type without parameters (`application/json; charset=utf-8`
/// becomes `application/json`).
pub(crate) fn mime_essence(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Classify a content-type header. JSON is only acceptable when
/// `allow_unencrypted` is set.
pub(crate) fn classify_content_type(
    content_type: Option<&str>,
    allow_unencrypted: bool,
) -> Option<ContentKind> {
    let essence = mime_essence(content_type?);
    if essence == ENVELOPE_MIME {
        Some(ContentKind::Envelope)
    } else if allow_unencrypted && JSON_MIMES.contains(&essence.as_str()) {
        Some(ContentKind::Json)
    } else {
        None
    }
}

/// Markers of name resolution failures across resolvers and platforms.
const DNS_MARKERS: [&str; 5] = [
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

/// Map a transport-level failure to the check error it stands for.
///
/// Anything that is neither a timeout nor a resolution failure means no
/// usable https connection could be established.
pub(crate) fn classify_transport(err: &reqwest::Error, domain: &str) -> CheckError {
    if err.is_timeout() || chain_has_timeout(err) {
        return CheckError::Timeout {
            stage: Stage::Fetch,
        };
    }

    if is_dns_failure(err) {
        return CheckError::BadDns {
            domain: domain.to_string(),
        };
    }

    CheckError::HttpsFailure {
        domain: domain.to_string(),
        reason: describe_chain(err),
    }
}

fn sources<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |e| (*e).source())
}

pub(crate) fn is_dns_failure(err: &(dyn StdError + 'static)) -> bool {
    sources(err).any(|e| {
        let msg = e.to_string().to_ascii_lowercase();
        DNS_MARKERS.iter().any(|marker| msg.contains(marker))
    })
}

fn chain_has_timeout(err: &(dyn StdError + 'static)) -> bool {
    sources(err).any(|e| {
        e.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
    })
}

/// `outer: inner: root` rendering of an error chain, without repeats.
pub(crate) fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts: Vec<String> = Vec::new();
    for e in sources(err) {
        let msg = e.to_string();
        if !parts.iter().any(|p| p.contains(&msg)) {
            parts.push(msg);
        }
    }
    parts.join(": ")
}
