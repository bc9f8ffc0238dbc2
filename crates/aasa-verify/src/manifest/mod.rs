//! Manifest decoding and structural validation.
//!
//! `applinks.details` comes in two shapes:
//!
//! ```json
//! { "applinks": { "details": [ { "appID": "TEAMID.com.foo.App", "paths": ["*"] } ] } }
//! { "applinks": { "details": { "TEAMID.com.foo.App": { "paths": ["*"] } } } }
//! ```

use serde_json::{Map, Value};

use crate::types::VerificationResult;

mod matcher;

pub use matcher::AppIdPattern;

/// A parsed association manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationDocument {
    raw: Value,
}

/// The `applinks.details` collection.
#[derive(Debug, Clone, Copy)]
pub enum Details<'a> {
    /// `[ { "appID": ..., "paths": [...] } ]`
    Entries(&'a [Value]),
    /// `{ "<appID>": { "paths": [...] } }`
    Map(&'a Map<String, Value>),
}

impl AssociationDocument {
    /// Parse manifest bytes. Fails only if the bytes are not well-formed JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let raw = serde_json::from_slice(bytes)?;
        Ok(Self { raw })
    }

    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// `applinks.details`, if present in one of the two known shapes.
    pub fn details(&self) -> Option<Details<'_>> {
        match self.raw.get("applinks")?.get("details")? {
            Value::Array(entries) => Some(Details::Entries(entries)),
            Value::Object(map) => Some(Details::Map(map)),
            _ => None,
        }
    }

    /// Whole-document shape check; no partial validity.
    pub fn is_structurally_valid(&self) -> bool {
        self.details().is_some_and(|d| d.is_well_formed())
    }

    /// Whether any entry authorizes an app id matching `pattern`.
    pub fn authorizes(&self, pattern: &AppIdPattern) -> bool {
        self.details().is_some_and(|d| d.authorizes(pattern))
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn into_value(self) -> Value {
        self.raw
    }
}

impl Details<'_> {
    /// Every entry carries a `paths` array (and, for entries, a string `appID`).
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Entries(entries) => entries
                .iter()
                .all(|entry| app_id_of(entry).is_some() && has_paths(entry)),
            Self::Map(map) => map.values().all(has_paths),
        }
    }

    pub fn authorizes(&self, pattern: &AppIdPattern) -> bool {
        match self {
            Self::Entries(entries) => entries.iter().any(|entry| {
                app_id_of(entry).is_some_and(|id| pattern.is_match(id)) && has_paths(entry)
            }),
            Self::Map(map) => map
                .iter()
                .any(|(id, entry)| pattern.is_match(id) && has_paths(entry)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Entries(entries) => entries.len(),
            Self::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn app_id_of(entry: &Value) -> Option<&str> {
    entry.get("appID").and_then(Value::as_str)
}

fn has_paths(entry: &Value) -> bool {
    entry.get("paths").is_some_and(Value::is_array)
}

/// Decode manifest bytes into a verification result.
///
/// Parse failure is returned as an error; structural problems are reported
/// through `structurally_valid`. The identifier is only matched against a
/// structurally valid document.
pub fn decode_manifest(
    bytes: &[u8],
    bundle_identifier: Option<&str>,
    team_identifier: Option<&str>,
    encrypted: bool,
) -> Result<VerificationResult, serde_json::Error> {
    let document = AssociationDocument::from_slice(bytes)?;
    let structurally_valid = document.is_structurally_valid();

    let identifier_found = match bundle_identifier.filter(|b| !b.is_empty()) {
        Some(bundle) if structurally_valid => {
            let pattern = AppIdPattern::new(bundle, team_identifier);
            Some(document.authorizes(&pattern))
        }
        _ => None,
    };

    Ok(VerificationResult {
        encrypted,
        document: document.into_value(),
        structurally_valid,
        identifier_found,
    })
}
