//! Application identifier matching.

/// Pattern matching an `appID` against a bundle identifier, optionally
/// qualified by a team identifier.
///
/// Literal suffix match, anchored at the end only: `com.foo.App` matches
/// `TEAMID.com.foo.App` but not `com.foo.AppX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdPattern {
    suffix: String,
}

impl AppIdPattern {
    pub fn new(bundle_identifier: &str, team_identifier: Option<&str>) -> Self {
        let suffix = match team_identifier.filter(|t| !t.is_empty()) {
            Some(team) => format!("{}.{}", team, bundle_identifier),
            None => bundle_identifier.to_string(),
        };
        Self { suffix }
    }

    pub fn is_match(&self, app_id: &str) -> bool {
        app_id.ends_with(&self.suffix)
    }

    pub fn as_str(&self) -> &str {
        &self.suffix
    }
}
