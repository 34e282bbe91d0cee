use crate::domain::model::RoleRecord;
use crate::utils::error::{PlannerError, Result};

/// Trims surrounding whitespace and lowercases, the form names are compared in.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First record, in catalog order, whose normalized name equals the normalized query.
///
/// An empty query never matches.
pub fn find<'a>(records: &'a [RoleRecord], query: &str) -> Option<&'a RoleRecord> {
    let wanted = normalize(query);
    if wanted.is_empty() {
        return None;
    }

    records.iter().find(|record| {
        record
            .role_name
            .as_deref()
            .map(|name| normalize(name) == wanted)
            .unwrap_or(false)
    })
}

/// Like [`find`], but reports a miss as [`PlannerError::NotFound`].
pub fn lookup<'a>(records: &'a [RoleRecord], query: &str) -> Result<&'a RoleRecord> {
    find(records, query).ok_or_else(|| PlannerError::NotFound {
        query: query.to_string(),
    })
}
