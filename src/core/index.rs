use crate::domain::model::RoleRecord;

/// The "nothing selected" option that heads every selection list.
pub const UNSELECTED: &str = "";

/// Sorted role names for the selection list.
///
/// Records without a name are skipped; duplicate names are kept.
pub fn available_names(records: &[RoleRecord]) -> Vec<String> {
    let mut names: Vec<String> = records
        .iter()
        .filter_map(RoleRecord::display_name)
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

/// The options offered to the user: the empty sentinel followed by every name.
pub fn selection_options(records: &[RoleRecord]) -> Vec<String> {
    std::iter::once(UNSELECTED.to_string())
        .chain(available_names(records))
        .collect()
}
