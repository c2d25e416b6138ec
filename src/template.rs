use std::path::{Component, Path};

/// Name of the description file kept inside the template root.
pub const DESCRIPTION_FILE_NAME: &str = ".templates";

/// Entries of the template root that are never templates.
pub const IGNORE_LIST: &[&str] = &[DESCRIPTION_FILE_NAME, ".DS_Store"];

/// A template as seen when listing the template root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub description: Option<String>,
}

pub fn is_ignored(name: &str) -> bool {
    IGNORE_LIST.contains(&name)
}

/// Whether `name` can identify a template, that is, whether it is a
/// single plain path segment that is not on the ignore list.
pub fn is_valid_name(name: &str) -> bool {
    if name.is_empty() || is_ignored(name) || name.contains('/') || name.contains('\\') {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// The default name of a template added from `src`: its last path segment.
pub fn infer_name(src: &Path) -> Option<String> {
    src.file_name().map(|s| s.to_string_lossy().to_string())
}
