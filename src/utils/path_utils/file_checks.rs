use std::path::{Component, Path};

/// Object key for an uploaded file: its base name, directories stripped.
///
/// Returns `None` when the path has no final normal component (`..`, `/`)
/// or the name is not valid UTF-8.
pub fn object_key_for(path: &Path) -> Option<String> {
    path.file_name()?.to_str().map(str::to_string)
}

/// True when `name` is exactly one normal path component, so joining it
/// onto a directory cannot escape that directory.
pub fn is_plain_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
