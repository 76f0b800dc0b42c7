//! Resolving a file name next to another file.

/// Replace the last path component of `base` with `rel`.
///
/// Used to locate a file referenced from another one, e.g. an include next to
/// its source. Only `/` separates components. If `base` has no `/`, `rel` is
/// returned unchanged.
///
/// ```rust
/// use hostkit_core::path::relative_file_path;
///
/// assert_eq!(relative_file_path("art/main.cfg", "shapes.cfg"), "art/shapes.cfg");
/// assert_eq!(relative_file_path("main.cfg", "shapes.cfg"), "shapes.cfg");
/// ```
#[must_use]
pub fn relative_file_path(base: &str, rel: &str) -> String
{
    match base.rfind('/') {
        Some(index) => {
            let mut resolved = String::with_capacity(index + 1 + rel.len());
            resolved.push_str(&base[..=index]);
            resolved.push_str(rel);
            resolved
        }
        None => rel.to_string(),
    }
}
