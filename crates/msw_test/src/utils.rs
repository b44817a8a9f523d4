use camino::Utf8Path;

/// An insta filter matching `path` followed by an optional separator.
pub fn tempdir_filter(path: &Utf8Path) -> String {
    format!(r"{}\\?/?", regex::escape(path.as_str()))
}
