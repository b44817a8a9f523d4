use std::fmt;

/// Prefix every walk path starts with.
const RELATIVE_PREFIX: &str = "./";

/// The subtree whose sources [`Discovery::sources`](crate::Discovery::sources) leaves out.
///
/// Paths are compared as text, so `./net/x.cpp` is only excluded when the subtree walk
/// produces exactly that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// Keep every source.
    Nothing,

    /// Drop sources found under this path. Always starts with `./`.
    Subtree(String),
}

impl Exclusion {
    /// Excludes the subtree at `path`, relative to the project root.
    ///
    /// `path` is prefixed with `./` unless it already starts with it.
    pub fn subtree(path: impl Into<String>) -> Self {
        let path = path.into();

        if path.starts_with(RELATIVE_PREFIX) {
            Self::Subtree(path)
        } else {
            Self::Subtree(format!("{RELATIVE_PREFIX}{path}"))
        }
    }

    /// The path to walk for excluded sources, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Nothing => None,
            Self::Subtree(path) => Some(path),
        }
    }

    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

impl From<&str> for Exclusion {
    /// An empty string excludes nothing.
    fn from(path: &str) -> Self {
        if path.is_empty() {
            Self::Nothing
        } else {
            Self::subtree(path)
        }
    }
}

impl From<String> for Exclusion {
    fn from(path: String) -> Self {
        if path.is_empty() {
            Self::Nothing
        } else {
            Self::subtree(path)
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for Exclusion {
    fn from(path: Option<T>) -> Self {
        path.map_or(Self::Nothing, Into::into)
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("<nothing>"),
            Self::Subtree(path) => f.write_str(path),
        }
    }
}
