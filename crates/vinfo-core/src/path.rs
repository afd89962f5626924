//! Parameter paths for diagnostics (`climateData.zones[1].temperature`).

use std::fmt;

/// Location of a value inside a message, built up during recursion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParamPath(String);

impl ParamPath {
    /// The message root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path of a named child of this path.
    pub fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{name}", self.0))
        }
    }

    /// Path of an element of this path.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}
