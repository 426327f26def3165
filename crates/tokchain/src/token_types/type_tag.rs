//! # Token Type Tags

use std::borrow::Cow;

/// The identity of a token type.
///
/// Tags are plain values: two tokens have the same type exactly when their
/// tags are equal. This keeps join tables and token equality free of any
/// reference to the type definitions themselves.
///
/// ## Style Hints
///
/// Prefer `&'static str` names (`TypeTag::from_static`) for built-in types;
/// they are free to clone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    /// The tag of the built-in sentinel type; owns the Start/End markers.
    pub const SPECIAL: TypeTag = TypeTag::from_static("special");

    /// The tag of the built-in fallback type; it matches nothing.
    pub const UNKNOWN: TypeTag = TypeTag::from_static("unknown");

    /// Build a tag from a static name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Build a tag from any name.
    pub fn new<S: Into<Cow<'static, str>>>(name: S) -> Self {
        Self(name.into())
    }

    /// Get the tag name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this one of the tags the registry reserves for itself?
    pub fn is_reserved(&self) -> bool {
        self == &Self::SPECIAL || self == &Self::UNKNOWN
    }
}

impl From<&'static str> for TypeTag {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeTag {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl core::fmt::Display for TypeTag {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
