//! Method naming for generated fixtures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How generated method names are spelt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStyle {
    /// `default_fixture`, `with_quantity`, ...
    #[default]
    Snake,
    /// `defaultFixture`, `withQuantity`, ...
    Camel,
}

impl NamingStyle {
    /// Joins a method prefix with a field name.
    ///
    /// ```
    /// use fixturegen::NamingStyle;
    ///
    /// assert_eq!(NamingStyle::Snake.method_name("with", "quantity"), "with_quantity");
    /// assert_eq!(NamingStyle::Camel.method_name("with", "quantity"), "withQuantity");
    /// assert_eq!(NamingStyle::Snake.method_name("get", ""), "get");
    /// ```
    #[must_use]
    pub fn method_name(self, prefix: &str, field: &str) -> String {
        match self {
            Self::Snake if field.is_empty() => prefix.to_owned(),
            Self::Snake => format!("{prefix}_{field}"),
            Self::Camel => format!("{prefix}{}", capitalize(field)),
        }
    }

    /// Configuration spelling of the style.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Snake => "snake",
            Self::Camel => "camel",
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a naming style string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown naming style `{0}`; expected `snake` or `camel`")]
pub struct UnknownNamingStyle(pub String);

impl FromStr for NamingStyle {
    type Err = UnknownNamingStyle;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "snake" => Ok(Self::Snake),
            "camel" => Ok(Self::Camel),
            _ => Err(UnknownNamingStyle(value.to_owned())),
        }
    }
}

/// Upper-cases the first character of `name` and leaves the rest unchanged.
///
/// An empty name is returned unchanged.
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
