//! Field names for designed nodes.
//!
//! Every node carries a name that doubles as the identifier the generated
//! source code will use for the widget, so names are restricted to
//! lowercase ASCII alphanumerics plus underscores and must be unique
//! across the whole document.

use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// A valid node field name.
#[derive(Debug, PartialEq, Clone, Eq, Hash, PartialOrd, Ord)]
pub struct FieldName {
    name: String,
}

impl FieldName {
    /// Accept a string that is already a valid field name.
    fn new(name: &str) -> Result<Self> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(Error::Invalid(format!("invalid field name: {name}")));
        }
        Ok(FieldName {
            name: name.to_string(),
        })
    }

    /// Munge an arbitrary string into a valid field name. The string is
    /// snake-cased, then any character outside the valid set is dropped.
    /// A string with nothing salvageable becomes `field`.
    pub fn convert(name: &str) -> Self {
        let name = name.to_case(Case::Snake);
        let san: String = name
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
            .collect();
        if san.is_empty() {
            FieldName {
                name: "field".to_string(),
            }
        } else {
            FieldName { name: san }
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Produce a name not claimed by `taken`, suffixing a counter if this
    /// one is. Deduplication preserves validity because the counter is
    /// drawn from the valid character set.
    pub fn unique_in(&self, taken: impl Fn(&str) -> bool) -> FieldName {
        FieldName {
            name: unique_name(&self.name, taken),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl TryFrom<&str> for FieldName {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        FieldName::new(value)
    }
}

impl FromStr for FieldName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FieldName::new(s)
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// Return `requested` if it is free, otherwise append or advance a numeric
/// suffix until the result is free.
///
/// A requested name with no trailing digits gets `2` as its first suffix,
/// so a second `fish` becomes `fish2` rather than `fish1`. A requested
/// name that already ends in digits continues from them, so a second
/// `fish2` becomes `fish3`.
pub fn unique_name(requested: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(requested) {
        return requested.to_string();
    }
    let digits = requested
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .count();
    let (stem, suffix) = requested.split_at(requested.len() - digits);
    let mut n: u64 = suffix
        .parse()
        .ok()
        .and_then(|d: u64| d.checked_add(1))
        .unwrap_or(2);
    loop {
        let candidate = format!("{stem}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
