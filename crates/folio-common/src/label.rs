//! Dataset labels.
//!
//! A label names one table inside a page's namespace. Labels produced from
//! composite records are built with [`Label::compose`], which joins the
//! caller's label and the record's field name with [`Label::SEPARATOR`].
//! `compose` only accepts non-empty field names free of the separator, so
//! [`Label::split_last`] recovers the pair exactly.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{Error, Result};

/// Identifier for one dataset within a page namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Separator placed between a parent label and a field name.
    pub const SEPARATOR: char = '.';

    /// Create a label from arbitrary text.
    pub fn new(text: impl Into<String>) -> Self {
        Label(text.into())
    }

    /// Parse a label, rejecting empty or whitespace-only text.
    pub fn parse(text: &str) -> Result<Self> {
        let label = Label(text.to_string());
        label.validate()?;
        Ok(label)
    }

    /// Check that the label is not blank.
    pub fn validate(&self) -> Result<()> {
        if self.0.trim().is_empty() {
            return Err(Error::InvalidLabel(self.0.clone()));
        }
        Ok(())
    }

    /// Whether `name` can be composed onto a parent label.
    pub fn is_field_name(name: &str) -> bool {
        !name.is_empty() && !name.contains(Self::SEPARATOR)
    }

    /// Compose `<parent>.<child>`.
    ///
    /// Fails with [`Error::InvalidLabel`] when `child` is empty or contains
    /// [`Label::SEPARATOR`].
    pub fn compose(parent: &Label, child: &str) -> Result<Self> {
        let mut text = String::with_capacity(parent.0.len() + 1 + child.len());
        text.push_str(&parent.0);
        text.push(Self::SEPARATOR);
        text.push_str(child);
        if !Self::is_field_name(child) {
            return Err(Error::InvalidLabel(text));
        }
        Ok(Label(text))
    }

    /// Split at the last separator into `(parent, child)`.
    ///
    /// Returns `None` for labels that were not composed.
    pub fn split_last(&self) -> Option<(&str, &str)> {
        self.0.rsplit_once(Self::SEPARATOR)
    }

    /// Field name part of a composed label.
    pub fn field(&self) -> Option<&str> {
        self.split_last().map(|(_, field)| field)
    }

    /// Whether this label was produced by [`Label::compose`].
    pub fn is_composed(&self) -> bool {
        self.0.contains(Self::SEPARATOR)
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Label(text.to_string())
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Label(text)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose() {
        let label = Label::compose(&Label::new("book"), "trades").unwrap();
        assert_eq!(label.as_str(), "book.trades");
        assert!(label.is_composed());
    }

    #[test]
    fn test_split_last_reverses_compose() {
        let label = Label::compose(&Label::new("desk.book"), "quotes").unwrap();
        assert_eq!(label.split_last(), Some(("desk.book", "quotes")));
        assert_eq!(label.field(), Some("quotes"));
    }

    #[test]
    fn test_compose_rejects_unsplittable_fields() {
        let book = Label::new("book");
        assert!(matches!(
            Label::compose(&book, "x.y"),
            Err(Error::InvalidLabel(ref text)) if text == "book.x.y"
        ));
        assert!(matches!(
            Label::compose(&book, ""),
            Err(Error::InvalidLabel(_))
        ));
        assert!(!Label::is_field_name("a.b"));
        assert!(Label::is_field_name("trades"));
    }

    #[test]
    fn test_plain_label_has_no_split() {
        let label = Label::new("prices");
        assert_eq!(label.split_last(), None);
        assert!(!label.is_composed());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(Label::parse("").is_err());
        assert!(Label::parse("  ").is_err());
        assert_eq!(Label::parse("ok").unwrap(), Label::new("ok"));
        assert!(Label::new(" ").validate().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Label::new("a.b")).unwrap();
        assert_eq!(json, r#""a.b""#);
    }
}
