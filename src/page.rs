//! Page context: the uniquely identified elements charts bind to, and the
//! developer-visible diagnostic channel.

use crate::error::ChartError;
use std::collections::BTreeSet;
use std::fmt::Display;

/// Registry of element ids present on the page (chart targets, controls, tables).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: BTreeSet<String>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from a list of ids. Duplicates are rejected.
    pub fn from_ids<I, S>(ids: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut page = Self::new();
        for id in ids {
            page.add(id)?;
        }
        Ok(page)
    }

    pub fn add(&mut self, id: impl Into<String>) -> Result<(), ChartError> {
        let id = id.into();
        if self.elements.contains(&id) {
            return Err(ChartError::DuplicateElement(id));
        }
        self.elements.insert(id);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    /// Resolve a required element; absence aborts construction of the caller only.
    pub fn require(&self, id: &str) -> Result<String, ChartError> {
        if self.contains(id) {
            Ok(id.to_string())
        } else {
            Err(ChartError::MissingElement(id.to_string()))
        }
    }
}

/// One diagnostic entry: which chart/table failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: String,
    pub message: String,
}

/// Diagnostic channel. Entries go to the `log` facade and are kept for inspection;
/// nothing here interrupts the user.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, source: &str, err: &dyn Display) {
        log::warn!("{}: {}", source, err);
        self.entries.push(Diagnostic {
            source: source.to_string(),
            message: err.to_string(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries reported for one chart or table.
    pub fn for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.source == source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_missing_id() {
        let page = Page::from_ids(["a", "b"]).unwrap();
        assert_eq!(page.require("a").unwrap(), "a");
        assert!(matches!(
            page.require("c"),
            Err(ChartError::MissingElement(id)) if id == "c"
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert!(matches!(
            Page::from_ids(["a", "a"]),
            Err(ChartError::DuplicateElement(_))
        ));
    }

    #[test]
    fn diagnostics_are_kept_per_source() {
        let mut d = Diagnostics::new();
        d.report("x", &"boom");
        d.report("y", &"bang");
        assert_eq!(d.len(), 2);
        assert_eq!(d.for_source("x").count(), 1);
        assert_eq!(d.entries()[1].message, "bang");
    }
}
