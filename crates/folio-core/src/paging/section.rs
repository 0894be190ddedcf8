use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::gate::Direction;

/// Opaque identifier of one page section (the element id in a browser host)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Fixed navigation order of sections.
///
/// Never empty and free of duplicates; immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOrder {
    ids: Vec<SectionId>,
}

impl SectionOrder {
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let ids: Vec<SectionId> = ids.into_iter().map(Into::into).collect();
        if ids.is_empty() {
            return Err(Error::EmptySectionOrder);
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id) {
                return Err(Error::DuplicateSection(id.to_string()));
            }
        }
        Ok(Self { ids })
    }

    pub fn from_config(sections: &[String]) -> Result<Self> {
        Self::new(sections.iter().map(|s| SectionId::new(s.as_str())))
    }

    /// hero, work, about, experience, contact
    pub fn reference() -> Self {
        Self {
            ids: ["hero", "work", "about", "experience", "contact"]
                .into_iter()
                .map(SectionId::new)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SectionId> {
        self.ids.get(index)
    }

    pub fn index_of(&self, id: &SectionId) -> Option<usize> {
        self.ids.iter().position(|s| s == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionId> {
        self.ids.iter()
    }

    pub fn first(&self) -> &SectionId {
        &self.ids[0]
    }

    pub fn last_index(&self) -> usize {
        self.ids.len() - 1
    }

    /// Neighbouring index in `direction`, clamped to the ends
    pub fn step(&self, index: usize, direction: Direction) -> usize {
        match direction {
            Direction::Forward => (index + 1).min(self.last_index()),
            Direction::Backward => index.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_order() {
        let order = SectionOrder::reference();
        assert_eq!(order.len(), 5);
        assert_eq!(order.get(0).unwrap().as_str(), "hero");
        assert_eq!(order.index_of(&"experience".into()), Some(3));
        assert_eq!(order.get(5), None);
    }

    #[test]
    fn test_empty_order_rejected() {
        let err = SectionOrder::new(Vec::<&str>::new()).unwrap_err();
        assert!(matches!(err, Error::EmptySectionOrder));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = SectionOrder::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateSection(id) if id == "a"));
    }

    #[test]
    fn test_step_clamps_at_edges() {
        let order = SectionOrder::new(["a", "b", "c"]).unwrap();
        assert_eq!(order.step(0, Direction::Backward), 0);
        assert_eq!(order.step(0, Direction::Forward), 1);
        assert_eq!(order.step(2, Direction::Forward), 2);

        let single = SectionOrder::new(["only"]).unwrap();
        assert_eq!(single.step(0, Direction::Forward), 0);
    }
}
