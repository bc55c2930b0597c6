use crate::error::{Error, Result};

use super::PageRange;

/// Pages chosen with `--pages`. Unlisted pages are passed through unchanged.
///
/// Stored as sorted, non-overlapping ranges so that huge ranges cost nothing
/// until they are checked against the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<PageRange>,
}

impl PageSelection {
    /// Build a selection from ranges in any order; overlaps and neighbours merge.
    pub fn from_ranges(mut ranges: Vec<PageRange>) -> Self {
        ranges.sort_by_key(|r| r.start);
        let mut merged: Vec<PageRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(prev) if range.start <= prev.end.saturating_add(1) => {
                    prev.end = prev.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|r| r.contains(page))
    }

    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.page_count() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(PageRange::pages)
    }

    /// Highest selected page, if any
    pub fn last(&self) -> Option<u32> {
        self.ranges.last().map(|r| r.end)
    }

    /// Reject selections that reach past the end of the document.
    pub fn validate(&self, total_pages: u32) -> Result<()> {
        match self.last() {
            Some(page) if page > total_pages => Err(Error::PageOutOfRange {
                page,
                total: total_pages,
            }),
            _ => Ok(()),
        }
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self::from_ranges(iter.into_iter().map(|p| PageRange::new(p, p)).collect())
    }
}
