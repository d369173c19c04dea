//! Multi-region selections.
//!
//! A [`Selection`] is an ordered, non-empty list of [`Region`]s, one per
//! cursor. Motions never edit it in place: [`Selection::transform`] maps every
//! region to a new one and returns a new selection of the same length and
//! order. Only visual-block `j`/`k` add or remove regions, through the
//! `push_*`/`pop_*` methods.

use std::fmt;

use n_text::Region;

use crate::error::MotionError;

#[derive(Clone, PartialEq, Eq)]
pub struct Selection {
    regions: Vec<Region>,
}

impl Selection {
    /// Build a selection from regions in source order.
    ///
    /// # Errors
    ///
    /// [`MotionError::EmptySelection`] if `regions` is empty.
    pub fn new(regions: Vec<Region>) -> Result<Self, MotionError> {
        if regions.is_empty() {
            return Err(MotionError::EmptySelection);
        }
        Ok(Self { regions })
    }

    /// A selection holding one region.
    #[must_use]
    pub fn single(region: Region) -> Self {
        Self {
            regions: vec![region],
        }
    }

    /// A single caret at `pt`.
    #[must_use]
    pub fn caret(pt: usize) -> Self {
        Self::single(Region::point(pt))
    }

    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// The first region in source order.
    #[must_use]
    pub fn first(&self) -> Region {
        self.regions[0]
    }

    /// The last region in source order.
    #[must_use]
    pub fn last(&self) -> Region {
        self.regions[self.regions.len() - 1]
    }

    /// Map every region through `f`, keeping order and length.
    #[must_use]
    pub fn transform(&self, f: impl FnMut(Region) -> Region) -> Self {
        Self {
            regions: self.regions.iter().copied().map(f).collect(),
        }
    }

    /// Clamp every region into `[0, size]`.
    #[must_use]
    pub fn clamped(&self, size: usize) -> Self {
        self.transform(|r| r.clamped(size))
    }

    pub fn push_front(&mut self, region: Region) {
        self.regions.insert(0, region);
    }

    pub fn push_back(&mut self, region: Region) {
        self.regions.push(region);
    }

    /// Remove the first region. Refuses to remove the only one.
    pub fn pop_front(&mut self) -> Option<Region> {
        if self.regions.len() > 1 {
            Some(self.regions.remove(0))
        } else {
            None
        }
    }

    /// Remove the last region. Refuses to remove the only one.
    pub fn pop_back(&mut self) -> Option<Region> {
        if self.regions.len() > 1 {
            self.regions.pop()
        } else {
            None
        }
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.regions).finish()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.regions.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

impl From<Region> for Selection {
    fn from(region: Region) -> Self {
        Self::single(region)
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Region;
    type IntoIter = std::slice::Iter<'a, Region>;

    fn into_iter(self) -> Self::IntoIter {
        self.regions.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
