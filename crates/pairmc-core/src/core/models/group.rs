use std::ops::Range;

/// A contiguous run of particle indices, typically one molecule.
///
/// The group covers `begin..end` (half-open). Growing or shrinking a group only
/// moves `end`; keeping the particle container consistent with it is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    pub name: String,
    begin: usize,
    end: usize,
}

impl Group {
    /// Creates a group spanning `begin..end`.
    ///
    /// # Panics
    ///
    /// Panics if `end < begin`.
    pub fn new(name: &str, begin: usize, end: usize) -> Self {
        assert!(end >= begin, "group end ({end}) precedes begin ({begin})");
        Self {
            name: name.to_string(),
            begin,
            end,
        }
    }

    /// Creates a group from an inclusive `[first, last]` range.
    pub fn from_inclusive(name: &str, first: usize, last: usize) -> Self {
        Self::new(name, first, last + 1)
    }

    #[inline]
    pub fn begin(&self) -> usize {
        self.begin
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.begin && index < self.end
    }

    /// True if the two groups share at least one index.
    pub fn overlaps(&self, other: &Group) -> bool {
        !self.is_empty() && !other.is_empty() && self.begin < other.end && other.begin < self.end
    }

    /// Extends the group by one index at the end and returns that index.
    pub fn push_back(&mut self) -> usize {
        self.end += 1;
        self.end - 1
    }

    /// Removes the last index from the group, returning it.
    pub fn pop_back(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.end -= 1;
        Some(self.end)
    }
}
