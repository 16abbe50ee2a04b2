use addrspec::AddressRange;
use ipnet::IpNet;

use crate::{error::Result, set::RangeSet};

/// Incrementally collects ranges before merging them into a [`RangeSet`]
#[derive(Debug, Clone, Default)]
pub struct RangeSetBuilder {
    /// Ranges in insertion order. Nothing is merged until `build` is called
    ranges: Vec<AddressRange>,
}

impl RangeSetBuilder {
    /// Construct a new empty `RangeSetBuilder`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an inclusive range
    pub fn add_range(&mut self, range: AddressRange) -> &mut Self {
        self.ranges.push(range);
        self
    }

    /// Add every address in a CIDR block
    pub fn add_prefix(&mut self, prefix: IpNet) -> &mut Self {
        self.add_range(AddressRange::from(prefix))
    }

    /// Get the number of ranges added so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if nothing has been added yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Merge everything added so far into a `RangeSet`
    pub fn build(&self) -> Result<RangeSet> {
        RangeSet::build(self.ranges.iter().copied())
    }
}

impl Extend<AddressRange> for RangeSetBuilder {
    fn extend<T: IntoIterator<Item = AddressRange>>(&mut self, iter: T) {
        self.ranges.extend(iter);
    }
}
