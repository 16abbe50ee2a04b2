use std::net::IpAddr;

use addrspec::AddressRange;

use crate::{
    error::{Error, Result},
    family::{to_bits, Family},
};

/// A non-empty set of IP address ranges from a single address family.
///
/// Ranges are kept sorted by their first address. Overlapping and adjacent
/// ranges are merged on construction, so no two stored ranges touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSet {
    /// Address family shared by every range in the set
    family: Family,
    /// Sorted, merged ranges. Never empty
    ranges: Vec<AddressRange>,
}

impl RangeSet {
    /// Build a set from any collection of ranges.
    ///
    /// The family of the set is the family of the first range given. Every
    /// other range must belong to the same family.
    #[profiling::function]
    pub fn build<I>(ranges: I) -> Result<Self>
    where
        I: IntoIterator<Item = AddressRange>,
    {
        let mut ranges: Vec<AddressRange> = ranges.into_iter().collect();
        let family = Family::of_range(ranges.first().ok_or(Error::Empty)?);
        if let Some(found) = ranges.iter().find(|range| Family::of_range(range) != family) {
            return Err(Error::MixedFamilies {
                expected: family,
                found: *found,
            });
        }

        ranges.sort_unstable();
        let mut merged: Vec<AddressRange> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                // Overlapping or directly adjacent to the previous range
                Some(last)
                    if to_bits(&range.first()) <= to_bits(&last.last()).saturating_add(1) =>
                {
                    if let Some(hull) = last.hull(&range) {
                        *last = hull;
                    }
                }
                _ => merged.push(range),
            }
        }

        log::trace!(
            "Built {} range set with {} merged ranges",
            family,
            merged.len()
        );
        Ok(Self {
            family,
            ranges: merged,
        })
    }

    /// Address family of every range in this set
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// The merged ranges, sorted ascending
    #[must_use]
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Number of merged ranges
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always `false`. A `RangeSet` can not be built without a range
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Lowest address in the set
    #[must_use]
    pub fn first_address(&self) -> IpAddr {
        self.ranges[0].first()
    }

    /// Check if every address of `candidate` is covered by this set.
    ///
    /// Since stored ranges never touch, a candidate spanning a gap is never contained.
    #[must_use]
    #[profiling::function]
    pub fn contains(&self, candidate: &AddressRange) -> bool {
        if Family::of_range(candidate) != self.family {
            return false;
        }

        // Find the last range starting at or before the candidate
        match self
            .ranges
            .partition_point(|range| range.first() <= candidate.first())
        {
            0 => false,
            idx => self.ranges[idx - 1].contains_range(candidate),
        }
    }
}
