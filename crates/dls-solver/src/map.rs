//! Row maps: contiguous partitions of global unknown indices.
//!
//! A [`RowMap`] assigns the global indices `0..n` to one or more parts. Each
//! part owns a contiguous range. The serial map has a single part that owns
//! every index; the direct solvers in [`crate::backend`] only accept serial
//! maps.

use crate::error::{DlsError, Result};

/// Contiguous linear partition of `num_global` indices.
///
/// Every part owns `num_global / num_parts` indices and the first
/// `num_global % num_parts` parts own one extra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMap {
    num_global: usize,
    num_parts: usize,
    part: usize,
    first: usize,
    num_local: usize,
}

impl RowMap {
    /// Single-part map owning all of `0..num_global`.
    pub fn serial(num_global: usize) -> Self {
        Self {
            num_global,
            num_parts: 1,
            part: 0,
            first: 0,
            num_local: num_global,
        }
    }

    /// The slice of a `num_parts`-way linear partition owned by `part`.
    pub fn contiguous(num_global: usize, num_parts: usize, part: usize) -> Result<Self> {
        if num_parts == 0 {
            return Err(DlsError::InvalidParameter {
                name: "num_parts",
                reason: "must be at least 1".into(),
            });
        }
        if part >= num_parts {
            return Err(DlsError::InvalidParameter {
                name: "part",
                reason: format!("{part} is not below num_parts = {num_parts}"),
            });
        }

        let base = num_global / num_parts;
        let extra = num_global % num_parts;
        let num_local = base + usize::from(part < extra);
        let first = part * base + part.min(extra);

        Ok(Self {
            num_global,
            num_parts,
            part,
            first,
            num_local,
        })
    }

    pub fn num_global(&self) -> usize {
        self.num_global
    }

    pub fn num_local(&self) -> usize {
        self.num_local
    }

    pub fn num_parts(&self) -> usize {
        self.num_parts
    }

    pub fn part(&self) -> usize {
        self.part
    }

    /// First owned global index.
    pub fn min_global(&self) -> usize {
        self.first
    }

    /// Last owned global index, `None` when this part owns nothing.
    pub fn max_global(&self) -> Option<usize> {
        (self.num_local > 0).then(|| self.first + self.num_local - 1)
    }

    pub fn owns(&self, gid: usize) -> bool {
        gid >= self.first && gid < self.first + self.num_local
    }

    /// Local position of an owned global index.
    pub fn local_index(&self, gid: usize) -> Option<usize> {
        self.owns(gid).then(|| gid - self.first)
    }

    /// Owned global indices in ascending order.
    pub fn global_indices(&self) -> std::ops::Range<usize> {
        self.first..self.first + self.num_local
    }

    pub fn is_distributed(&self) -> bool {
        self.num_parts > 1
    }

    /// Two maps are the same when they describe the same partition slice.
    pub fn same_as(&self, other: &RowMap) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_map_owns_everything() {
        let map = RowMap::serial(10);
        assert_eq!(map.num_local(), 10);
        assert_eq!(map.min_global(), 0);
        assert_eq!(map.max_global(), Some(9));
        assert!(map.owns(0));
        assert!(map.owns(9));
        assert!(!map.owns(10));
        assert!(!map.is_distributed());
    }

    #[test]
    fn contiguous_partition_spreads_remainder_over_first_parts() {
        // 10 over 3 parts: 4, 3, 3
        let sizes: Vec<usize> = (0..3)
            .map(|p| RowMap::contiguous(10, 3, p).unwrap().num_local())
            .collect();
        assert_eq!(sizes, vec![4, 3, 3]);

        let last = RowMap::contiguous(10, 3, 2).unwrap();
        assert_eq!(last.min_global(), 7);
        assert_eq!(last.max_global(), Some(9));
        assert_eq!(last.local_index(8), Some(1));
        assert_eq!(last.local_index(6), None);
        assert!(last.is_distributed());
    }

    #[test]
    fn contiguous_partition_covers_all_indices_once() {
        let n = 17;
        let mut seen = vec![0usize; n];
        for p in 0..5 {
            let map = RowMap::contiguous(n, 5, p).unwrap();
            for gid in map.global_indices() {
                seen[gid] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn empty_part_has_no_max() {
        let map = RowMap::contiguous(2, 4, 3).unwrap();
        assert_eq!(map.num_local(), 0);
        assert_eq!(map.max_global(), None);
    }

    #[test]
    fn invalid_partitions_are_rejected() {
        assert!(RowMap::contiguous(10, 0, 0).is_err());
        assert!(RowMap::contiguous(10, 2, 2).is_err());
    }
}
