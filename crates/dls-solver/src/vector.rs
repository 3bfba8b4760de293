//! Dense vectors aligned to a row map.

use std::ops::{Index, IndexMut};

use nalgebra::DVector;

use crate::error::{DlsError, Result};
use crate::map::RowMap;

/// Dense vector holding one value per locally owned index of its map.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    map: RowMap,
    values: DVector<f64>,
}

impl Vector {
    pub fn zeros(map: &RowMap) -> Self {
        Self {
            map: map.clone(),
            values: DVector::zeros(map.num_local()),
        }
    }

    /// Builds a vector whose local entry for global index `gid` is `f(gid)`.
    pub fn from_fn(map: &RowMap, mut f: impl FnMut(usize) -> f64) -> Self {
        let values = DVector::from_iterator(map.num_local(), map.global_indices().map(&mut f));
        Self {
            map: map.clone(),
            values,
        }
    }

    pub fn from_values(map: &RowMap, values: DVector<f64>) -> Result<Self> {
        if values.len() != map.num_local() {
            return Err(DlsError::LengthMismatch {
                what: "vector values",
                expected: map.num_local(),
                found: values.len(),
            });
        }
        Ok(Self {
            map: map.clone(),
            values,
        })
    }

    pub fn map(&self) -> &RowMap {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        self.values.as_mut_slice()
    }

    pub fn put_scalar(&mut self, value: f64) {
        self.values.fill(value);
    }

    /// Overwrites the entries with `values`, which must have the same length.
    pub fn assign(&mut self, values: &DVector<f64>) -> Result<()> {
        if values.len() != self.values.len() {
            return Err(DlsError::LengthMismatch {
                what: "assigned values",
                expected: self.values.len(),
                found: values.len(),
            });
        }
        self.values.copy_from(values);
        Ok(())
    }

    /// `self = alpha * a + beta * self`
    pub fn update(&mut self, alpha: f64, a: &Vector, beta: f64) -> Result<()> {
        self.check_compatible(a)?;
        self.values.axpy(alpha, &a.values, beta);
        Ok(())
    }

    pub fn norm1(&self) -> f64 {
        self.values.lp_norm(1)
    }

    pub fn norm2(&self) -> f64 {
        self.values.norm()
    }

    pub fn norm_inf(&self) -> f64 {
        self.values.amax()
    }

    /// Σ |self[i] - other[i]|
    pub fn l1_distance(&self, other: &Vector) -> Result<f64> {
        self.check_compatible(other)?;
        Ok(self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    pub(crate) fn check_compatible(&self, other: &Vector) -> Result<()> {
        if !self.map.same_as(&other.map) {
            return Err(DlsError::MapMismatch("vectors live on different maps"));
        }
        Ok(())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.values[i]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_uses_global_indices() {
        let map = RowMap::contiguous(10, 2, 1).unwrap();
        let v = Vector::from_fn(&map, |gid| gid as f64);
        assert_eq!(v.as_slice(), &[5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn norms_and_distance() {
        let map = RowMap::serial(3);
        let a = Vector::from_values(&map, DVector::from_vec(vec![1.0, -2.0, 2.0])).unwrap();
        let b = Vector::zeros(&map);
        assert_eq!(a.norm1(), 5.0);
        assert_eq!(a.norm2(), 3.0);
        assert_eq!(a.norm_inf(), 2.0);
        assert_eq!(a.l1_distance(&b).unwrap(), 5.0);
    }

    #[test]
    fn put_scalar_and_update() {
        let map = RowMap::serial(4);
        let mut x = Vector::from_fn(&map, |i| i as f64);
        let ones = {
            let mut v = Vector::zeros(&map);
            v.put_scalar(1.0);
            v
        };
        x.update(2.0, &ones, -1.0).unwrap();
        assert_eq!(x.as_slice(), &[2.0, 1.0, 0.0, -1.0]);

        x.put_scalar(0.0);
        assert_eq!(x.norm1(), 0.0);
    }

    #[test]
    fn mismatched_maps_are_rejected() {
        let a = Vector::zeros(&RowMap::serial(3));
        let b = Vector::zeros(&RowMap::serial(4));
        assert!(matches!(a.l1_distance(&b), Err(DlsError::MapMismatch(_))));
        assert!(Vector::from_values(&RowMap::serial(2), DVector::zeros(3)).is_err());
    }
}
