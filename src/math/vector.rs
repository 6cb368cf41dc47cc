use std::iter::FromIterator;
use std::ops::{BitAnd, Index};
use std::slice::Iter;

use num_traits::Zero;

/// Dense one-dimensional array backed by a `Vec`.
///
/// Labels and score vectors use this type crate-wide; the model
/// wrappers convert to `ndarray` containers at the `linfa` boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Array1<T> {
    buf: Vec<T>,
}

impl<T> Array1<T> {
    pub fn from_vec(buf: Vec<T>) -> Self {
        Array1 { buf }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.buf.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn mapv<U, F>(&self, f: F) -> Array1<U>
    where
        F: FnMut(&T) -> U,
    {
        self.buf.iter().map(f).collect()
    }

    /// Gather the elements at `indices`, in index order.
    pub fn select(&self, indices: &[usize]) -> Array1<T>
    where
        T: Clone,
    {
        indices.iter().map(|&i| self.buf[i].clone()).collect()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.clone()
    }
}

impl<T: Clone + Zero> Array1<T> {
    pub fn zeros(len: usize) -> Self {
        Array1::from_vec(vec![T::zero(); len])
    }
}

impl Array1<f32> {
    /// Arithmetic mean, `None` for an empty array.
    pub fn mean(&self) -> Option<f32> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.buf.iter().sum::<f32>() / self.buf.len() as f32)
        }
    }
}

impl<T> FromIterator<T> for Array1<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Array1::from_vec(iter.into_iter().collect())
    }
}

impl<T> Index<usize> for Array1<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.buf[index]
    }
}

/// Element-wise `&` for boolean masks.
impl BitAnd<&Array1<bool>> for &Array1<bool> {
    type Output = Array1<bool>;

    fn bitand(self, rhs: &Array1<bool>) -> Array1<bool> {
        assert_eq!(self.len(), rhs.len(), "mask length mismatch");
        self.iter().zip(rhs.iter()).map(|(a, b)| *a && *b).collect()
    }
}
