use crate::Real;

/// Dense vector used as SpMV input and output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseVector {
    data: Vec<Real>,
}

impl DenseVector {
    /// Create a zero-filled vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        DenseVector { data: vec![0.0; n] }
    }

    /// Create a vector of length `n` with every entry set to `value`.
    pub fn filled(n: usize, value: Real) -> Self {
        DenseVector {
            data: vec![value; n],
        }
    }

    pub fn from_vec(data: Vec<Real>) -> Self {
        DenseVector { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[Real] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Real] {
        &mut self.data
    }

    /// Euclidean norm.
    pub fn norm2(&self) -> Real {
        self.data.iter().map(|v| v * v).sum::<Real>().sqrt()
    }

    /// Multiply every entry by `s` in place.
    pub fn scale(&mut self, s: Real) {
        self.data.iter_mut().for_each(|v| *v *= s);
    }

    /// Copy `other` into `self`, resizing if needed.
    pub fn copy_from(&mut self, other: &DenseVector) {
        self.data.clear();
        self.data.extend_from_slice(&other.data);
    }
}

impl From<Vec<Real>> for DenseVector {
    fn from(data: Vec<Real>) -> Self {
        DenseVector::from_vec(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zeros_and_filled() {
        let z = DenseVector::zeros(3);
        assert_eq!(z.as_slice(), &[0.0; 3]);
        let f = DenseVector::filled(2, 1.5);
        assert_eq!(f.as_slice(), &[1.5, 1.5]);
        assert!(DenseVector::zeros(0).is_empty());
    }

    #[test]
    fn test_norm() {
        let a = DenseVector::from_vec(vec![3.0, 4.0]);
        assert_relative_eq!(a.norm2(), 5.0);
        assert_relative_eq!(DenseVector::zeros(4).norm2(), 0.0);
    }

    #[test]
    fn test_scale_copy() {
        let mut a = DenseVector::from_vec(vec![1.0, -2.0]);
        a.scale(0.5);
        assert_eq!(a.as_slice(), &[0.5, -1.0]);

        let mut b = DenseVector::zeros(5);
        b.copy_from(&a);
        assert_eq!(b, a);
    }

    #[test]
    fn test_mut_slice() {
        let mut v = DenseVector::zeros(2);
        v.as_mut_slice()[1] = 42.0;
        assert_eq!(v.as_slice(), &[0.0, 42.0]);
    }
}
