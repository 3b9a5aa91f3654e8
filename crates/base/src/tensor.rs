use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    DimsMismatch { expected: Vec<usize>, got: Vec<usize> },
    RankMismatch { expected: usize, got: usize },
    AxisOutOfRange { axis: usize, ndim: usize },
    InvalidPermutation(Vec<usize>),
    OutOfBounds { required: usize, len: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::DimsMismatch { expected, got } => {
                write!(f, "dimension mismatch: expected {expected:?}, got {got:?}")
            }
            TensorError::RankMismatch { expected, got } => {
                write!(f, "rank mismatch: expected {expected} dimensions, got {got}")
            }
            TensorError::AxisOutOfRange { axis, ndim } => {
                write!(f, "axis {axis} out of range for {ndim}-dimensional tensor")
            }
            TensorError::InvalidPermutation(axes) => {
                write!(f, "invalid axis permutation: {axes:?}")
            }
            TensorError::OutOfBounds { required, len } => {
                write!(f, "view needs {required} elements, storage holds {len}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    let mut product: usize = 1;
    for &dim in shape {
        product = product
            .checked_mul(dim)
            .ok_or(TensorError::ShapeOverflow)?;
    }
    Ok(product)
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![0; shape.len()];
    let mut stride: usize = 1;
    for axis in (0..shape.len()).rev() {
        strides[axis] = stride;
        stride = stride.saturating_mul(shape[axis]);
    }
    strides
}

/// Dense n-dimensional array with a strided view over owned storage.
///
/// `shape` and `strides` describe the logical layout; `data` is never
/// reordered by view operations like [`Tensor::transpose`].
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub strides: Vec<usize>,
    pub offset: usize,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("data", &self.data)
            .finish()
    }
}

impl<T> Tensor<T> {
    /// Wraps `data` as a contiguous row-major tensor.
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        if product != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected: product,
                got: data.len(),
            });
        }

        let strides = row_major_strides(&shape);
        Ok(Self {
            shape,
            strides,
            offset: 0,
            data,
        })
    }

    /// Wraps `data` with explicit strides.
    ///
    /// Every logical index must land inside `data`.
    pub fn from_strided(
        shape: Vec<usize>,
        strides: Vec<usize>,
        data: Vec<T>,
    ) -> Result<Self, TensorError> {
        if shape.len() != strides.len() {
            return Err(TensorError::DimsMismatch {
                expected: shape.clone(),
                got: strides,
            });
        }

        element_count(&shape)?;
        if !shape.contains(&0) {
            let mut last: usize = 0;
            for (&dim, &stride) in shape.iter().zip(&strides) {
                last = (dim - 1)
                    .checked_mul(stride)
                    .and_then(|step| last.checked_add(step))
                    .ok_or(TensorError::ShapeOverflow)?;
            }
            if last >= data.len() {
                return Err(TensorError::OutOfBounds {
                    required: last + 1,
                    len: data.len(),
                });
            }
        }

        Ok(Self {
            shape,
            strides,
            offset: 0,
            data,
        })
    }

    pub fn from_scalar(value: T) -> Self {
        Self {
            shape: vec![],
            strides: vec![],
            offset: 0,
            data: vec![value],
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of logical elements (product of the shape).
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage offset of a logical index.
    ///
    /// Not bounds checked, so `index(&[n, 0, 0])` on a leading axis of
    /// length `n` gives the end of the last sub-range.
    pub fn index(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.ndim());
        self.offset
            + index
                .iter()
                .zip(&self.strides)
                .map(|(i, stride)| i * stride)
                .sum::<usize>()
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.ndim()
            || index.iter().zip(&self.shape).any(|(i, dim)| i >= dim)
        {
            return None;
        }
        self.data.get(self.index(index))
    }

    /// Swaps two axes without touching storage.
    pub fn transpose(mut self, a: usize, b: usize) -> Result<Self, TensorError> {
        let ndim = self.ndim();
        for axis in [a, b] {
            if axis >= ndim {
                return Err(TensorError::AxisOutOfRange { axis, ndim });
            }
        }
        self.shape.swap(a, b);
        self.strides.swap(a, b);
        Ok(self)
    }

    /// Reorders axes so that new axis `i` is old axis `axes[i]`.
    pub fn permute(self, axes: &[usize]) -> Result<Self, TensorError> {
        let ndim = self.ndim();
        let mut seen = vec![false; ndim];
        if axes.len() != ndim {
            return Err(TensorError::InvalidPermutation(axes.to_vec()));
        }
        for &axis in axes {
            if axis >= ndim {
                return Err(TensorError::AxisOutOfRange { axis, ndim });
            }
            if std::mem::replace(&mut seen[axis], true) {
                return Err(TensorError::InvalidPermutation(axes.to_vec()));
            }
        }

        let shape = axes.iter().map(|&axis| self.shape[axis]).collect();
        let strides = axes.iter().map(|&axis| self.strides[axis]).collect();
        Ok(Self {
            shape,
            strides,
            offset: self.offset,
            data: self.data,
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.offset == 0
            && self.data.len() == self.len()
            && self.strides == row_major_strides(&self.shape)
    }

    /// Iterates elements in logical row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        Offsets::new(self).map(|offset| &self.data[offset])
    }
}

impl<T: Clone> Tensor<T> {
    /// Copies the logical view into fresh row-major storage.
    pub fn to_contiguous(&self) -> Tensor<T> {
        Tensor {
            shape: self.shape.clone(),
            strides: row_major_strides(&self.shape),
            offset: 0,
            data: self.iter().cloned().collect(),
        }
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        let strides = row_major_strides(&shape);
        Ok(Self {
            shape,
            strides,
            offset: 0,
            data: vec![T::default(); product],
        })
    }
}

struct Offsets<'a> {
    shape: &'a [usize],
    strides: &'a [usize],
    index: Vec<usize>,
    next: Option<usize>,
}

impl<'a> Offsets<'a> {
    fn new<T>(tensor: &'a Tensor<T>) -> Self {
        let next = if tensor.shape.contains(&0) {
            None
        } else {
            Some(tensor.offset)
        };
        Self {
            shape: &tensor.shape,
            strides: &tensor.strides,
            index: vec![0; tensor.shape.len()],
            next,
        }
    }
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        let mut offset = current;
        let mut axis = self.shape.len();
        self.next = loop {
            if axis == 0 {
                break None;
            }
            axis -= 1;
            self.index[axis] += 1;
            offset += self.strides[axis];
            if self.index[axis] < self.shape[axis] {
                break Some(offset);
            }
            offset -= self.strides[axis] * self.index[axis];
            self.index[axis] = 0;
        };
        Some(current)
    }
}

/// Calls `f` with every index of `shape` in row-major order.
pub fn for_each_index(shape: &[usize], mut f: impl FnMut(&[usize])) {
    if shape.contains(&0) {
        return;
    }
    let mut index = vec![0; shape.len()];
    loop {
        f(&index);
        let mut axis = shape.len();
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
}

/// Anything that can be read element by element as an n-dimensional array.
pub trait NdSource<T> {
    fn shape(&self) -> Vec<usize>;
    fn at(&self, index: &[usize]) -> T;
}

impl<T: Clone> NdSource<T> for Tensor<T> {
    fn shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn at(&self, index: &[usize]) -> T {
        self.data[self.index(index)].clone()
    }
}

/// Copies `source` element by element into `dest`, honoring `dest`'s strides.
pub fn pack<T, S: NdSource<T> + ?Sized>(
    source: &S,
    dest: &mut Tensor<T>,
) -> Result<(), TensorError> {
    let shape = source.shape();
    if shape != dest.shape {
        return Err(TensorError::DimsMismatch {
            expected: dest.shape.clone(),
            got: shape,
        });
    }

    let offset = dest.offset;
    let strides = dest.strides.clone();
    let data = &mut dest.data;
    for_each_index(&shape, |index| {
        let at = offset
            + index
                .iter()
                .zip(&strides)
                .map(|(i, stride)| i * stride)
                .sum::<usize>();
        data[at] = source.at(index);
    });
    Ok(())
}
