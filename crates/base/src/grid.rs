use {crate::Vec2, std::fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    SizeOverflow,
    SizeMismatch { expected: usize, got: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::SizeOverflow => write!(f, "grid dimensions overflow when multiplied"),
            GridError::SizeMismatch { expected, got } => {
                write!(f, "size mismatch: expected {expected} cells, got {got}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Row-major 2-D raster, one `T` per cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid<T> {
    pub size: Vec2<usize>,
    pub data: Vec<T>,
}

impl<T> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("size", &self.size)
            .field("cells", &self.data.len())
            .finish()
    }
}

fn cell_count(size: Vec2<usize>) -> Result<usize, GridError> {
    size.x.checked_mul(size.y).ok_or(GridError::SizeOverflow)
}

impl<T> Grid<T> {
    pub fn new(size: Vec2<usize>, data: Vec<T>) -> Result<Self, GridError> {
        let expected = cell_count(size)?;
        if expected != data.len() {
            return Err(GridError::SizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size.x && y < self.size.y);
        y * self.size.x + x
    }

    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.size.x;
        &self.data[start..start + self.size.x]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.size.x;
        &mut self.data[start..start + self.size.x]
    }

    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            size: self.size,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Combine two grids cell by cell. Both must have the same size.
    pub fn zip_map<U, V>(&self, other: &Grid<U>, f: impl Fn(&T, &U) -> V) -> Grid<V> {
        assert_eq!(self.size, other.size, "zip_map on grids of different size");
        Grid {
            size: self.size,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn filled(size: Vec2<usize>, value: T) -> Result<Self, GridError> {
        Ok(Self {
            size,
            data: vec![value; cell_count(size)?],
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let index = self.index(x, y);
        self.data[index] = value;
    }
}
