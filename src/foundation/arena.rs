use std::ops::{Index, IndexMut};

/// Fixed-size, exclusively-owned contiguous buffer.
///
/// The length is fixed at allocation. Indexing and slicing are bounds-checked and panic on
/// out-of-range access, which is always a programmer error. Sub-views returned by
/// [`Arena::slice`] borrow the arena, so they can never outlive it, and [`Arena::release`]
/// consumes the arena so no access is possible afterwards. Dropping an arena releases it too.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena<T> {
    data: Box<[T]>,
}

impl<T: Clone> Arena<T> {
    /// Allocate `len` elements, each set to `value`.
    ///
    /// Panics when `len == 0`.
    pub fn filled(len: usize, value: T) -> Self {
        assert!(len > 0, "arena length must be > 0");
        Self {
            data: vec![value; len].into_boxed_slice(),
        }
    }

    /// Overwrite every element with `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T: Clone + Default> Arena<T> {
    /// Allocate `len` default-initialized elements.
    ///
    /// Panics when `len == 0`.
    pub fn new(len: usize) -> Self {
        Self::filled(len, T::default())
    }
}

impl<T> Arena<T> {
    /// Take ownership of existing elements.
    ///
    /// Panics when `data` is empty.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "arena length must be > 0");
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: arenas are never empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Non-owning view of `len` elements starting at `start`.
    pub fn slice(&self, start: usize, len: usize) -> &[T] {
        let end = self.checked_end(start, len);
        &self.data[start..end]
    }

    /// Mutable non-owning view of `len` elements starting at `start`.
    pub fn slice_mut(&mut self, start: usize, len: usize) -> &mut [T] {
        let end = self.checked_end(start, len);
        &mut self.data[start..end]
    }

    /// The whole buffer as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The whole buffer as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Explicitly release the buffer.
    pub fn release(self) {
        tracing::trace!(len = self.data.len(), "arena released");
        drop(self);
    }

    fn checked_end(&self, start: usize, len: usize) -> usize {
        match start.checked_add(len) {
            Some(end) if end <= self.data.len() => end,
            _ => panic!(
                "arena slice {start}..{start}+{len} out of bounds (len {})",
                self.data.len()
            ),
        }
    }
}

impl<T> Index<usize> for Arena<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        match self.data.get(i) {
            Some(v) => v,
            None => panic!("arena index {i} out of bounds (len {})", self.data.len()),
        }
    }
}

impl<T> IndexMut<usize> for Arena<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        let len = self.data.len();
        match self.data.get_mut(i) {
            Some(v) => v,
            None => panic!("arena index {i} out of bounds (len {len})"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/arena.rs"]
mod tests;
