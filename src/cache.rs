use std::cell::Cell;

/// Memoized derived scalars of a vector.
///
/// Each slot is either empty or holds the value computed from the current
/// coordinates. The owning vector calls [`DerivedCache::clear`] on every
/// mutation, before anything can read a stale slot.
#[derive(Debug, Default, Clone)]
pub struct DerivedCache {
    length: Cell<Option<f64>>,
    length_squared: Cell<Option<f64>>,
}

impl DerivedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cached value.
    #[inline]
    pub fn clear(&self) {
        self.length.set(None);
        self.length_squared.set(None);
    }

    /// Returns the cached squared length, computing and storing it on a miss.
    #[inline]
    pub fn length_squared(&self, compute: impl FnOnce() -> f64) -> f64 {
        memoize(&self.length_squared, compute)
    }

    /// Returns the cached length, computing and storing it on a miss.
    #[inline]
    pub fn length(&self, compute: impl FnOnce() -> f64) -> f64 {
        memoize(&self.length, compute)
    }

    pub fn cached_length(&self) -> Option<f64> {
        self.length.get()
    }

    pub fn cached_length_squared(&self) -> Option<f64> {
        self.length_squared.get()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.length.get().is_none() && self.length_squared.get().is_none()
    }
}

#[inline(always)]
fn memoize(slot: &Cell<Option<f64>>, compute: impl FnOnce() -> f64) -> f64 {
    match slot.get() {
        Some(value) => value,
        None => {
            let value = compute();
            slot.set(Some(value));
            value
        }
    }
}
