//! Values derived from other state, cached on their dependencies.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A memoized value keyed by its dependency tuple.
///
/// The compute closure runs the first time the value is read and again only
/// when the dependencies passed to [`get`](Derived::get) differ from the ones
/// the cached value was computed from. The cache holds a single slot:
/// returning to an older dependency tuple recomputes.
///
/// # Example
/// ```
/// # use tally::derived::Derived;
/// let double = Derived::new(|n: &i32| n * 2);
///
/// assert_eq!(*double.get(2), 4);
/// assert_eq!(*double.get(2), 4);
/// assert_eq!(double.computations(), 1);
///
/// assert_eq!(*double.get(3), 6);
/// assert_eq!(double.computations(), 2);
/// ```
pub struct Derived<D, T> {
    compute: Box<dyn Fn(&D) -> T>,
    cached: RefCell<Option<(D, Rc<T>)>>,
    computations: Cell<u32>,
}

impl<D: PartialEq, T> Derived<D, T> {
    /// Wraps a compute closure. Nothing runs until the first [`get`](Derived::get).
    pub fn new(compute: impl Fn(&D) -> T + 'static) -> Self {
        Self {
            compute: Box::new(compute),
            cached: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    /// Returns the value for `deps`, recomputing only on a dependency change.
    pub fn get(&self, deps: D) -> Rc<T> {
        if let Some((old, value)) = &*self.cached.borrow() {
            if *old == deps {
                return value.clone();
            }
        }
        // The cache borrow is released before the compute closure runs.
        let value = Rc::new((self.compute)(&deps));
        self.computations.set(self.computations.get() + 1);
        *self.cached.borrow_mut() = Some((deps, value.clone()));
        value
    }

    /// How many times the compute closure has actually run.
    ///
    /// Intended for change-detection assertions: a consumer that only ever
    /// passes the same dependencies sees this stay at one.
    pub fn computations(&self) -> u32 {
        self.computations.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_lazily() {
        let derived = Derived::new(|n: &i32| n + 1);
        assert_eq!(derived.computations(), 0);
        assert_eq!(*derived.get(1), 2);
        assert_eq!(derived.computations(), 1);
    }

    #[test]
    fn unchanged_dependencies_hit_the_cache() {
        let derived = Derived::new(|s: &String| s.len());
        for _ in 0..3 {
            assert_eq!(*derived.get("abc".to_string()), 3);
        }
        assert_eq!(derived.computations(), 1);
    }

    #[test]
    fn changed_dependencies_recompute() {
        let derived = Derived::new(|n: &i32| n * n);
        assert_eq!(*derived.get(2), 4);
        assert_eq!(*derived.get(3), 9);
        assert_eq!(derived.computations(), 2);
    }

    #[test]
    fn single_slot_forgets_older_dependencies() {
        let derived = Derived::new(|n: &i32| *n);
        derived.get(1);
        derived.get(2);
        derived.get(1);
        assert_eq!(derived.computations(), 3);
    }
}
