//! Reactive state for a counter widget.
//!
//! The widget itself is two controls and a sentence: a counter stepped up
//! and down by discrete [`Transition`] events, next to a display of whether
//! the *initial* value is prime. This crate holds that state and nothing
//! else. Rendering is an external collaborator: a boundary constructs a
//! [`Counter`], reads [`CounterView`] snapshots, and redraws when a bound
//! callback fires.
//!
//! The primality flag is a [`Derived`] value cached on its only dependency,
//! the initial count, so stepping the counter never reruns the test. The
//! transition handle returned by [`Counter::dispatcher`] is created once per
//! instance and keeps a stable identity for the life of the widget.
//!
//! # Example
//! ```
//! use tally::{Counter, Transition};
//!
//! let counter = Counter::new(7);
//! assert!(counter.initial_value_is_prime());
//!
//! let dispatch = counter.dispatcher();
//! dispatch(Transition::Increment);
//! dispatch(Transition::Increment);
//! dispatch(Transition::Decrement);
//! assert_eq!(counter.value(), 8);
//! ```

pub mod binding;
pub mod counter;
pub mod derived;
pub mod prime;

pub use binding::BindingId;
pub use counter::*;
pub use derived::*;
pub use prime::*;
