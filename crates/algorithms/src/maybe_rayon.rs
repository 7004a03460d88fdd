//! Parallel iteration when the `parallel` feature is on, plain iteration
//! otherwise.
//!
//! Call sites write `.into_par_iter()` either way; without rayon the method
//! forwards to `into_iter()` and the rest of the chain resolves to the
//! standard `Iterator` adapters.

#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    pub trait IntoParallelIterator {
        type Iter: Iterator<Item = Self::Item>;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
