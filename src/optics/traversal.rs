//! Traversal optics for focusing on zero or more parts of a structure.
//!
//! A Traversal is described by a single operation, `modify`, which applies an
//! effectful function to every focus in a fixed order and rebuilds the
//! structure. It generalizes both Lens (exactly one focus) and Prism (zero or
//! one focus).
//!
//! `modify` is all-or-nothing: the first error from the function, or from the
//! traversal's own focus discovery, aborts the walk and is returned; no
//! partially updated structure ever escapes. A traversal with no foci returns
//! the source unchanged.
//!
//! # Laws
//!
//! Every Traversal must satisfy two laws:
//!
//! 1. **Modify Identity Law**: Modifying with the identity yields the original.
//!    ```text
//!    traversal.modify(c, source, |_, x| Ok(x)) == Ok(source)
//!    ```
//!
//! 2. **Modify Composition Law**: Two passes equal one fused pass.
//!    ```text
//!    traversal.modify(c, traversal.modify(c, source, g)?, f) == traversal.modify(c, source, |c, x| f(c, g(c, x)?))
//!    ```
//!
//! # Examples
//!
//! ```
//! use contextual_optics::error::OpticError;
//! use contextual_optics::optics::{FunctionTraversal, Traversal};
//!
//! let evens = FunctionTraversal::new(|context: &(), numbers: Vec<i32>, function| {
//!     numbers
//!         .into_iter()
//!         .map(|number| if number % 2 == 0 { function(context, number) } else { Ok(number) })
//!         .collect::<Result<Vec<_>, OpticError>>()
//! });
//!
//! let result = evens.modify(&(), vec![1, 2, 3, 4], |_, number| Ok(number * 10));
//! assert_eq!(result, Ok(vec![1, 20, 3, 40]));
//! ```

use std::marker::PhantomData;

/// A Traversal focuses on zero or more values of type `A` inside an `S`.
///
/// # Type Parameters
///
/// - `C`: The context type threaded through every call
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (each focus)
///
/// # Laws
///
/// 1. **Modify Identity Law**: `traversal.modify(c, source, |_, x| Ok(x)) == Ok(source)`
/// 2. **Modify Composition Law**: modifying with `g` then `f` equals modifying once with `f ∘ g`
pub trait Traversal<C, S, A> {
    /// The failure type of this traversal and of the transforms it accepts.
    type Error;

    /// Applies `function` to every focus in visitation order and rebuilds the source.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller's context, handed to every call of `function`
    /// * `source` - The source structure (consumed)
    /// * `function` - The transform applied to each focus
    ///
    /// # Errors
    ///
    /// The first error from `function` or from focus discovery. No further
    /// foci are visited after an error.
    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, A) -> Result<A, Self::Error>;

    /// Alias for [`Traversal::modify`].
    ///
    /// # Errors
    ///
    /// See [`Traversal::modify`].
    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, A) -> Result<A, Self::Error>,
    {
        self.modify(context, source, function)
    }

    /// Sets every focus to the same value.
    ///
    /// # Errors
    ///
    /// Any failure from focus discovery.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::optics::{EachTraversal, Traversal};
    ///
    /// let each: EachTraversal<(), i32> = EachTraversal::new();
    /// assert_eq!(each.set_all(&(), vec![1, 2, 3], 0), Ok(vec![0, 0, 0]));
    /// ```
    fn set_all(&self, context: &C, source: S, value: A) -> Result<S, Self::Error>
    where
        A: Clone,
    {
        self.modify(context, source, |_, _| Ok(value.clone()))
    }

    /// Returns every focus, in visitation order.
    ///
    /// # Errors
    ///
    /// Any failure from focus discovery.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::optics::{EachTraversal, Traversal};
    ///
    /// let each: EachTraversal<(), i32> = EachTraversal::new();
    /// assert_eq!(each.get_all_owned(&(), vec![3, 1, 2]), Ok(vec![3, 1, 2]));
    /// ```
    fn get_all_owned(&self, context: &C, source: S) -> Result<Vec<A>, Self::Error>
    where
        A: Clone,
    {
        let mut foci = Vec::new();
        self.modify(context, source, |_, focus| {
            foci.push(focus.clone());
            Ok(focus)
        })?;
        Ok(foci)
    }

    /// Returns the number of foci.
    ///
    /// # Errors
    ///
    /// Any failure from focus discovery.
    fn length(&self, context: &C, source: S) -> Result<usize, Self::Error> {
        let mut count = 0;
        self.modify(context, source, |_, focus| {
            count += 1;
            Ok(focus)
        })?;
        Ok(count)
    }

    /// Composes this traversal with another traversal.
    ///
    /// Traversal ∘ Traversal is a Traversal; foci are visited depth-first in
    /// outer order, then inner order.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::optics::{EachTraversal, Traversal};
    ///
    /// let outer: EachTraversal<(), Vec<i32>> = EachTraversal::new();
    /// let inner: EachTraversal<(), i32> = EachTraversal::new();
    /// let composed = outer.compose(inner);
    ///
    /// let data = vec![vec![1, 2], vec![3, 4, 5]];
    /// assert_eq!(composed.get_all_owned(&(), data), Ok(vec![1, 2, 3, 4, 5]));
    /// ```
    fn compose<B, T>(self, other: T) -> ComposedTraversal<Self, T, A>
    where
        Self: Sized,
        T: Traversal<C, A, B, Error = Self::Error>,
    {
        ComposedTraversal::new(self, other)
    }
}

/// A traversal implemented with a single modify function.
///
/// The modify function receives the per-focus transform as a trait object so
/// that one closure can serve every call site.
///
/// # Type Parameters
///
/// - `C`: The context type
/// - `S`: The source type
/// - `A`: The focus type
/// - `E`: The error type
/// - `M`: The modify function type
pub struct FunctionTraversal<C, S, A, E, M>
where
    M: Fn(&C, S, &mut dyn FnMut(&C, A) -> Result<A, E>) -> Result<S, E>,
{
    modify_function: M,
    _marker: PhantomData<fn(&C, S) -> (A, E)>,
}

impl<C, S, A, E, M> FunctionTraversal<C, S, A, E, M>
where
    M: Fn(&C, S, &mut dyn FnMut(&C, A) -> Result<A, E>) -> Result<S, E>,
{
    /// Creates a new `FunctionTraversal` from a modify function.
    ///
    /// The function must visit foci in a fixed order and return the first
    /// error it receives from the transform.
    #[must_use]
    pub const fn new(modify_function: M) -> Self {
        Self {
            modify_function,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, M> Traversal<C, S, A> for FunctionTraversal<C, S, A, E, M>
where
    M: Fn(&C, S, &mut dyn FnMut(&C, A) -> Result<A, E>) -> Result<S, E>,
{
    type Error = E;

    fn modify<F>(&self, context: &C, source: S, mut function: F) -> Result<S, E>
    where
        F: FnMut(&C, A) -> Result<A, E>,
    {
        (self.modify_function)(context, source, &mut function)
    }
}

impl<C, S, A, E, M> Clone for FunctionTraversal<C, S, A, E, M>
where
    M: Fn(&C, S, &mut dyn FnMut(&C, A) -> Result<A, E>) -> Result<S, E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            modify_function: self.modify_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, M> std::fmt::Debug for FunctionTraversal<C, S, A, E, M>
where
    M: Fn(&C, S, &mut dyn FnMut(&C, A) -> Result<A, E>) -> Result<S, E>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionTraversal")
            .finish_non_exhaustive()
    }
}

/// A traversal composed of two traversals.
///
/// # Type Parameters
///
/// - `T1`: The outer traversal
/// - `T2`: The inner traversal
/// - `A`: The intermediate type (focus of `T1`, source of `T2`)
pub struct ComposedTraversal<T1, T2, A> {
    first: T1,
    second: T2,
    _marker: PhantomData<fn() -> A>,
}

impl<T1, T2, A> ComposedTraversal<T1, T2, A> {
    /// Creates a new composed traversal.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer traversal
    /// * `second` - The traversal applied to each outer focus
    #[must_use]
    pub const fn new(first: T1, second: T2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, T1, T2> Traversal<C, S, B> for ComposedTraversal<T1, T2, A>
where
    T1: Traversal<C, S, A>,
    T2: Traversal<C, A, B, Error = T1::Error>,
{
    type Error = T1::Error;

    fn modify<F>(&self, context: &C, source: S, mut function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, B) -> Result<B, Self::Error>,
    {
        self.first.modify(context, source, |context, intermediate| {
            self.second.modify(context, intermediate, &mut function)
        })
    }
}

impl<T1: Clone, T2: Clone, A> Clone for ComposedTraversal<T1, T2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T1: std::fmt::Debug, T2: std::fmt::Debug, A> std::fmt::Debug for ComposedTraversal<T1, T2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedTraversal")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}
