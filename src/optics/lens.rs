//! Lens optics for focusing on exactly one part of a structure.
//!
//! A Lens is a total accessor: it can always view its focus and always write
//! a new focus back. Every operation receives the caller's context `C`, which
//! is handed unchanged to every user-supplied function, and may fail with the
//! lens's `Error` type for caller-supplied reasons (a cancelled context, a
//! failing derived accessor).
//!
//! # Laws
//!
//! Every Lens must satisfy three laws (for operations that succeed):
//!
//! 1. **ViewUpdate Law**: Viewing and writing back yields the original.
//!    ```text
//!    lens.update(c, source, lens.view(c, &source)?) == source
//!    ```
//!
//! 2. **UpdateView Law**: Updating then viewing yields the written value.
//!    ```text
//!    lens.view(c, &lens.update(c, source, value)?) == value
//!    ```
//!
//! 3. **UpdateUpdate Law**: The last write wins.
//!    ```text
//!    lens.update(c, lens.update(c, source, v1)?, v2) == lens.update(c, source, v2)
//!    ```
//!
//! # Examples
//!
//! ```
//! use contextual_optics::error::OpticError;
//! use contextual_optics::lens;
//! use contextual_optics::optics::Lens;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! struct Person { name: String, age: u32 }
//!
//! let age_lens = lens!(Person, age, (), OpticError);
//!
//! let alice = Person { name: "alice".to_string(), age: 30 };
//! assert_eq!(age_lens.view(&(), &alice), Ok(30));
//!
//! let older = age_lens.update(&(), alice, 31).unwrap();
//! assert_eq!(older, Person { name: "alice".to_string(), age: 31 });
//! ```

use std::marker::PhantomData;

use crate::optics::Traversal;

/// A Lens focuses on exactly one value of type `A` inside an `S`.
///
/// # Type Parameters
///
/// - `C`: The context type threaded through every call
/// - `S`: The source type (the whole structure)
/// - `A`: The target type (the focused part)
///
/// # Laws
///
/// 1. **ViewUpdate Law**: `lens.update(c, source, lens.view(c, &source)?) == source`
/// 2. **UpdateView Law**: `lens.view(c, &lens.update(c, source, value)?) == value`
/// 3. **UpdateUpdate Law**: `lens.update(c, lens.update(c, source, v1)?, v2) == lens.update(c, source, v2)`
pub trait Lens<C, S, A> {
    /// The failure type of this lens and of the transforms it accepts.
    type Error;

    /// Returns the current focus.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller's context, passed through untouched
    /// * `source` - The source structure
    ///
    /// # Errors
    ///
    /// Only for caller-supplied reasons; a lens over a plain field never fails.
    fn view(&self, context: &C, source: &S) -> Result<A, Self::Error>;

    /// Replaces the focus, returning the new source.
    ///
    /// Everything outside the focus is carried over unchanged.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller's context, passed through untouched
    /// * `source` - The source structure (consumed)
    /// * `value` - The new focus
    ///
    /// # Errors
    ///
    /// Only for caller-supplied reasons. On error the source is dropped.
    fn update(&self, context: &C, source: S, value: A) -> Result<S, Self::Error>;

    /// Views the focus, transforms it, and writes the result back.
    ///
    /// Short-circuits with the first error from `view`, `function` or `update`.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller's context, also handed to `function`
    /// * `source` - The source structure (consumed)
    /// * `function` - The transform applied to the focus
    ///
    /// # Errors
    ///
    /// The first error raised by `view`, `function` or `update`.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::lens;
    /// use contextual_optics::optics::Lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let x_lens = lens!(Point, x, (), OpticError);
    /// let doubled = x_lens.over(&(), Point { x: 10, y: 20 }, |_, x| Ok(x * 2));
    /// assert_eq!(doubled, Ok(Point { x: 20, y: 20 }));
    ///
    /// let failed = x_lens.over(&(), Point { x: 10, y: 20 }, |_, _| {
    ///     Err(OpticError::custom("rejected"))
    /// });
    /// assert_eq!(failed, Err(OpticError::custom("rejected")));
    /// ```
    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, A) -> Result<A, Self::Error>,
    {
        let current = self.view(context, &source)?;
        let next = function(context, current)?;
        self.update(context, source, next)
    }

    /// Composes this lens with another lens to focus deeper.
    ///
    /// Lens ∘ Lens is a Lens.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::lens;
    /// use contextual_optics::optics::Lens;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Address { street: String, city: String }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// struct Person { name: String, address: Address }
    ///
    /// let street = lens!(Person, address, (), OpticError)
    ///     .compose(lens!(Address, street, (), OpticError));
    ///
    /// let person = Person {
    ///     name: "Alice".to_string(),
    ///     address: Address { street: "Main St".to_string(), city: "Tokyo".to_string() },
    /// };
    /// assert_eq!(street.view(&(), &person), Ok("Main St".to_string()));
    ///
    /// let moved = street.update(&(), person, "Oak Ave".to_string()).unwrap();
    /// assert_eq!(moved.address.street, "Oak Ave");
    /// assert_eq!(moved.address.city, "Tokyo");
    /// ```
    fn compose<B, L>(self, other: L) -> ComposedLens<Self, L, A>
    where
        Self: Sized,
        L: Lens<C, A, B, Error = Self::Error>,
    {
        ComposedLens::new(self, other)
    }

    /// Converts this lens to a traversal with exactly one focus.
    fn to_traversal(self) -> LensAsTraversal<Self>
    where
        Self: Sized,
    {
        LensAsTraversal::new(self)
    }
}

/// A lens implemented with a view function and an update function.
///
/// The `lens!` macro and `#[derive(Lenses)]` produce this type.
///
/// # Type Parameters
///
/// - `C`: The context type
/// - `S`: The source type
/// - `A`: The target type
/// - `E`: The error type
/// - `V`: The view function type
/// - `U`: The update function type
///
/// # Example
///
/// ```
/// use contextual_optics::error::OpticError;
/// use contextual_optics::optics::{FunctionLens, Lens};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let x_lens = FunctionLens::new(
///     |_: &(), point: &Point| Ok::<_, OpticError>(point.x),
///     |_: &(), point: Point, x: i32| Ok(Point { x, ..point }),
/// );
///
/// assert_eq!(x_lens.view(&(), &Point { x: 10, y: 20 }), Ok(10));
/// ```
pub struct FunctionLens<C, S, A, E, V, U>
where
    V: Fn(&C, &S) -> Result<A, E>,
    U: Fn(&C, S, A) -> Result<S, E>,
{
    view_function: V,
    update_function: U,
    _marker: PhantomData<fn(&C, S) -> (A, E)>,
}

impl<C, S, A, E, V, U> FunctionLens<C, S, A, E, V, U>
where
    V: Fn(&C, &S) -> Result<A, E>,
    U: Fn(&C, S, A) -> Result<S, E>,
{
    /// Creates a new `FunctionLens` from a view function and an update function.
    ///
    /// # Arguments
    ///
    /// * `view_function` - Extracts the focus from the source
    /// * `update_function` - Builds a new source with the focus replaced
    #[must_use]
    pub const fn new(view_function: V, update_function: U) -> Self {
        Self {
            view_function,
            update_function,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, V, U> Lens<C, S, A> for FunctionLens<C, S, A, E, V, U>
where
    V: Fn(&C, &S) -> Result<A, E>,
    U: Fn(&C, S, A) -> Result<S, E>,
{
    type Error = E;

    fn view(&self, context: &C, source: &S) -> Result<A, E> {
        (self.view_function)(context, source)
    }

    fn update(&self, context: &C, source: S, value: A) -> Result<S, E> {
        (self.update_function)(context, source, value)
    }
}

impl<C, S, A, E, V, U> Clone for FunctionLens<C, S, A, E, V, U>
where
    V: Fn(&C, &S) -> Result<A, E> + Clone,
    U: Fn(&C, S, A) -> Result<S, E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            view_function: self.view_function.clone(),
            update_function: self.update_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, V, U> std::fmt::Debug for FunctionLens<C, S, A, E, V, U>
where
    V: Fn(&C, &S) -> Result<A, E>,
    U: Fn(&C, S, A) -> Result<S, E>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionLens")
            .finish_non_exhaustive()
    }
}

/// A lens composed of two lenses.
///
/// # Type Parameters
///
/// - `L1`: The outer lens
/// - `L2`: The inner lens
/// - `A`: The intermediate type (target of `L1`, source of `L2`)
pub struct ComposedLens<L1, L2, A> {
    first: L1,
    second: L2,
    _marker: PhantomData<fn() -> A>,
}

impl<L1, L2, A> ComposedLens<L1, L2, A> {
    /// Creates a new composed lens.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer lens (focuses on the intermediate structure)
    /// * `second` - The inner lens (focuses on the final part)
    #[must_use]
    pub const fn new(first: L1, second: L2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, L1, L2> Lens<C, S, B> for ComposedLens<L1, L2, A>
where
    L1: Lens<C, S, A>,
    L2: Lens<C, A, B, Error = L1::Error>,
{
    type Error = L1::Error;

    fn view(&self, context: &C, source: &S) -> Result<B, Self::Error> {
        let intermediate = self.first.view(context, source)?;
        self.second.view(context, &intermediate)
    }

    fn update(&self, context: &C, source: S, value: B) -> Result<S, Self::Error> {
        self.first.over(context, source, |context, intermediate| {
            self.second.update(context, intermediate, value)
        })
    }
}

impl<L1: Clone, L2: Clone, A> Clone for ComposedLens<L1, L2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<L1: std::fmt::Debug, L2: std::fmt::Debug, A> std::fmt::Debug for ComposedLens<L1, L2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedLens")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// A lens viewed as a traversal with exactly one focus.
pub struct LensAsTraversal<L> {
    pub(crate) lens: L,
}

impl<L> LensAsTraversal<L> {
    /// Creates a new `LensAsTraversal` from a lens.
    #[must_use]
    pub const fn new(lens: L) -> Self {
        Self { lens }
    }
}

impl<C, S, A, L> Traversal<C, S, A> for LensAsTraversal<L>
where
    L: Lens<C, S, A>,
{
    type Error = L::Error;

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, A) -> Result<A, Self::Error>,
    {
        self.lens.over(context, source, function)
    }
}

impl<L: Clone> Clone for LensAsTraversal<L> {
    fn clone(&self) -> Self {
        Self {
            lens: self.lens.clone(),
        }
    }
}

impl<L: std::fmt::Debug> std::fmt::Debug for LensAsTraversal<L> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LensAsTraversal")
            .field("lens", &self.lens)
            .finish()
    }
}

/// Creates a lens for a struct field.
///
/// The focus is cloned on `view` and assigned in place on `update`.
///
/// # Syntax
///
/// ```text
/// lens!(StructType, field_name)
/// lens!(StructType, field_name, ContextType, ErrorType)
/// ```
///
/// The two-argument form leaves the context and error types to inference
/// (usually from a composition partner); the four-argument form pins them.
///
/// # Example
///
/// ```
/// use contextual_optics::error::OpticError;
/// use contextual_optics::lens;
/// use contextual_optics::optics::Lens;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let y_lens = lens!(Point, y, (), OpticError);
/// let updated = y_lens.update(&(), Point { x: 1, y: 2 }, 5).unwrap();
/// assert_eq!(updated, Point { x: 1, y: 5 });
/// ```
#[macro_export]
macro_rules! lens {
    ($struct_type:ident, $field:ident, $context:ty, $error:ty) => {
        $crate::optics::FunctionLens::new(
            |_context: &$context, source: &$struct_type| -> ::core::result::Result<_, $error> {
                ::core::result::Result::Ok(::core::clone::Clone::clone(&source.$field))
            },
            |_context: &$context, mut source: $struct_type, value| -> ::core::result::Result<$struct_type, $error> {
                source.$field = value;
                ::core::result::Result::Ok(source)
            },
        )
    };
    ($struct_type:ident, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |_context: &_, source: &$struct_type| {
                ::core::result::Result::Ok(::core::clone::Clone::clone(&source.$field))
            },
            |_context: &_, mut source: $struct_type, value| {
                source.$field = value;
                ::core::result::Result::Ok(source)
            },
        )
    };
    ($struct_type:ident < $($generic:tt),+ >, $field:ident) => {
        $crate::optics::FunctionLens::new(
            |_context: &_, source: &$struct_type<$($generic),+>| {
                ::core::result::Result::Ok(::core::clone::Clone::clone(&source.$field))
            },
            |_context: &_, mut source: $struct_type<$($generic),+>, value| {
                source.$field = value;
                ::core::result::Result::Ok(source)
            },
        )
    };
}
