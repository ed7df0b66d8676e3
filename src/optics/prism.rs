//! Prism optics for focusing on a variant that may be absent.
//!
//! A Prism is a partial accessor: matching either finds the focus, reports
//! that the source does not currently hold the variant ("no match"), or fails.
//! Building is total: any focus value can be wrapped back into a source.
//!
//! Absence and failure travel on separate channels. [`Prism::preview`] returns
//! `Ok(None)` for absence, [`Prism::extract`] returns
//! [`MatchError::NoMatch`]; any other failure is an `Err` carrying the prism's
//! `Error`. [`Prism::modify`], [`Prism::over`] and [`Prism::to_traversal`] treat
//! absence as zero foci and leave the source unchanged.
//!
//! # Laws
//!
//! Every Prism must satisfy two laws:
//!
//! 1. **MatchBuild Law**: Building then matching yields the original value.
//!    ```text
//!    prism.preview(c, &prism.build(c, value)?) == Ok(Some(value))
//!    ```
//!
//! 2. **BuildMatch Law**: If matching succeeds, building the result yields the original.
//!    ```text
//!    if prism.preview(c, &source)? == Some(value) then
//!        prism.build(c, value)? == source
//!    ```
//!
//! # Examples
//!
//! ```
//! use contextual_optics::error::{MatchError, OpticError};
//! use contextual_optics::optics::Prism;
//! use contextual_optics::prism;
//!
//! #[derive(Clone, PartialEq, Debug)]
//! enum Shape {
//!     Circle(f64),
//!     Square(f64),
//! }
//!
//! let circle_prism = prism!(Shape, Circle, (), OpticError);
//!
//! assert_eq!(circle_prism.preview(&(), &Shape::Circle(5.0)), Ok(Some(5.0)));
//! assert_eq!(circle_prism.preview(&(), &Shape::Square(3.0)), Ok(None));
//! assert_eq!(
//!     circle_prism.extract(&(), &Shape::Square(3.0)),
//!     Err(MatchError::NoMatch)
//! );
//! assert_eq!(circle_prism.build(&(), 10.0), Ok(Shape::Circle(10.0)));
//! ```

use std::marker::PhantomData;

use crate::error::MatchError;
use crate::optics::Traversal;

/// A Prism focuses on a value of type `A` that an `S` may or may not hold.
///
/// # Type Parameters
///
/// - `C`: The context type threaded through every call
/// - `S`: The source type (the whole sum)
/// - `A`: The target type (the value inside the variant)
///
/// # Laws
///
/// 1. **MatchBuild Law**: `prism.preview(c, &prism.build(c, value)?) == Ok(Some(value))`
/// 2. **BuildMatch Law**: If `prism.preview(c, &source)? == Some(value)`, then `prism.build(c, value)? == source`
pub trait Prism<C, S, A> {
    /// The failure type of this prism and of the transforms it accepts.
    type Error;

    /// Matches the source against the variant.
    ///
    /// # Arguments
    ///
    /// * `context` - The caller's context, passed through untouched
    /// * `source` - The source structure
    ///
    /// # Returns
    ///
    /// `Ok(Some(value))` when the source holds the variant, `Ok(None)` when it
    /// does not.
    ///
    /// # Errors
    ///
    /// Failures other than absence.
    fn preview(&self, context: &C, source: &S) -> Result<Option<A>, Self::Error>;

    /// Builds a source holding `value` as the variant.
    ///
    /// Never reports absence.
    ///
    /// # Errors
    ///
    /// Only for caller-supplied reasons.
    fn build(&self, context: &C, value: A) -> Result<S, Self::Error>;

    /// Matches the source, surfacing absence as [`MatchError::NoMatch`].
    ///
    /// # Errors
    ///
    /// [`MatchError::NoMatch`] when the variant is absent,
    /// [`MatchError::Failed`] for any other failure.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::{MatchError, OpticError};
    /// use contextual_optics::optics::Prism;
    /// use contextual_optics::prism;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Token { Number(i64), Word(String) }
    ///
    /// let number = prism!(Token, Number, (), OpticError);
    /// assert_eq!(number.extract(&(), &Token::Number(7)), Ok(7));
    /// assert!(number
    ///     .extract(&(), &Token::Word("seven".to_string()))
    ///     .unwrap_err()
    ///     .is_no_match());
    /// ```
    fn extract(&self, context: &C, source: &S) -> Result<A, MatchError<Self::Error>> {
        match self.preview(context, source) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(MatchError::NoMatch),
            Err(error) => Err(MatchError::Failed(error)),
        }
    }

    /// Applies `function` to the focus if present and rebuilds the source.
    ///
    /// When the variant is absent the source is returned unchanged and
    /// `function` is not called.
    ///
    /// # Errors
    ///
    /// Any failure from `preview`, `function` or `build`.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::optics::Prism;
    /// use contextual_optics::prism;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Shape { Circle(f64), Square(f64) }
    ///
    /// let circle = prism!(Shape, Circle, (), OpticError);
    ///
    /// let doubled = circle.modify(&(), Shape::Circle(5.0), |_, r| Ok(r * 2.0));
    /// assert_eq!(doubled, Ok(Shape::Circle(10.0)));
    ///
    /// let untouched = circle.modify(&(), Shape::Square(3.0), |_, r| Ok(r * 2.0));
    /// assert_eq!(untouched, Ok(Shape::Square(3.0)));
    /// ```
    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, A) -> Result<A, Self::Error>,
    {
        match self.preview(context, &source)? {
            Some(focus) => {
                let focus = function(context, focus)?;
                self.build(context, focus)
            }
            None => {
                tracing::trace!("prism found no match, source left unchanged");
                Ok(source)
            }
        }
    }

    /// Same contract as [`Prism::modify`], written against `extract` and `build`.
    ///
    /// # Errors
    ///
    /// Any failure from matching, `function` or `build`. Absence is not an error.
    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, A) -> Result<A, Self::Error>,
    {
        match self.extract(context, &source) {
            Ok(focus) => {
                let focus = function(context, focus)?;
                self.build(context, focus)
            }
            Err(mismatch) => match mismatch.into_failure() {
                Some(error) => Err(error),
                None => {
                    tracing::trace!("prism found no match, source left unchanged");
                    Ok(source)
                }
            },
        }
    }

    /// Composes this prism with another prism to focus on a nested variant.
    ///
    /// Prism ∘ Prism is a Prism.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::optics::Prism;
    /// use contextual_optics::prism;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Outer { Inner(Inner), Empty }
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// enum Inner { Value(i32), Nothing }
    ///
    /// let outer_value = prism!(Outer, Inner, (), OpticError).compose(prism!(Inner, Value));
    ///
    /// assert_eq!(outer_value.preview(&(), &Outer::Inner(Inner::Value(42))), Ok(Some(42)));
    /// assert_eq!(outer_value.preview(&(), &Outer::Inner(Inner::Nothing)), Ok(None));
    /// assert_eq!(outer_value.preview(&(), &Outer::Empty), Ok(None));
    /// assert_eq!(outer_value.build(&(), 1), Ok(Outer::Inner(Inner::Value(1))));
    /// ```
    fn compose<B, P>(self, other: P) -> ComposedPrism<Self, P, A>
    where
        Self: Sized,
        P: Prism<C, A, B, Error = Self::Error>,
    {
        ComposedPrism::new(self, other)
    }

    /// Converts this prism to a traversal with zero or one foci.
    ///
    /// Absence becomes the empty set of foci.
    fn to_traversal(self) -> PrismAsTraversal<Self>
    where
        Self: Sized,
    {
        PrismAsTraversal::new(self)
    }
}

/// A prism implemented with a preview function and a build function.
///
/// The `prism!` macro and `#[derive(Prisms)]` produce this type.
///
/// # Type Parameters
///
/// - `C`: The context type
/// - `S`: The source type
/// - `A`: The target type
/// - `E`: The error type
/// - `Pr`: The preview function type
/// - `Bu`: The build function type
///
/// # Example
///
/// ```
/// use contextual_optics::error::OpticError;
/// use contextual_optics::optics::{FunctionPrism, Prism};
///
/// let positive = FunctionPrism::new(
///     |_: &(), number: &i32| Ok::<_, OpticError>((*number > 0).then_some(*number as u32)),
///     |_: &(), number: u32| Ok(number as i32),
/// );
///
/// assert_eq!(positive.preview(&(), &5), Ok(Some(5)));
/// assert_eq!(positive.preview(&(), &-5), Ok(None));
/// ```
pub struct FunctionPrism<C, S, A, E, Pr, Bu>
where
    Pr: Fn(&C, &S) -> Result<Option<A>, E>,
    Bu: Fn(&C, A) -> Result<S, E>,
{
    preview_function: Pr,
    build_function: Bu,
    _marker: PhantomData<fn(&C, S) -> (A, E)>,
}

impl<C, S, A, E, Pr, Bu> FunctionPrism<C, S, A, E, Pr, Bu>
where
    Pr: Fn(&C, &S) -> Result<Option<A>, E>,
    Bu: Fn(&C, A) -> Result<S, E>,
{
    /// Creates a new `FunctionPrism` from a preview function and a build function.
    ///
    /// # Arguments
    ///
    /// * `preview_function` - Returns `Ok(None)` when the variant is absent
    /// * `build_function` - Wraps a value in the variant
    #[must_use]
    pub const fn new(preview_function: Pr, build_function: Bu) -> Self {
        Self {
            preview_function,
            build_function,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, Pr, Bu> Prism<C, S, A> for FunctionPrism<C, S, A, E, Pr, Bu>
where
    Pr: Fn(&C, &S) -> Result<Option<A>, E>,
    Bu: Fn(&C, A) -> Result<S, E>,
{
    type Error = E;

    fn preview(&self, context: &C, source: &S) -> Result<Option<A>, E> {
        (self.preview_function)(context, source)
    }

    fn build(&self, context: &C, value: A) -> Result<S, E> {
        (self.build_function)(context, value)
    }
}

impl<C, S, A, E, Pr, Bu> Clone for FunctionPrism<C, S, A, E, Pr, Bu>
where
    Pr: Fn(&C, &S) -> Result<Option<A>, E> + Clone,
    Bu: Fn(&C, A) -> Result<S, E> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            preview_function: self.preview_function.clone(),
            build_function: self.build_function.clone(),
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, E, Pr, Bu> std::fmt::Debug for FunctionPrism<C, S, A, E, Pr, Bu>
where
    Pr: Fn(&C, &S) -> Result<Option<A>, E>,
    Bu: Fn(&C, A) -> Result<S, E>,
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("FunctionPrism")
            .finish_non_exhaustive()
    }
}

/// A prism composed of two prisms.
///
/// # Type Parameters
///
/// - `P1`: The outer prism
/// - `P2`: The inner prism
/// - `A`: The intermediate type (target of `P1`, source of `P2`)
pub struct ComposedPrism<P1, P2, A> {
    first: P1,
    second: P2,
    _marker: PhantomData<fn() -> A>,
}

impl<P1, P2, A> ComposedPrism<P1, P2, A> {
    /// Creates a new composed prism.
    ///
    /// # Arguments
    ///
    /// * `first` - The outer prism (focuses on the intermediate sum)
    /// * `second` - The inner prism (focuses on the final value)
    #[must_use]
    pub const fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, P1, P2> Prism<C, S, B> for ComposedPrism<P1, P2, A>
where
    P1: Prism<C, S, A>,
    P2: Prism<C, A, B, Error = P1::Error>,
{
    type Error = P1::Error;

    fn preview(&self, context: &C, source: &S) -> Result<Option<B>, Self::Error> {
        match self.first.preview(context, source)? {
            Some(intermediate) => self.second.preview(context, &intermediate),
            None => Ok(None),
        }
    }

    fn build(&self, context: &C, value: B) -> Result<S, Self::Error> {
        let intermediate = self.second.build(context, value)?;
        self.first.build(context, intermediate)
    }

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.first.modify(context, source, |context, intermediate| {
            self.second.modify(context, intermediate, function)
        })
    }

    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.modify(context, source, function)
    }
}

impl<P1: Clone, P2: Clone, A> Clone for ComposedPrism<P1, P2, A> {
    fn clone(&self) -> Self {
        Self {
            first: self.first.clone(),
            second: self.second.clone(),
            _marker: PhantomData,
        }
    }
}

impl<P1: std::fmt::Debug, P2: std::fmt::Debug, A> std::fmt::Debug for ComposedPrism<P1, P2, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ComposedPrism")
            .field("first", &self.first)
            .field("second", &self.second)
            .finish()
    }
}

/// A prism viewed as a traversal with zero or one foci.
pub struct PrismAsTraversal<P> {
    pub(crate) prism: P,
}

impl<P> PrismAsTraversal<P> {
    /// Creates a new `PrismAsTraversal` from a prism.
    #[must_use]
    pub const fn new(prism: P) -> Self {
        Self { prism }
    }
}

impl<C, S, A, P> Traversal<C, S, A> for PrismAsTraversal<P>
where
    P: Prism<C, S, A>,
{
    type Error = P::Error;

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, A) -> Result<A, Self::Error>,
    {
        self.prism.modify(context, source, function)
    }
}

impl<P: Clone> Clone for PrismAsTraversal<P> {
    fn clone(&self) -> Self {
        Self {
            prism: self.prism.clone(),
        }
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for PrismAsTraversal<P> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PrismAsTraversal")
            .field("prism", &self.prism)
            .finish()
    }
}

/// Creates a prism for a single-field tuple variant of an enum.
///
/// The focus is cloned on `preview`.
///
/// # Syntax
///
/// ```text
/// prism!(EnumType, VariantName)
/// prism!(EnumType, VariantName, ContextType, ErrorType)
/// ```
///
/// # Example
///
/// ```
/// use contextual_optics::error::OpticError;
/// use contextual_optics::optics::Prism;
/// use contextual_optics::prism;
///
/// #[derive(Clone, PartialEq, Debug)]
/// enum Shape {
///     Circle(f64),
///     Square(f64),
/// }
///
/// let square = prism!(Shape, Square, (), OpticError);
/// assert_eq!(square.preview(&(), &Shape::Square(2.0)), Ok(Some(2.0)));
/// assert_eq!(square.preview(&(), &Shape::Circle(2.0)), Ok(None));
/// ```
#[macro_export]
macro_rules! prism {
    ($enum_type:ident, $variant:ident, $context:ty, $error:ty) => {
        $crate::optics::FunctionPrism::new(
            |_context: &$context, source: &$enum_type| -> ::core::result::Result<::core::option::Option<_>, $error> {
                ::core::result::Result::Ok(match source {
                    $enum_type::$variant(value) => {
                        ::core::option::Option::Some(::core::clone::Clone::clone(value))
                    }
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                })
            },
            |_context: &$context, value| -> ::core::result::Result<$enum_type, $error> {
                ::core::result::Result::Ok($enum_type::$variant(value))
            },
        )
    };
    ($enum_type:ident, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |_context: &_, source: &$enum_type| {
                ::core::result::Result::Ok(match source {
                    $enum_type::$variant(value) => {
                        ::core::option::Option::Some(::core::clone::Clone::clone(value))
                    }
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                })
            },
            |_context: &_, value| ::core::result::Result::Ok($enum_type::$variant(value)),
        )
    };
    ($enum_type:ident < $($generic:tt),+ >, $variant:ident) => {
        $crate::optics::FunctionPrism::new(
            |_context: &_, source: &$enum_type<$($generic),+>| {
                ::core::result::Result::Ok(match source {
                    $enum_type::$variant(value) => {
                        ::core::option::Option::Some(::core::clone::Clone::clone(value))
                    }
                    #[allow(unreachable_patterns)]
                    _ => ::core::option::Option::None,
                })
            },
            |_context: &_, value| -> ::core::result::Result<$enum_type<$($generic),+>, _> {
                ::core::result::Result::Ok($enum_type::$variant(value))
            },
        )
    };
}
