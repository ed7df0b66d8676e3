//! Optics composition across kinds.
//!
//! Composing two optics yields an optic whose kind is fixed by a lattice in
//! which Lens is the strongest and Traversal the weakest kind:
//!
//! ```text
//! Lens      ∘ Lens      = Lens
//! Lens      ∘ Prism     = Prism
//! Prism     ∘ Lens      = Prism
//! Prism     ∘ Prism     = Prism
//! Lens      ∘ Traversal = Traversal
//! Prism     ∘ Traversal = Traversal
//! Traversal ∘ Lens      = Traversal
//! Traversal ∘ Prism     = Traversal
//! Traversal ∘ Traversal = Traversal
//! ```
//!
//! Same-kind compositions live next to their kind ([`Lens::compose`],
//! [`Prism::compose`], [`Traversal::compose`]). This module provides the
//! cross-kind compositions as extension traits and all nine compositions as
//! free functions.
//!
//! Every composition resolves the outer focus first and never runs the inner
//! optic when the outer step fails or finds no match. "No match" stays
//! distinguishable from failure through any depth of nesting: prisms report it
//! as `Ok(None)`, traversals absorb it as zero foci.
//!
//! # Example
//!
//! ```
//! use contextual_optics::optics::{
//!     EachTraversal, NullablePrism, Traversal, TraversalComposeExtension,
//! };
//! use contextual_optics::lens;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User { name: String, age: Option<u32> }
//!
//! let users: EachTraversal<(), User> = EachTraversal::new();
//! let known_ages = users
//!     .compose_lens(lens!(User, age))
//!     .compose_prism(NullablePrism::new());
//!
//! let people = vec![
//!     User { name: "alice".to_string(), age: Some(30) },
//!     User { name: "charlie".to_string(), age: None },
//! ];
//! let older = known_ages.modify(&(), people, |_, age| Ok(age + 1)).unwrap();
//! assert_eq!(older[0].age, Some(31));
//! assert_eq!(older[1].age, None);
//! ```

use std::marker::PhantomData;

use crate::optics::ComposedLens;
use crate::optics::ComposedPrism;
use crate::optics::ComposedTraversal;
use crate::optics::Lens;
use crate::optics::Prism;
use crate::optics::Traversal;

// =============================================================================
// Lens + Prism -> Prism
// =============================================================================

/// Result of composing a Lens with a Prism.
///
/// Matching views the lens focus and matches the prism against it. Building
/// wraps the value with the prism and writes it into the source returned by
/// `empty_source`, the only point where a source is manufactured from
/// nothing. Matching and modifying never call it.
///
/// # Type Parameters
///
/// - `L`: The lens type
/// - `P`: The prism type
/// - `A`: The intermediate type (target of L, source of P)
/// - `S`: The source type built from nothing
pub struct LensPrismComposition<L, P, A, S> {
    lens: L,
    prism: P,
    empty_source: fn() -> S,
    _marker: PhantomData<fn() -> A>,
}

impl<L, P, A, S> LensPrismComposition<L, P, A, S> {
    /// Creates a new `LensPrismComposition` that builds from `S::default()`.
    #[must_use]
    pub fn new(lens: L, prism: P) -> Self
    where
        S: Default,
    {
        Self::with_empty_source(lens, prism, S::default)
    }

    /// Creates a new `LensPrismComposition` that builds from `empty_source()`.
    #[must_use]
    pub const fn with_empty_source(lens: L, prism: P, empty_source: fn() -> S) -> Self {
        Self {
            lens,
            prism,
            empty_source,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, L, P> Prism<C, S, B> for LensPrismComposition<L, P, A, S>
where
    L: Lens<C, S, A>,
    P: Prism<C, A, B, Error = L::Error>,
{
    type Error = L::Error;

    fn preview(&self, context: &C, source: &S) -> Result<Option<B>, Self::Error> {
        let intermediate = self.lens.view(context, source)?;
        self.prism.preview(context, &intermediate)
    }

    fn build(&self, context: &C, value: B) -> Result<S, Self::Error> {
        let intermediate = self.prism.build(context, value)?;
        self.lens.update(context, (self.empty_source)(), intermediate)
    }

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.lens.over(context, source, |context, intermediate| {
            self.prism.modify(context, intermediate, function)
        })
    }

    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.modify(context, source, function)
    }
}

// =============================================================================
// Lens + Traversal -> Traversal
// =============================================================================

/// Result of composing a Lens with a Traversal.
///
/// # Type Parameters
///
/// - `L`: The lens type
/// - `T`: The traversal type
/// - `A`: The intermediate type (target of L, source of T)
pub struct LensTraversalComposition<L, T, A> {
    lens: L,
    traversal: T,
    _marker: PhantomData<fn() -> A>,
}

impl<L, T, A> LensTraversalComposition<L, T, A> {
    /// Creates a new `LensTraversalComposition`.
    #[must_use]
    pub const fn new(lens: L, traversal: T) -> Self {
        Self {
            lens,
            traversal,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, L, T> Traversal<C, S, B> for LensTraversalComposition<L, T, A>
where
    L: Lens<C, S, A>,
    T: Traversal<C, A, B, Error = L::Error>,
{
    type Error = L::Error;

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, B) -> Result<B, Self::Error>,
    {
        self.lens.over(context, source, |context, intermediate| {
            self.traversal.modify(context, intermediate, function)
        })
    }
}

// =============================================================================
// Prism + Lens -> Prism
// =============================================================================

/// Result of composing a Prism with a Lens.
///
/// Building starts from `empty_focus()`, writes the value through the lens
/// and wraps the result with the prism. Modifying an existing source goes
/// through the lens of the matched focus, so the focus's other parts are kept.
///
/// # Type Parameters
///
/// - `P`: The prism type
/// - `L`: The lens type
/// - `A`: The intermediate type (target of P, source of L)
pub struct PrismLensComposition<P, L, A> {
    prism: P,
    lens: L,
    empty_focus: fn() -> A,
}

impl<P, L, A> PrismLensComposition<P, L, A> {
    /// Creates a new `PrismLensComposition` that builds from `A::default()`.
    #[must_use]
    pub fn new(prism: P, lens: L) -> Self
    where
        A: Default,
    {
        Self::with_empty_focus(prism, lens, A::default)
    }

    /// Creates a new `PrismLensComposition` that builds from `empty_focus()`.
    #[must_use]
    pub const fn with_empty_focus(prism: P, lens: L, empty_focus: fn() -> A) -> Self {
        Self {
            prism,
            lens,
            empty_focus,
        }
    }
}

impl<C, S, A, B, P, L> Prism<C, S, B> for PrismLensComposition<P, L, A>
where
    P: Prism<C, S, A>,
    L: Lens<C, A, B, Error = P::Error>,
{
    type Error = P::Error;

    fn preview(&self, context: &C, source: &S) -> Result<Option<B>, Self::Error> {
        match self.prism.preview(context, source)? {
            Some(intermediate) => self.lens.view(context, &intermediate).map(Some),
            None => Ok(None),
        }
    }

    fn build(&self, context: &C, value: B) -> Result<S, Self::Error> {
        let intermediate = self.lens.update(context, (self.empty_focus)(), value)?;
        self.prism.build(context, intermediate)
    }

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.prism.modify(context, source, |context, intermediate| {
            self.lens.over(context, intermediate, function)
        })
    }

    fn over<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnOnce(&C, B) -> Result<B, Self::Error>,
    {
        self.modify(context, source, function)
    }
}

// =============================================================================
// Prism + Traversal -> Traversal
// =============================================================================

/// Result of composing a Prism with a Traversal.
///
/// When the prism finds no match there are zero foci and the source is
/// returned unchanged.
///
/// # Type Parameters
///
/// - `P`: The prism type
/// - `T`: The traversal type
/// - `A`: The intermediate type (target of P, source of T)
pub struct PrismTraversalComposition<P, T, A> {
    prism: P,
    traversal: T,
    _marker: PhantomData<fn() -> A>,
}

impl<P, T, A> PrismTraversalComposition<P, T, A> {
    /// Creates a new `PrismTraversalComposition`.
    #[must_use]
    pub const fn new(prism: P, traversal: T) -> Self {
        Self {
            prism,
            traversal,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, P, T> Traversal<C, S, B> for PrismTraversalComposition<P, T, A>
where
    P: Prism<C, S, A>,
    T: Traversal<C, A, B, Error = P::Error>,
{
    type Error = P::Error;

    fn modify<F>(&self, context: &C, source: S, function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, B) -> Result<B, Self::Error>,
    {
        self.prism.modify(context, source, |context, intermediate| {
            self.traversal.modify(context, intermediate, function)
        })
    }
}

// =============================================================================
// Traversal + Lens -> Traversal
// =============================================================================

/// Result of composing a Traversal with a Lens.
///
/// # Type Parameters
///
/// - `T`: The traversal type
/// - `L`: The lens type
/// - `A`: The intermediate type (focus of T, source of L)
pub struct TraversalLensComposition<T, L, A> {
    traversal: T,
    lens: L,
    _marker: PhantomData<fn() -> A>,
}

impl<T, L, A> TraversalLensComposition<T, L, A> {
    /// Creates a new `TraversalLensComposition`.
    #[must_use]
    pub const fn new(traversal: T, lens: L) -> Self {
        Self {
            traversal,
            lens,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, T, L> Traversal<C, S, B> for TraversalLensComposition<T, L, A>
where
    T: Traversal<C, S, A>,
    L: Lens<C, A, B, Error = T::Error>,
{
    type Error = T::Error;

    fn modify<F>(&self, context: &C, source: S, mut function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, B) -> Result<B, Self::Error>,
    {
        self.traversal.modify(context, source, |context, intermediate| {
            self.lens.over(context, intermediate, &mut function)
        })
    }
}

// =============================================================================
// Traversal + Prism -> Traversal
// =============================================================================

/// Result of composing a Traversal with a Prism.
///
/// A focus whose prism step finds no match is left as it is; the walk goes on
/// with the next focus and the overall result is still a success.
///
/// # Type Parameters
///
/// - `T`: The traversal type
/// - `P`: The prism type
/// - `A`: The intermediate type (focus of T, source of P)
pub struct TraversalPrismComposition<T, P, A> {
    traversal: T,
    prism: P,
    _marker: PhantomData<fn() -> A>,
}

impl<T, P, A> TraversalPrismComposition<T, P, A> {
    /// Creates a new `TraversalPrismComposition`.
    #[must_use]
    pub const fn new(traversal: T, prism: P) -> Self {
        Self {
            traversal,
            prism,
            _marker: PhantomData,
        }
    }
}

impl<C, S, A, B, T, P> Traversal<C, S, B> for TraversalPrismComposition<T, P, A>
where
    T: Traversal<C, S, A>,
    P: Prism<C, A, B, Error = T::Error>,
{
    type Error = T::Error;

    fn modify<F>(&self, context: &C, source: S, mut function: F) -> Result<S, Self::Error>
    where
        F: FnMut(&C, B) -> Result<B, Self::Error>,
    {
        self.traversal.modify(context, source, |context, intermediate| {
            self.prism.modify(context, intermediate, &mut function)
        })
    }
}

macro_rules! impl_composition_boilerplate {
    ($name:ident, $first:ident, $second:ident) => {
        impl<X: Clone, Y: Clone, A> Clone for $name<X, Y, A> {
            fn clone(&self) -> Self {
                Self {
                    $first: self.$first.clone(),
                    $second: self.$second.clone(),
                    _marker: PhantomData,
                }
            }
        }

        impl<X: std::fmt::Debug, Y: std::fmt::Debug, A> std::fmt::Debug for $name<X, Y, A> {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter
                    .debug_struct(stringify!($name))
                    .field(stringify!($first), &self.$first)
                    .field(stringify!($second), &self.$second)
                    .finish()
            }
        }
    };
}

impl_composition_boilerplate!(LensTraversalComposition, lens, traversal);
impl_composition_boilerplate!(PrismTraversalComposition, prism, traversal);
impl_composition_boilerplate!(TraversalLensComposition, traversal, lens);
impl_composition_boilerplate!(TraversalPrismComposition, traversal, prism);

impl<L: Clone, P: Clone, A, S> Clone for LensPrismComposition<L, P, A, S> {
    fn clone(&self) -> Self {
        Self::with_empty_source(self.lens.clone(), self.prism.clone(), self.empty_source)
    }
}

impl<L: std::fmt::Debug, P: std::fmt::Debug, A, S> std::fmt::Debug
    for LensPrismComposition<L, P, A, S>
{
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("LensPrismComposition")
            .field("lens", &self.lens)
            .field("prism", &self.prism)
            .finish_non_exhaustive()
    }
}

impl<P: Clone, L: Clone, A> Clone for PrismLensComposition<P, L, A> {
    fn clone(&self) -> Self {
        Self::with_empty_focus(self.prism.clone(), self.lens.clone(), self.empty_focus)
    }
}

impl<P: std::fmt::Debug, L: std::fmt::Debug, A> std::fmt::Debug for PrismLensComposition<P, L, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PrismLensComposition")
            .field("prism", &self.prism)
            .field("lens", &self.lens)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Extension traits
// =============================================================================

/// Extension trait for composing a Lens with the weaker kinds.
pub trait LensComposeExtension<C, S, A>: Lens<C, S, A> {
    /// Composes this lens with a prism. Lens ∘ Prism is a Prism.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::optics::{LensComposeExtension, NullablePrism, Prism};
    /// use contextual_optics::lens;
    ///
    /// #[derive(Clone, Debug, PartialEq, Default)]
    /// struct Settings { timeout: Option<u64> }
    ///
    /// let timeout = lens!(Settings, timeout, (), OpticError).compose_prism(NullablePrism::new());
    ///
    /// assert_eq!(timeout.preview(&(), &Settings { timeout: Some(30) }), Ok(Some(30)));
    /// assert_eq!(timeout.preview(&(), &Settings { timeout: None }), Ok(None));
    /// assert_eq!(timeout.build(&(), 5), Ok(Settings { timeout: Some(5) }));
    /// ```
    fn compose_prism<B, P>(self, prism: P) -> LensPrismComposition<Self, P, A, S>
    where
        Self: Sized,
        P: Prism<C, A, B, Error = Self::Error>,
        S: Default,
    {
        LensPrismComposition::new(self, prism)
    }

    /// Like [`compose_prism`](Self::compose_prism), for sources without a
    /// `Default`: `build` starts from `empty_source()` instead.
    ///
    /// # Example
    ///
    /// ```
    /// use contextual_optics::error::OpticError;
    /// use contextual_optics::optics::{LensComposeExtension, NullablePrism, Prism};
    /// use contextual_optics::lens;
    ///
    /// #[derive(Clone, Debug, PartialEq)]
    /// struct Session { token: Option<String>, user_id: u64 }
    ///
    /// let token = lens!(Session, token, (), OpticError).compose_prism_with(
    ///     NullablePrism::new(),
    ///     || Session { token: None, user_id: 0 },
    /// );
    ///
    /// let session = Session { token: None, user_id: 7 };
    /// assert_eq!(token.preview(&(), &session), Ok(None));
    /// assert_eq!(
    ///     token.build(&(), "abc".to_string()),
    ///     Ok(Session { token: Some("abc".to_string()), user_id: 0 })
    /// );
    /// ```
    fn compose_prism_with<B, P>(
        self,
        prism: P,
        empty_source: fn() -> S,
    ) -> LensPrismComposition<Self, P, A, S>
    where
        Self: Sized,
        P: Prism<C, A, B, Error = Self::Error>,
    {
        LensPrismComposition::with_empty_source(self, prism, empty_source)
    }

    /// Composes this lens with a traversal. Lens ∘ Traversal is a Traversal.
    fn compose_traversal<B, T>(self, traversal: T) -> LensTraversalComposition<Self, T, A>
    where
        Self: Sized,
        T: Traversal<C, A, B, Error = Self::Error>,
    {
        LensTraversalComposition::new(self, traversal)
    }
}

impl<C, S, A, L> LensComposeExtension<C, S, A> for L where L: Lens<C, S, A> {}

/// Extension trait for composing a Prism with a Lens or a Traversal.
pub trait PrismComposeExtension<C, S, A>: Prism<C, S, A> {
    /// Composes this prism with a lens. Prism ∘ Lens is a Prism.
    fn compose_lens<B, L>(self, lens: L) -> PrismLensComposition<Self, L, A>
    where
        Self: Sized,
        L: Lens<C, A, B, Error = Self::Error>,
        A: Default,
    {
        PrismLensComposition::new(self, lens)
    }

    /// Like [`compose_lens`](Self::compose_lens), for foci without a
    /// `Default`: `build` starts from `empty_focus()` instead.
    fn compose_lens_with<B, L>(
        self,
        lens: L,
        empty_focus: fn() -> A,
    ) -> PrismLensComposition<Self, L, A>
    where
        Self: Sized,
        L: Lens<C, A, B, Error = Self::Error>,
    {
        PrismLensComposition::with_empty_focus(self, lens, empty_focus)
    }

    /// Composes this prism with a traversal. Prism ∘ Traversal is a Traversal.
    fn compose_traversal<B, T>(self, traversal: T) -> PrismTraversalComposition<Self, T, A>
    where
        Self: Sized,
        T: Traversal<C, A, B, Error = Self::Error>,
    {
        PrismTraversalComposition::new(self, traversal)
    }
}

impl<C, S, A, P> PrismComposeExtension<C, S, A> for P where P: Prism<C, S, A> {}

/// Extension trait for composing a Traversal with a Lens or a Prism.
pub trait TraversalComposeExtension<C, S, A>: Traversal<C, S, A> {
    /// Composes this traversal with a lens. Traversal ∘ Lens is a Traversal.
    fn compose_lens<B, L>(self, lens: L) -> TraversalLensComposition<Self, L, A>
    where
        Self: Sized,
        L: Lens<C, A, B, Error = Self::Error>,
    {
        TraversalLensComposition::new(self, lens)
    }

    /// Composes this traversal with a prism. Traversal ∘ Prism is a Traversal.
    fn compose_prism<B, P>(self, prism: P) -> TraversalPrismComposition<Self, P, A>
    where
        Self: Sized,
        P: Prism<C, A, B, Error = Self::Error>,
    {
        TraversalPrismComposition::new(self, prism)
    }
}

impl<C, S, A, T> TraversalComposeExtension<C, S, A> for T where T: Traversal<C, S, A> {}

// =============================================================================
// Free composition functions
// =============================================================================

/// Lens ∘ Lens = Lens.
pub fn compose_lens_lens<C, S, A, B, L1, L2>(outer: L1, inner: L2) -> ComposedLens<L1, L2, A>
where
    L1: Lens<C, S, A>,
    L2: Lens<C, A, B, Error = L1::Error>,
{
    ComposedLens::new(outer, inner)
}

/// Lens ∘ Prism = Prism.
pub fn compose_lens_prism<C, S, A, B, L, P>(
    outer: L,
    inner: P,
) -> LensPrismComposition<L, P, A, S>
where
    L: Lens<C, S, A>,
    P: Prism<C, A, B, Error = L::Error>,
    S: Default,
{
    LensPrismComposition::new(outer, inner)
}

/// Lens ∘ Traversal = Traversal.
pub fn compose_lens_traversal<C, S, A, B, L, T>(
    outer: L,
    inner: T,
) -> LensTraversalComposition<L, T, A>
where
    L: Lens<C, S, A>,
    T: Traversal<C, A, B, Error = L::Error>,
{
    LensTraversalComposition::new(outer, inner)
}

/// Prism ∘ Lens = Prism.
pub fn compose_prism_lens<C, S, A, B, P, L>(outer: P, inner: L) -> PrismLensComposition<P, L, A>
where
    P: Prism<C, S, A>,
    L: Lens<C, A, B, Error = P::Error>,
    A: Default,
{
    PrismLensComposition::new(outer, inner)
}

/// Prism ∘ Prism = Prism.
pub fn compose_prism_prism<C, S, A, B, P1, P2>(outer: P1, inner: P2) -> ComposedPrism<P1, P2, A>
where
    P1: Prism<C, S, A>,
    P2: Prism<C, A, B, Error = P1::Error>,
{
    ComposedPrism::new(outer, inner)
}

/// Prism ∘ Traversal = Traversal.
pub fn compose_prism_traversal<C, S, A, B, P, T>(
    outer: P,
    inner: T,
) -> PrismTraversalComposition<P, T, A>
where
    P: Prism<C, S, A>,
    T: Traversal<C, A, B, Error = P::Error>,
{
    PrismTraversalComposition::new(outer, inner)
}

/// Traversal ∘ Lens = Traversal.
pub fn compose_traversal_lens<C, S, A, B, T, L>(
    outer: T,
    inner: L,
) -> TraversalLensComposition<T, L, A>
where
    T: Traversal<C, S, A>,
    L: Lens<C, A, B, Error = T::Error>,
{
    TraversalLensComposition::new(outer, inner)
}

/// Traversal ∘ Prism = Traversal.
pub fn compose_traversal_prism<C, S, A, B, T, P>(
    outer: T,
    inner: P,
) -> TraversalPrismComposition<T, P, A>
where
    T: Traversal<C, S, A>,
    P: Prism<C, A, B, Error = T::Error>,
{
    TraversalPrismComposition::new(outer, inner)
}

/// Traversal ∘ Traversal = Traversal.
pub fn compose_traversal_traversal<C, S, A, B, T1, T2>(
    outer: T1,
    inner: T2,
) -> ComposedTraversal<T1, T2, A>
where
    T1: Traversal<C, S, A>,
    T2: Traversal<C, A, B, Error = T1::Error>,
{
    ComposedTraversal::new(outer, inner)
}
