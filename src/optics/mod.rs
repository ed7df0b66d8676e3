//! Contextual, fallible optics.
//!
//! Optics are composable accessors for immutable data. Every optic here takes
//! a caller context `C` (passed as `&C` and handed untouched to every
//! user-supplied function) and reports failures through its `Error` type.
//!
//! # Optics Hierarchy
//!
//! ```text
//! Lens      exactly one focus    (strongest)
//! Prism     zero or one focus
//! Traversal zero or more foci    (weakest)
//! ```
//!
//! Composition follows the same lattice: the result is the weakest kind of the
//! two operands. See [`optics_compose`] for the full table.
//!
//! # Available Optics
//!
//! - [`Lens`]: Focus on exactly one part (`view`/`update`/`over`)
//! - [`Prism`]: Focus on a variant that may be absent (`preview`/`extract`/`build`)
//! - [`Traversal`]: Focus on zero or more parts (`modify`)
//!
//! # Example
//!
//! ```
//! use contextual_optics::error::OpticError;
//! use contextual_optics::optics::{Lens, LensComposeExtension, Prism};
//! use contextual_optics::{lens, prism};
//!
//! #[derive(Clone, PartialEq, Debug, Default)]
//! enum Payment { Card(String), #[default] Cash }
//!
//! #[derive(Clone, PartialEq, Debug, Default)]
//! struct Order { id: u32, payment: Payment }
//!
//! let card = lens!(Order, payment, (), OpticError).compose_prism(prism!(Payment, Card));
//!
//! let order = Order { id: 7, payment: Payment::Card("4242".to_string()) };
//! assert_eq!(card.preview(&(), &order), Ok(Some("4242".to_string())));
//!
//! let masked = card.modify(&(), order, |_, number| Ok(format!("**{}", &number[2..]))).unwrap();
//! assert_eq!(masked.payment, Payment::Card("**42".to_string()));
//! assert_eq!(masked.id, 7);
//!
//! let cash = Order { id: 8, payment: Payment::Cash };
//! assert_eq!(card.modify(&(), cash.clone(), |_, n| Ok(n)), Ok(cash));
//! ```
//!
//! # Lens Laws
//!
//! 1. **ViewUpdate Law**: `lens.update(c, s, lens.view(c, &s)?) == s`
//! 2. **UpdateView Law**: `lens.view(c, &lens.update(c, s, a)?) == a`
//! 3. **UpdateUpdate Law**: `lens.update(c, lens.update(c, s, a1)?, a2) == lens.update(c, s, a2)`
//!
//! # Prism Laws
//!
//! 1. **MatchBuild Law**: `prism.preview(c, &prism.build(c, a)?) == Ok(Some(a))`
//! 2. **BuildMatch Law**: if `prism.preview(c, &s)? == Some(a)` then `prism.build(c, a)? == s`
//!
//! # Traversal Laws
//!
//! 1. **Identity Law**: `traversal.modify(c, s, |_, x| Ok(x)) == Ok(s)`
//! 2. **Fusion Law**: two passes with `g` then `f` equal one pass with `f ∘ g`

mod lens;
pub mod optics_compose;
mod prism;
#[cfg(feature = "standard")]
mod standard_optics;
mod traversal;

// Re-export all lens-related types and traits
pub use lens::ComposedLens;
pub use lens::FunctionLens;
pub use lens::Lens;
pub use lens::LensAsTraversal;

// Re-export all prism-related types and traits
pub use prism::ComposedPrism;
pub use prism::FunctionPrism;
pub use prism::Prism;
pub use prism::PrismAsTraversal;

// Re-export all traversal-related types and traits
pub use traversal::ComposedTraversal;
pub use traversal::FunctionTraversal;
pub use traversal::Traversal;

// Re-export cross-kind composition
pub use optics_compose::LensComposeExtension;
pub use optics_compose::LensPrismComposition;
pub use optics_compose::LensTraversalComposition;
pub use optics_compose::PrismComposeExtension;
pub use optics_compose::PrismLensComposition;
pub use optics_compose::PrismTraversalComposition;
pub use optics_compose::TraversalComposeExtension;
pub use optics_compose::TraversalLensComposition;
pub use optics_compose::TraversalPrismComposition;

// Re-export standard optics
#[cfg(feature = "standard")]
pub use standard_optics::{
    EachTraversal, IndexLens, KeyLens, NullablePrism, each, index, key, nullable,
};
