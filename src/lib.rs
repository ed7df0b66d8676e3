//! # contextual-optics
//!
//! Composable, context-aware and fallible optics for Rust.
//!
//! ## Overview
//!
//! Optics describe, once, how to reach a part `A` of a larger value `S`, and
//! compose those descriptions to reach deeply nested or branching data:
//!
//! - **Lens**: total accessor with exactly one focus
//! - **Prism**: partial accessor for a variant that may be absent
//! - **Traversal**: accessor over zero or more foci
//!
//! Every operation receives a caller context `C` that is passed through
//! untouched to every user-supplied function, and every optic may fail with
//! its own `Error` type. "No match" from a prism is kept apart from failure
//! through any depth of composition.
//!
//! ## Feature Flags
//!
//! - `standard`: Ready-made optics for `Vec`, `HashMap` and `Option`
//! - `derive`: `#[derive(Lenses)]` and `#[derive(Prisms)]`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use contextual_optics::prelude::*;
//! use contextual_optics::lens;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User { name: String, age: Option<u32> }
//!
//! let ages = each::<(), User, OpticError>()
//!     .compose_lens(lens!(User, age))
//!     .compose_prism(nullable());
//!
//! let users = vec![
//!     User { name: "a".to_string(), age: Some(30) },
//!     User { name: "b".to_string(), age: Some(40) },
//!     User { name: "c".to_string(), age: None },
//! ];
//! let users = ages.modify(&(), users, |_, age| Ok(age + 1)).unwrap();
//! let result: Vec<_> = users.iter().map(|user| user.age).collect();
//! assert_eq!(result, vec![Some(31), Some(41), None]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the optic traits, the composition extension traits and the
/// error types.
///
/// # Usage
///
/// ```rust
/// use contextual_optics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MatchError, OpticError};
    pub use crate::optics::*;

    #[cfg(feature = "derive")]
    pub use crate::{Lenses, Prisms};
}

pub mod error;
pub mod optics;

#[cfg(feature = "derive")]
pub use contextual_optics_derive::{Lenses, Prisms};
