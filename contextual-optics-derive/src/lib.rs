//! Derive macros for contextual-optics.
//!
//! This crate generates function-backed optics for user types. The generated
//! methods are generic over the context type and the error type, so the same
//! accessor can be composed into any context.
//!
//! # Available Derive Macros
//!
//! - [`Lenses`]: Generates lens methods for struct fields
//! - [`Prisms`]: Generates prism methods for enum variants
//!
//! # Example: Lenses
//!
//! ```rust,ignore
//! use contextual_optics::Lenses;
//! use contextual_optics::error::OpticError;
//! use contextual_optics::optics::Lens;
//!
//! #[derive(Clone, Lenses)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! // Generated methods:
//! // - Point::x_lens::<C, E>() -> impl Lens<C, Point, i32, Error = E>
//! // - Point::y_lens::<C, E>() -> impl Lens<C, Point, i32, Error = E>
//!
//! let x_lens = Point::x_lens::<(), OpticError>();
//! assert_eq!(x_lens.view(&(), &Point { x: 10, y: 20 }), Ok(10));
//! ```
//!
//! # Example: Prisms
//!
//! ```rust,ignore
//! use contextual_optics::Prisms;
//! use contextual_optics::error::OpticError;
//! use contextual_optics::optics::Prism;
//!
//! #[derive(Clone, Prisms)]
//! enum Shape {
//!     Circle(f64),
//!     Rectangle(f64, f64),
//! }
//!
//! // Generated methods:
//! // - Shape::circle_prism::<C, E>() -> impl Prism<C, Shape, f64, Error = E>
//! // - Shape::rectangle_prism::<C, E>() -> impl Prism<C, Shape, (f64, f64), Error = E>
//!
//! let circle = Shape::circle_prism::<(), OpticError>();
//! assert_eq!(circle.preview(&(), &Shape::Circle(5.0)), Ok(Some(5.0)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod lenses;
mod prisms;

use proc_macro::TokenStream;

/// Derive macro for generating lenses for struct fields.
///
/// For each named field `foo: T` this generates:
///
/// ```rust,ignore
/// impl StructName {
///     pub fn foo_lens<C, E>() -> impl Lens<C, StructName, T, Error = E> + Clone { ... }
/// }
/// ```
///
/// `view` clones the field and `update` assigns it in place, so every field
/// type must implement `Clone`. Neither ever fails.
///
/// # Requirements
///
/// - The struct must have named fields (not a tuple or unit struct)
///
/// # Generics
///
/// Generic structs are supported; call the method on the concrete type:
///
/// ```rust,ignore
/// #[derive(Clone, Lenses)]
/// struct Container<T> {
///     value: T,
/// }
///
/// let lens = Container::<i32>::value_lens::<(), OpticError>();
/// assert_eq!(lens.view(&(), &Container { value: 42 }), Ok(42));
/// ```
#[proc_macro_derive(Lenses)]
pub fn derive_lenses(input: TokenStream) -> TokenStream {
    lenses::derive_lenses_impl(input)
}

/// Derive macro for generating prisms for enum variants.
///
/// For each variant this generates a `{variant_name_snake_case}_prism::<C, E>()`
/// method. The focus type depends on the variant's shape:
///
/// - **Unit variants** (e.g., `Empty`): `()`
/// - **Single-field tuple variants** (e.g., `Some(T)`): `T`
/// - **Multi-field tuple variants** (e.g., `Point(i32, i32)`): `(i32, i32)`
/// - **Struct variants** (e.g., `Click { x: i32, y: i32 }`): `(i32, i32)` in
///   field order
///
/// `preview` clones the fields into the focus and reports `Ok(None)` for any
/// other variant; `build` always succeeds.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Debug, PartialEq, Prisms)]
/// enum Event {
///     Click { x: i32, y: i32 },
///     Quit,
/// }
///
/// let click = Event::click_prism::<(), OpticError>();
/// assert_eq!(click.preview(&(), &Event::Click { x: 1, y: 2 }), Ok(Some((1, 2))));
/// assert_eq!(click.preview(&(), &Event::Quit), Ok(None));
/// assert_eq!(click.build(&(), (3, 4)), Ok(Event::Click { x: 3, y: 4 }));
/// ```
#[proc_macro_derive(Prisms)]
pub fn derive_prisms(input: TokenStream) -> TokenStream {
    prisms::derive_prisms_impl(input)
}
