//! Ready-made optics for the standard containers.
//!
//! - [`IndexLens`]: a position in a `Vec`, failing with
//!   [`OpticError::IndexOutOfRange`] outside `0..len`
//! - [`KeyLens`]: a key in a `HashMap`; an absent key views as `V::default()`
//! - [`NullablePrism`]: the value inside an `Option`, no match on `None`
//! - [`EachTraversal`]: every element of a `Vec`, in ascending index order
//!
//! Each type is generic over its error `E`, which defaults to [`OpticError`]
//! and only needs `From<OpticError>` where a structural failure can occur.
//! None of them reads the context.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use contextual_optics::optics::{Lens, KeyLens};
//!
//! let mut inner = HashMap::new();
//! inner.insert("bar".to_string(), 1);
//! let mut outer = HashMap::new();
//! outer.insert("foo".to_string(), inner);
//!
//! let foo: KeyLens<(), String, HashMap<String, i32>> = KeyLens::new("foo".to_string());
//! let bar = foo.compose(KeyLens::new("bar".to_string()));
//!
//! let updated = bar.over(&(), outer.clone(), |_, n| Ok(n + 1)).unwrap();
//! assert_eq!(updated["foo"]["bar"], 2);
//! assert_eq!(outer["foo"]["bar"], 1);
//! ```

use std::collections::HashMap;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::OpticError;
use crate::optics::{Lens, Prism, Traversal};

// =============================================================================
// IndexLens
// =============================================================================

/// A Lens on the element at a fixed position of a `Vec<A>`.
///
/// Out-of-range positions are a structural error, never a silent no-op.
///
/// # Example
///
/// ```
/// use contextual_optics::error::OpticError;
/// use contextual_optics::optics::{IndexLens, Lens};
///
/// let second: IndexLens<(), char> = IndexLens::new(1);
/// assert_eq!(second.view(&(), &vec!['a', 'b']), Ok('b'));
/// assert_eq!(
///     second.view(&(), &vec!['a']),
///     Err(OpticError::IndexOutOfRange { index: 1, length: 1 })
/// );
/// ```
pub struct IndexLens<C, A, E = OpticError> {
    index: usize,
    _marker: PhantomData<fn(&C) -> (A, E)>,
}

impl<C, A, E> IndexLens<C, A, E> {
    /// Creates a lens on the element at `index`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the focused position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    fn out_of_range(&self, length: usize) -> E
    where
        E: From<OpticError>,
    {
        E::from(OpticError::IndexOutOfRange {
            index: self.index,
            length,
        })
    }
}

impl<C, A, E> Lens<C, Vec<A>, A> for IndexLens<C, A, E>
where
    A: Clone,
    E: From<OpticError>,
{
    type Error = E;

    fn view(&self, _context: &C, source: &Vec<A>) -> Result<A, E> {
        source
            .get(self.index)
            .cloned()
            .ok_or_else(|| self.out_of_range(source.len()))
    }

    fn update(&self, _context: &C, mut source: Vec<A>, value: A) -> Result<Vec<A>, E> {
        match source.get_mut(self.index) {
            Some(slot) => {
                *slot = value;
                Ok(source)
            }
            None => Err(self.out_of_range(source.len())),
        }
    }

    fn over<F>(&self, context: &C, mut source: Vec<A>, function: F) -> Result<Vec<A>, E>
    where
        F: FnOnce(&C, A) -> Result<A, E>,
    {
        let length = source.len();
        let Some(slot) = source.get_mut(self.index) else {
            return Err(self.out_of_range(length));
        };
        *slot = function(context, slot.clone())?;
        Ok(source)
    }
}

// =============================================================================
// KeyLens
// =============================================================================

/// A Lens on the value stored under a fixed key of a `HashMap<K, V>`.
///
/// A missing key is present-with-default: `view` returns `V::default()` and
/// `update` inserts the key.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use contextual_optics::optics::{KeyLens, Lens};
///
/// let hits: KeyLens<(), &str, u32> = KeyLens::new("hits");
/// assert_eq!(hits.view(&(), &HashMap::new()), Ok(0));
///
/// let counted = hits.over(&(), HashMap::new(), |_, n| Ok(n + 1)).unwrap();
/// assert_eq!(counted.get("hits"), Some(&1));
/// ```
pub struct KeyLens<C, K, V, E = OpticError> {
    key: K,
    _marker: PhantomData<fn(&C) -> (V, E)>,
}

impl<C, K, V, E> KeyLens<C, K, V, E> {
    /// Creates a lens on the value under `key`.
    #[must_use]
    pub const fn new(key: K) -> Self {
        Self {
            key,
            _marker: PhantomData,
        }
    }

    /// Returns the focused key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<C, K, V, E> Lens<C, HashMap<K, V>, V> for KeyLens<C, K, V, E>
where
    K: Eq + Hash + Clone,
    V: Clone + Default,
{
    type Error = E;

    fn view(&self, _context: &C, source: &HashMap<K, V>) -> Result<V, E> {
        Ok(source.get(&self.key).cloned().unwrap_or_default())
    }

    fn update(&self, _context: &C, mut source: HashMap<K, V>, value: V) -> Result<HashMap<K, V>, E> {
        source.insert(self.key.clone(), value);
        Ok(source)
    }
}

// =============================================================================
// NullablePrism
// =============================================================================

/// A Prism on the value inside an `Option<A>`.
///
/// `None` is the no-match case; `build` always produces `Some`.
///
/// # Example
///
/// ```
/// use contextual_optics::optics::{NullablePrism, Prism};
///
/// let present: NullablePrism<(), i32> = NullablePrism::new();
/// assert_eq!(present.preview(&(), &Some(3)), Ok(Some(3)));
/// assert_eq!(present.preview(&(), &None), Ok(None));
/// assert_eq!(present.modify(&(), None, |_, n| Ok(n + 1)), Ok(None));
/// ```
pub struct NullablePrism<C, A, E = OpticError> {
    _marker: PhantomData<fn(&C) -> (A, E)>,
}

impl<C, A, E> NullablePrism<C, A, E> {
    /// Creates a new `NullablePrism`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C, A, E> Prism<C, Option<A>, A> for NullablePrism<C, A, E>
where
    A: Clone,
{
    type Error = E;

    fn preview(&self, _context: &C, source: &Option<A>) -> Result<Option<A>, E> {
        Ok(source.clone())
    }

    fn build(&self, _context: &C, value: A) -> Result<Option<A>, E> {
        Ok(Some(value))
    }

    fn modify<F>(&self, context: &C, source: Option<A>, function: F) -> Result<Option<A>, E>
    where
        F: FnOnce(&C, A) -> Result<A, E>,
    {
        match source {
            Some(value) => function(context, value).map(Some),
            None => {
                tracing::trace!("nullable prism found no value, source left unchanged");
                Ok(None)
            }
        }
    }
}

// =============================================================================
// EachTraversal
// =============================================================================

/// A Traversal over every element of a `Vec<A>`, in ascending index order.
///
/// An empty vector has zero foci and is returned unchanged.
///
/// # Example
///
/// ```
/// use contextual_optics::optics::{EachTraversal, Traversal};
///
/// let each: EachTraversal<(), i32> = EachTraversal::new();
/// assert_eq!(each.modify(&(), vec![1, 2, 3], |_, n| Ok(n * 2)), Ok(vec![2, 4, 6]));
/// assert_eq!(each.modify(&(), vec![], |_, n| Ok(n * 2)), Ok(vec![]));
/// ```
pub struct EachTraversal<C, A, E = OpticError> {
    _marker: PhantomData<fn(&C) -> (A, E)>,
}

impl<C, A, E> EachTraversal<C, A, E> {
    /// Creates a new `EachTraversal`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<C, A, E> Traversal<C, Vec<A>, A> for EachTraversal<C, A, E> {
    type Error = E;

    fn modify<F>(&self, context: &C, source: Vec<A>, mut function: F) -> Result<Vec<A>, E>
    where
        F: FnMut(&C, A) -> Result<A, E>,
    {
        let length = source.len();
        source
            .into_iter()
            .enumerate()
            .map(|(position, element)| {
                function(context, element).inspect_err(|_| {
                    tracing::debug!(position, length, "each traversal aborted by transform");
                })
            })
            .collect()
    }
}

// =============================================================================
// Shorthand constructors
// =============================================================================

/// Shorthand for [`IndexLens::new`].
#[must_use]
pub const fn index<C, A, E>(position: usize) -> IndexLens<C, A, E> {
    IndexLens::new(position)
}

/// Shorthand for [`KeyLens::new`].
#[must_use]
pub const fn key<C, K, V, E>(key: K) -> KeyLens<C, K, V, E> {
    KeyLens::new(key)
}

/// Shorthand for [`NullablePrism::new`].
#[must_use]
pub const fn nullable<C, A, E>() -> NullablePrism<C, A, E> {
    NullablePrism::new()
}

/// Shorthand for [`EachTraversal::new`].
#[must_use]
pub const fn each<C, A, E>() -> EachTraversal<C, A, E> {
    EachTraversal::new()
}

// =============================================================================
// Trait boilerplate
// =============================================================================

impl<C, A, E> Clone for IndexLens<C, A, E> {
    fn clone(&self) -> Self {
        Self::new(self.index)
    }
}

impl<C, A, E> std::fmt::Debug for IndexLens<C, A, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("IndexLens")
            .field("index", &self.index)
            .finish()
    }
}

impl<C, K: Clone, V, E> Clone for KeyLens<C, K, V, E> {
    fn clone(&self) -> Self {
        Self::new(self.key.clone())
    }
}

impl<C, K: std::fmt::Debug, V, E> std::fmt::Debug for KeyLens<C, K, V, E> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("KeyLens")
            .field("key", &self.key)
            .finish()
    }
}

macro_rules! impl_stateless_boilerplate {
    ($name:ident) => {
        impl<C, A, E> Clone for $name<C, A, E> {
            fn clone(&self) -> Self {
                Self::new()
            }
        }

        impl<C, A, E> Default for $name<C, A, E> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<C, A, E> std::fmt::Debug for $name<C, A, E> {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(stringify!($name))
            }
        }
    };
}

impl_stateless_boilerplate!(NullablePrism);
impl_stateless_boilerplate!(EachTraversal);

static_assertions::assert_impl_all!(IndexLens<(), String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(KeyLens<(), String, i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(NullablePrism<(), String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(EachTraversal<(), String>: Send, Sync, Clone);
