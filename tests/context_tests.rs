#![cfg(feature = "standard")]
//! Tests for context threading.
//!
//! The context is caller-owned and read-only: every optic hands the same
//! reference to each user-supplied function, and a context that signals
//! cancellation stops a walk through the ordinary error path.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use contextual_optics::error::OpticError;
use contextual_optics::optics::{
    EachTraversal, FunctionLens, FunctionPrism, Lens, LensComposeExtension, NullablePrism, Prism,
    Traversal, TraversalComposeExtension,
};
use rstest::rstest;

/// A request-scoped context carrying a cancellation flag.
struct RequestContext {
    request_id: u64,
    cancelled: AtomicBool,
    visited: AtomicUsize,
}

impl RequestContext {
    fn new(request_id: u64) -> Self {
        Self {
            request_id,
            cancelled: AtomicBool::new(false),
            visited: AtomicUsize::new(0),
        }
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), OpticError> {
        if self.cancelled.load(Ordering::SeqCst) {
            Err(OpticError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
struct Ticket {
    owner: Option<String>,
    notes: Vec<String>,
}

/// A lens that refuses to run once the context is cancelled.
fn notes() -> impl Lens<RequestContext, Ticket, Vec<String>, Error = OpticError> + Clone {
    FunctionLens::new(
        |context: &RequestContext, ticket: &Ticket| {
            context.check()?;
            Ok(ticket.notes.clone())
        },
        |context: &RequestContext, ticket: Ticket, notes: Vec<String>| {
            context.check()?;
            Ok(Ticket { notes, ..ticket })
        },
    )
}

fn owner() -> impl Lens<RequestContext, Ticket, Option<String>, Error = OpticError> + Clone {
    FunctionLens::new(
        |_: &RequestContext, ticket: &Ticket| Ok(ticket.owner.clone()),
        |_: &RequestContext, ticket: Ticket, owner: Option<String>| Ok(Ticket { owner, ..ticket }),
    )
}

fn ticket() -> Ticket {
    Ticket {
        owner: Some("ann".to_string()),
        notes: vec!["first".to_string(), "second".to_string(), "third".to_string()],
    }
}

// =============================================================================
// Pass-through
// =============================================================================

#[rstest]
fn test_context_reaches_transform_unchanged() {
    let context = RequestContext::new(42);
    let every_note = notes().compose_traversal(EachTraversal::new());

    let tagged = every_note
        .modify(&context, ticket(), |context, note: String| {
            Ok(format!("{note}#{}", context.request_id))
        })
        .unwrap();

    assert_eq!(tagged.notes, vec!["first#42", "second#42", "third#42"]);
}

#[rstest]
fn test_context_reaches_prism_functions() {
    let seen = AtomicUsize::new(0);
    let even = FunctionPrism::new(
        |limit: &i32, number: &i32| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok::<_, OpticError>((*number <= *limit && number % 2 == 0).then_some(*number))
        },
        |_: &i32, number: i32| Ok(number),
    );

    assert_eq!(even.preview(&10, &4), Ok(Some(4)));
    assert_eq!(even.preview(&2, &4), Ok(None));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Cancellation
// =============================================================================

#[rstest]
fn test_cancelled_context_fails_lens() {
    let context = RequestContext::new(1);
    context.cancel();
    assert_eq!(notes().view(&context, &ticket()), Err(OpticError::Cancelled));
}

#[rstest]
fn test_cancellation_halts_traversal() {
    let context = RequestContext::new(7);
    let every_note: EachTraversal<RequestContext, String> = EachTraversal::new();

    let result = every_note.modify(&context, ticket().notes, |context, note| {
        context.check()?;
        if context.visited.fetch_add(1, Ordering::SeqCst) == 0 {
            context.cancel();
        }
        Ok(note.to_uppercase())
    });

    assert_eq!(result, Err(OpticError::Cancelled));
    assert_eq!(context.visited.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_cancellation_through_composed_prism() {
    let context = RequestContext::new(3);
    let present_owner = owner().compose_prism(NullablePrism::new());
    context.cancel();

    assert_eq!(
        present_owner.modify(&context, ticket(), |context, name: String| {
            context.check()?;
            Ok(name)
        }),
        Err(OpticError::Cancelled)
    );
    let unowned = Ticket {
        owner: None,
        ..ticket()
    };
    assert_eq!(
        present_owner.modify(&context, unowned.clone(), |context, name: String| {
            context.check()?;
            Ok(name)
        }),
        Ok(unowned)
    );
}

// =============================================================================
// Concurrency
// =============================================================================

#[rstest]
fn test_shared_optic_across_threads() {
    let each_then_present: EachTraversal<(), Option<i32>> = EachTraversal::new();
    let optic = each_then_present.compose_prism(NullablePrism::new());

    let results: Vec<Result<Vec<Option<i32>>, OpticError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|offset| {
                let optic = &optic;
                scope.spawn(move || {
                    optic.modify(&(), vec![Some(offset), None, Some(offset * 10)], |_, n| {
                        Ok(n + 1)
                    })
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (offset, result) in (0..4).zip(results) {
        assert_eq!(result, Ok(vec![Some(offset + 1), None, Some(offset * 10 + 1)]));
    }
}

#[rstest]
fn test_shared_context_across_threads() {
    let context = RequestContext::new(9);
    let every_note = notes().compose_traversal(EachTraversal::new());

    thread::scope(|scope| {
        for _ in 0..3 {
            scope.spawn(|| {
                every_note
                    .modify(&context, ticket(), |context, note: String| {
                        context.visited.fetch_add(1, Ordering::SeqCst);
                        Ok(note)
                    })
                    .unwrap()
            });
        }
    });

    assert_eq!(context.visited.load(Ordering::SeqCst), 9);
}
