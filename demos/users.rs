//! Walks a list of users and bumps every known age by one.
//!
//! Run with `RUST_LOG=contextual_optics=trace` to see the prism skip the
//! users whose age is unknown.

use std::sync::atomic::{AtomicBool, Ordering};

use contextual_optics::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone, Debug, Lenses)]
struct User {
    name: String,
    age: Option<i32>,
}

/// Request-scoped values handed to every transform.
struct Request {
    increment: i32,
    cancelled: AtomicBool,
}

fn main() -> Result<(), OpticError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "users=info,contextual_optics=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let users = vec![
        User {
            name: "alice".to_string(),
            age: Some(30),
        },
        User {
            name: "bob".to_string(),
            age: Some(40),
        },
        User {
            name: "carol".to_string(),
            age: None,
        },
    ];

    let each_user: EachTraversal<Request, User> = EachTraversal::new();
    let known_ages = each_user
        .compose_lens(User::age_lens())
        .compose_prism(NullablePrism::new());

    let request = Request {
        increment: 1,
        cancelled: AtomicBool::new(false),
    };

    tracing::info!(known = known_ages.length(&request, users.clone())?, "counted known ages");

    let older = known_ages.modify(&request, users.clone(), |request, age| {
        if request.cancelled.load(Ordering::Relaxed) {
            return Err(OpticError::Cancelled);
        }
        Ok(age + request.increment)
    })?;

    for (before, after) in users.iter().zip(&older) {
        tracing::info!(name = %after.name, before = ?before.age, after = ?after.age, "birthday");
    }

    request.cancelled.store(true, Ordering::Relaxed);
    match known_ages.modify(&request, users, |request, age| {
        if request.cancelled.load(Ordering::Relaxed) {
            return Err(OpticError::Cancelled);
        }
        Ok(age + request.increment)
    }) {
        Ok(_) => tracing::warn!("cancelled request still completed"),
        Err(error) => tracing::info!(%error, "cancelled request aborted"),
    }

    Ok(())
}
