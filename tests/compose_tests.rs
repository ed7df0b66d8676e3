#![cfg(feature = "standard")]
//! Tests for the nine composition operators.
//!
//! Each operator is checked for its resulting kind, for threading values back
//! through the outer optic, and for keeping "no match" apart from failures.

use std::cell::Cell;

use contextual_optics::error::{MatchError, OpticError};
use contextual_optics::optics::optics_compose::{
    compose_lens_lens, compose_lens_prism, compose_lens_traversal, compose_prism_lens,
    compose_prism_prism, compose_prism_traversal, compose_traversal_lens, compose_traversal_prism,
    compose_traversal_traversal,
};
use contextual_optics::optics::{
    EachTraversal, IndexLens, Lens, LensComposeExtension, NullablePrism, Prism,
    PrismComposeExtension, Traversal, TraversalComposeExtension,
};
use contextual_optics::{lens, prism};
use rstest::rstest;

// =============================================================================
// Test Structures
// =============================================================================

#[derive(Clone, PartialEq, Debug, Default)]
struct Mailbox {
    user: String,
    domain: String,
}

#[derive(Clone, PartialEq, Debug, Default)]
enum Contact {
    Email(Mailbox),
    Phone(String),
    #[default]
    Unlisted,
}

#[derive(Clone, PartialEq, Debug, Default)]
struct Person {
    name: String,
    age: Option<u32>,
    contact: Contact,
}

#[derive(Clone, PartialEq, Debug, Default)]
struct Company {
    ceo: Person,
    staff: Vec<Person>,
}

fn person(name: &str, age: Option<u32>, contact: Contact) -> Person {
    Person {
        name: name.to_string(),
        age,
        contact,
    }
}

fn email(user: &str, domain: &str) -> Contact {
    Contact::Email(Mailbox {
        user: user.to_string(),
        domain: domain.to_string(),
    })
}

fn company() -> Company {
    Company {
        ceo: person("ada", Some(50), email("ada", "example.com")),
        staff: vec![
            person("bob", Some(30), Contact::Phone("555".to_string())),
            person("cyd", None, email("cyd", "example.org")),
        ],
    }
}

// =============================================================================
// Optics
// =============================================================================

fn ceo() -> impl Lens<(), Company, Person, Error = OpticError> + Clone {
    lens!(Company, ceo, (), OpticError)
}

fn staff() -> impl Lens<(), Company, Vec<Person>, Error = OpticError> + Clone {
    lens!(Company, staff, (), OpticError)
}

fn name() -> impl Lens<(), Person, String, Error = OpticError> + Clone {
    lens!(Person, name, (), OpticError)
}

fn age() -> impl Lens<(), Person, Option<u32>, Error = OpticError> + Clone {
    lens!(Person, age, (), OpticError)
}

fn contact() -> impl Lens<(), Person, Contact, Error = OpticError> + Clone {
    lens!(Person, contact, (), OpticError)
}

fn domain() -> impl Lens<(), Mailbox, String, Error = OpticError> + Clone {
    lens!(Mailbox, domain, (), OpticError)
}

fn email_prism() -> impl Prism<(), Contact, Mailbox, Error = OpticError> + Clone {
    prism!(Contact, Email, (), OpticError)
}

fn people() -> EachTraversal<(), Person> {
    EachTraversal::new()
}

fn numbers() -> EachTraversal<(), i32> {
    EachTraversal::new()
}

// =============================================================================
// Lens ∘ Lens = Lens
// =============================================================================

#[rstest]
fn test_lens_lens_view_and_update() {
    let ceo_name = compose_lens_lens(ceo(), name());
    assert_eq!(ceo_name.view(&(), &company()), Ok("ada".to_string()));

    let renamed = ceo_name.update(&(), company(), "eve".to_string()).unwrap();
    assert_eq!(renamed.ceo.name, "eve");
    assert_eq!(renamed.ceo.age, Some(50));
    assert_eq!(renamed.staff, company().staff);
}

// =============================================================================
// Lens ∘ Prism = Prism
// =============================================================================

#[rstest]
fn test_lens_prism_preview() {
    let known_age = compose_lens_prism(age(), NullablePrism::new());
    assert_eq!(
        known_age.preview(&(), &person("x", Some(4), Contact::Unlisted)),
        Ok(Some(4))
    );
    assert_eq!(
        known_age.preview(&(), &person("x", None, Contact::Unlisted)),
        Ok(None)
    );
}

#[rstest]
fn test_lens_prism_build_starts_from_default() {
    let known_age = age().compose_prism(NullablePrism::new());
    assert_eq!(
        known_age.build(&(), 9),
        Ok(Person {
            age: Some(9),
            ..Person::default()
        })
    );
}

#[rstest]
fn test_lens_prism_modify_keeps_siblings() {
    let known_age = age().compose_prism(NullablePrism::new());
    let older = known_age
        .modify(&(), person("x", Some(4), email("x", "y")), |_, age| Ok(age + 1))
        .unwrap();
    assert_eq!(older, person("x", Some(5), email("x", "y")));
}

// =============================================================================
// Lens ∘ Traversal = Traversal
// =============================================================================

#[rstest]
fn test_lens_traversal_modify() {
    let everyone = compose_lens_traversal(staff(), people());
    let renamed = everyone
        .modify(&(), company(), |_, mut member| {
            member.name = member.name.to_uppercase();
            Ok(member)
        })
        .unwrap();
    let names: Vec<_> = renamed.staff.iter().map(|member| member.name.as_str()).collect();
    assert_eq!(names, vec!["BOB", "CYD"]);
    assert_eq!(renamed.ceo.name, "ada");
}

// =============================================================================
// Prism ∘ Lens = Prism
// =============================================================================

#[rstest]
fn test_prism_lens_preview() {
    let email_domain = compose_prism_lens(email_prism(), domain());
    assert_eq!(
        email_domain.preview(&(), &email("a", "example.com")),
        Ok(Some("example.com".to_string()))
    );
    assert_eq!(
        email_domain.preview(&(), &Contact::Phone("1".to_string())),
        Ok(None)
    );
}

#[rstest]
fn test_prism_lens_build_uses_default_inner() {
    let email_domain = email_prism().compose_lens(domain());
    assert_eq!(
        email_domain.build(&(), "example.net".to_string()),
        Ok(Contact::Email(Mailbox {
            user: String::new(),
            domain: "example.net".to_string(),
        }))
    );
}

#[rstest]
fn test_prism_lens_modify_keeps_other_fields_of_focus() {
    let email_domain = email_prism().compose_lens(domain());
    let moved = email_domain
        .modify(&(), email("a", "old.com"), |_, _| Ok("new.com".to_string()))
        .unwrap();
    assert_eq!(moved, email("a", "new.com"));
}

// =============================================================================
// Sources and foci without Default
// =============================================================================

#[derive(Clone, PartialEq, Debug)]
struct Badge {
    holder: String,
    nickname: Option<String>,
}

fn badge(holder: &str, nickname: Option<&str>) -> Badge {
    Badge {
        holder: holder.to_string(),
        nickname: nickname.map(str::to_string),
    }
}

fn blank_badge() -> Badge {
    badge("visitor", None)
}

#[rstest]
fn test_lens_prism_without_default_source() {
    let nickname = lens!(Badge, nickname, (), OpticError)
        .compose_prism_with(NullablePrism::new(), blank_badge);

    assert_eq!(
        nickname.preview(&(), &badge("ann", Some("a"))),
        Ok(Some("a".to_string()))
    );
    assert_eq!(nickname.preview(&(), &badge("ann", None)), Ok(None));
    assert_eq!(
        nickname.modify(&(), badge("ann", Some("a")), |_, name| Ok(name.to_uppercase())),
        Ok(badge("ann", Some("A")))
    );
    assert_eq!(
        nickname.build(&(), "guest".to_string()),
        Ok(badge("visitor", Some("guest")))
    );
}

#[rstest]
fn test_lens_prism_without_default_source_nests_under_traversal() {
    let badges: EachTraversal<(), Badge> = EachTraversal::new();
    let grouped_right = badges.clone().compose_prism(
        lens!(Badge, nickname, (), OpticError).compose_prism_with(NullablePrism::new(), blank_badge),
    );
    let grouped_left = badges
        .compose_lens(lens!(Badge, nickname, (), OpticError))
        .compose_prism(NullablePrism::new());
    let source = vec![badge("ann", Some("a")), badge("bo", None)];

    let shout = |_: &(), name: String| Ok(name.to_uppercase());
    assert_eq!(
        grouped_right.modify(&(), source.clone(), shout),
        grouped_left.modify(&(), source, shout)
    );
}

#[rstest]
fn test_prism_lens_without_default_focus() {
    let holder = NullablePrism::<(), Badge>::new()
        .compose_lens_with(lens!(Badge, holder, (), OpticError), blank_badge);

    assert_eq!(
        holder.preview(&(), &Some(badge("ann", Some("a")))),
        Ok(Some("ann".to_string()))
    );
    assert_eq!(holder.preview(&(), &None), Ok(None));
    assert_eq!(
        holder.modify(&(), Some(badge("ann", Some("a"))), |_, _| Ok("cy".to_string())),
        Ok(Some(badge("cy", Some("a"))))
    );
    assert_eq!(
        holder.build(&(), "dee".to_string()),
        Ok(Some(badge("dee", None)))
    );
}

// =============================================================================
// Prism ∘ Prism = Prism
// =============================================================================

#[rstest]
fn test_prism_prism() {
    let listed_email = compose_prism_prism(NullablePrism::new(), email_prism());
    let mailbox = Mailbox {
        user: "u".to_string(),
        domain: "d".to_string(),
    };
    assert_eq!(
        listed_email.preview(&(), &Some(Contact::Email(mailbox.clone()))),
        Ok(Some(mailbox.clone()))
    );
    assert_eq!(listed_email.preview(&(), &Some(Contact::Unlisted)), Ok(None));
    assert_eq!(listed_email.preview(&(), &None), Ok(None));
    assert_eq!(
        listed_email.build(&(), mailbox.clone()),
        Ok(Some(Contact::Email(mailbox)))
    );
}

// =============================================================================
// Prism ∘ Traversal = Traversal
// =============================================================================

#[rstest]
#[case(Some(vec![1, 2]), Some(vec![2, 3]))]
#[case(Some(vec![]), Some(vec![]))]
#[case(None, None)]
fn test_prism_traversal(#[case] input: Option<Vec<i32>>, #[case] expected: Option<Vec<i32>>) {
    let maybe_numbers = compose_prism_traversal(NullablePrism::new(), numbers());
    assert_eq!(maybe_numbers.modify(&(), input, |_, x| Ok(x + 1)), Ok(expected));
}

// =============================================================================
// Traversal ∘ Lens = Traversal
// =============================================================================

#[rstest]
fn test_traversal_lens() {
    let names = compose_traversal_lens(people(), name());
    assert_eq!(
        names.get_all_owned(&(), company().staff),
        Ok(vec!["bob".to_string(), "cyd".to_string()])
    );
}

// =============================================================================
// Traversal ∘ Prism = Traversal
// =============================================================================

#[rstest]
fn test_traversal_prism_skips_absent() {
    let each_age: EachTraversal<(), Option<u32>> = EachTraversal::new();
    let known = compose_traversal_prism(each_age, NullablePrism::new());
    assert_eq!(
        known.modify(&(), vec![Some(1), None, Some(3)], |_, age| Ok(age * 10)),
        Ok(vec![Some(10), None, Some(30)])
    );
    assert_eq!(known.length(&(), vec![Some(1), None, Some(3)]), Ok(2));
}

// =============================================================================
// Traversal ∘ Traversal = Traversal
// =============================================================================

#[rstest]
fn test_traversal_traversal() {
    let rows: EachTraversal<(), Vec<i32>> = EachTraversal::new();
    let cells = compose_traversal_traversal(rows, numbers());
    assert_eq!(
        cells.set_all(&(), vec![vec![1], vec![2, 3]], 0),
        Ok(vec![vec![0], vec![0, 0]])
    );
}

// =============================================================================
// No match propagation
// =============================================================================

#[rstest]
fn test_no_match_never_calls_transform() {
    let calls = Cell::new(0);
    let count = |_: &(), mailbox: Mailbox| {
        calls.set(calls.get() + 1);
        Ok(mailbox)
    };

    let ceo_email = ceo()
        .compose(contact())
        .compose_prism(email_prism());
    let phone_ceo = Company {
        ceo: person("p", None, Contact::Phone("1".to_string())),
        staff: vec![],
    };
    assert_eq!(ceo_email.preview(&(), &phone_ceo), Ok(None));
    assert!(ceo_email.extract(&(), &phone_ceo).unwrap_err().is_no_match());
    assert_eq!(ceo_email.modify(&(), phone_ceo.clone(), count), Ok(phone_ceo.clone()));
    assert_eq!(ceo_email.over(&(), phone_ceo.clone(), count), Ok(phone_ceo));

    let staff_emails = staff()
        .compose_traversal(people())
        .compose_lens(contact())
        .compose_prism(email_prism());
    let no_emails = Company {
        ceo: Person::default(),
        staff: vec![person("q", None, Contact::Unlisted)],
    };
    assert_eq!(
        staff_emails.modify(&(), no_emails.clone(), count),
        Ok(no_emails)
    );

    assert_eq!(calls.get(), 0);
}

#[rstest]
fn test_no_match_survives_deep_nesting() {
    #[derive(Clone, PartialEq, Debug, Default)]
    struct Level {
        next: Option<Box<Level>>,
        value: Option<i32>,
    }

    fn next() -> impl Prism<(), Level, Level, Error = OpticError> + Clone {
        lens!(Level, next, (), OpticError)
            .compose_prism(NullablePrism::new())
            .compose(contextual_optics::optics::FunctionPrism::new(
                |_: &(), boxed: &Box<Level>| Ok(Some((**boxed).clone())),
                |_: &(), level: Level| Ok(Box::new(level)),
            ))
    }

    let value = next()
        .compose(next())
        .compose(next())
        .compose(next())
        .compose(lens!(Level, value, (), OpticError).compose_prism(NullablePrism::new()));

    let shallow = Level {
        next: Some(Box::new(Level::default())),
        value: Some(1),
    };
    assert_eq!(value.preview(&(), &shallow), Ok(None));
    assert_eq!(value.extract(&(), &shallow), Err(MatchError::NoMatch));
}

// =============================================================================
// Structural errors stay errors
// =============================================================================

#[rstest]
fn test_structural_error_is_not_no_match() {
    let present: NullablePrism<(), Vec<i32>> = NullablePrism::new();
    let first_of_present = present.compose_lens(IndexLens::new(0));

    let failure = first_of_present.extract(&(), &Some(Vec::<i32>::new()));
    assert_eq!(
        failure,
        Err(MatchError::Failed(OpticError::IndexOutOfRange {
            index: 0,
            length: 0,
        }))
    );

    let absent: Result<i32, MatchError<OpticError>> = first_of_present.extract(&(), &None);
    assert_eq!(absent, Err(MatchError::NoMatch));
}

#[rstest]
fn test_structural_error_aborts_traversal() {
    let rows: EachTraversal<(), Vec<i32>> = EachTraversal::new();
    let second_cells = rows.compose_lens(IndexLens::new(1));
    assert_eq!(
        second_cells.modify(&(), vec![vec![1, 2], vec![3]], |_, x| Ok(x + 1)),
        Err(OpticError::IndexOutOfRange {
            index: 1,
            length: 1,
        })
    );
}

#[rstest]
fn test_transform_error_propagates_through_prism_lens() {
    let email_domain = email_prism().compose_lens(domain());
    assert_eq!(
        email_domain.modify(&(), email("a", "b"), |_, _| Err(OpticError::Cancelled)),
        Err(OpticError::Cancelled)
    );
}
