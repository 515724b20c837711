//! Core types, the store trait, and the person lifecycle service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod outcome;
pub mod person;
pub mod service;
pub mod store;

pub use outcome::{DeleteOutcome, UpdateOutcome};
pub use person::{NewPerson, Person, PersonId, PersonInput};
pub use service::PersonService;
pub use store::PersonStore;
