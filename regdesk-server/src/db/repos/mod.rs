//! Repository implementations for database access

pub mod registrations;

pub use registrations::{DbError, Inserted, Registration, RegistrationRepo};
