//! Domain models with validation at construction
//!
//! A `NewRegistration` can only be built from validated input, so the
//! repository never sees a missing name or a malformed email.

pub mod email;
pub mod registration;
pub mod validation;

pub use email::is_valid_email;
pub use registration::{ClientContext, NewRegistration, SubmissionFields};
pub use validation::ValidationError;
