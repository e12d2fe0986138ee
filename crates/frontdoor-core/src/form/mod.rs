//! The login form: state, validation rules and the controller tying them
//! to the auth and navigation collaborators.

pub mod controller;
pub mod state;
pub mod validation;

pub use controller::{LoginForm, LoginOutcome, SubmitAttempt};
pub use state::FormState;
pub use validation::{Field, ValidationError};
