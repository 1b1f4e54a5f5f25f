//! Composable field validation for dashboard forms.
//!
//! A [`Validator`] maps field names to ordered rule lists. Each field
//! reports at most one message: the first failing rule wins.

mod dates;
pub mod rules;
mod validator;


pub use dates::{DateReference, parse_date};
pub use rules::Rule;
pub use validator::{FormData, FormRecord, ValidationResult, Validator};
