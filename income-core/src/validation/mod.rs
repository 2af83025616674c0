//! Validation of income statement forms.
//!
//! The section validators in [`sections`] each produce a three-way
//! [`Validation`] outcome; [`from_body`] combines them into one of the
//! request bodies in [`crate::models`].

pub mod body;
pub mod common;
pub mod outcome;
pub mod sections;

pub use body::{BodyError, from_body};
pub use outcome::{Invalid, Validation};
pub use sections::{
    validate_accountant, validate_entrepreneur, validate_estimated_income, validate_gross,
    validate_limited_company, validate_self_employed,
};
