//! Income statement forms for early childhood education fees.
//!
//! [`models`] holds the editable form and the request bodies it turns into,
//! [`validation`] performs that conversion, [`editor`] drives an editing
//! session and [`db`] defines the storage seam.

pub mod db;
pub mod editor;
pub mod models;
pub mod validation;

pub use db::repository::{IncomeStatementRepository, RepositoryError};
pub use editor::{EditorError, IncomeStatementEditor};
pub use models::*;
pub use validation::{BodyError, Validation, from_body};
