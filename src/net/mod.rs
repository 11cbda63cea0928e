pub mod domain;
pub mod resolver;
pub mod validate;

// Re-export main types and functions
pub use domain::bare_domain;
pub use resolver::{DohResolver, HttpDohResolver};
pub use validate::Validator;
