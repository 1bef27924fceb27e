pub mod extract;
pub mod lenient;
pub mod ownership;
pub mod validation;
