mod api;
#[cfg(test)]
mod unit_tests;

pub use api::{NameParser, QualifiedName, Rule};
