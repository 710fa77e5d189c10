pub mod class_object;
pub mod error;
pub mod function_object;
pub mod identity;
pub mod namespace;
pub mod object;
pub mod operations;
pub mod value;
