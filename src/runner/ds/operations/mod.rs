pub mod clone;
pub mod test_and_comparison;
pub mod type_conversion;
