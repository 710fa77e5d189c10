use super::QualifiedName;

#[test]
fn test_split_nested_name() {
    let name = QualifiedName::parse("Test.override.ClassX").unwrap();
    assert_eq!(name.namespace(), "Test.override");
    assert_eq!(name.leaf(), "ClassX");
    assert!(name.has_namespace());
    assert_eq!(name.to_string(), "Test.override.ClassX");
}

#[test]
fn test_split_top_level_name() {
    let name = QualifiedName::parse("Class1").unwrap();
    assert_eq!(name.namespace(), "");
    assert!(name.namespace_segments().is_empty());
    assert_eq!(name.leaf(), "Class1");
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let name = QualifiedName::parse("  Test.Clazz ").unwrap();
    assert_eq!(name.to_string(), "Test.Clazz");
}

#[test]
fn test_alias_characters() {
    assert!(QualifiedName::is_valid("class-al"));
    assert!(QualifiedName::is_valid("my.inst_1"));
    assert!(QualifiedName::is_valid("Blend.$internal$"));
}

#[test]
fn test_rejects_malformed_names() {
    assert!(!QualifiedName::is_valid(""));
    assert!(!QualifiedName::is_valid("Test..Clazz"));
    assert!(!QualifiedName::is_valid(".Test"));
    assert!(!QualifiedName::is_valid("Test."));
    assert!(!QualifiedName::is_valid("Test Clazz"));
    assert!(QualifiedName::parse("a b").is_err());
}
