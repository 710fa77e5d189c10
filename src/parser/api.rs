use std::fmt;

use pest::Parser;
use pest_derive::Parser;

use crate::runner::ds::error::ClassError;

#[derive(Parser)]
#[grammar = "parser/qualified_name.pest"] // relative to src
pub struct NameParser;

/// A validated dotted name split into its segments.
///
/// The last segment is the leaf (class or alias name); everything before it
/// is the namespace path, which is empty for top-level names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Parse and validate a dotted name. Surrounding whitespace is ignored.
    pub fn parse(name: &str) -> Result<Self, ClassError> {
        let trimmed = name.trim();
        let pairs = NameParser::parse(Rule::qualified_name, trimmed).map_err(|e| {
            ClassError::InvalidDefinition(format!("'{}' is not a valid class name ({})", name, e))
        })?;
        let mut segments = vec![];
        for pair in pairs.flatten() {
            if let Rule::segment = pair.as_rule() {
                segments.push(pair.as_str().to_string());
            }
        }
        Ok(QualifiedName { segments })
    }

    /// Returns true when the text is a well-formed dotted name.
    pub fn is_valid(name: &str) -> bool {
        NameParser::parse(Rule::qualified_name, name.trim()).is_ok()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The namespace part, joined with dots (empty for top-level names).
    pub fn namespace(&self) -> String {
        self.segments[..self.segments.len() - 1].join(".")
    }

    /// The namespace segments, without the leaf.
    pub fn namespace_segments(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    pub fn leaf(&self) -> &str {
        // the grammar guarantees at least one segment
        &self.segments[self.segments.len() - 1]
    }

    pub fn has_namespace(&self) -> bool {
        self.segments.len() > 1
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
