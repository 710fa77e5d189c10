use std::fmt;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque handle the engine hands out for every built class. Lineage and
/// mixin capability checks compare these, never class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    pub(crate) const ROOT: ClassId = ClassId(0);

    pub(crate) fn next(self) -> ClassId {
        ClassId(self.0 + 1)
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Identity of a live instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub(crate) fn new() -> Self {
        InstanceId(Uuid::new_v4())
    }
}

impl Display for InstanceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hyphenated())
    }
}
