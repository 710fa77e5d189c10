//! Class resolver trait for loading classes a definition depends on.

use crate::runner::api::Engine;
use crate::runner::ds::error::ClassError;

/// Something that can define classes on demand.
///
/// Resolvers are queried in registration order when a definition refers to
/// a class that is not registered yet. The first resolver that claims a name
/// loads it.
pub trait ClassResolver {
    /// Does this resolver know how to provide `name`?
    ///
    /// This should be a cheap check. It must not define anything.
    fn has_class(&self, name: &str) -> bool;

    /// Define `name` (and whatever it needs) on `engine`.
    ///
    /// Called only after `has_class` returned `true`.
    fn load(&self, name: &str, engine: &mut Engine) -> Result<(), ClassError>;

    /// Human-readable name for this resolver (for logging).
    fn name(&self) -> &str;
}
