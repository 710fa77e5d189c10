//! Mixin composition.

use indexmap::IndexMap;

use crate::runner::api::Engine;
use crate::runner::builder::constructor::bare_instance;
use crate::runner::ds::class_object::{Class, MixinEntry};
use crate::runner::ds::error::ClassError;
use crate::runner::ds::operations::clone::deep_clone;

/// Composes every mixin in `mixins` (local name -> class name) into `class`.
///
/// Each mixin is recorded under its local name together with a
/// composition-only instance, and the mixin's own capability table is
/// flattened in. Methods and defaults the class does not have yet are
/// copied over; nothing the class already defines or inherits is replaced.
pub(crate) fn compose_mixins(
    engine: &Engine,
    class: &mut Class,
    mixins: &IndexMap<String, String>,
) -> Result<(), ClassError> {
    for (local, mixin_name) in mixins {
        let mixin = engine
            .resolve_class(mixin_name)
            .ok_or_else(|| ClassError::UndefinedMixin(mixin_name.to_string()))?;

        class
            .mixins
            .insert(local.to_string(), MixinEntry::new(mixin.clone(), bare_instance(&mixin)));
        for (nested_local, entry) in mixin.mixins.iter() {
            class.mixins.insert(nested_local.to_string(), entry.clone());
        }

        for (name, slot) in mixin.methods.iter() {
            if !class.methods.contains_key(name) && !class.defaults.contains_key(name) {
                class.methods.insert(name.to_string(), slot.clone());
            }
        }
        for (name, value) in mixin.defaults.iter() {
            if !class.defaults.contains_key(name) && !class.methods.contains_key(name) {
                class.defaults.insert(name.to_string(), deep_clone(value));
            }
        }
        class
            .capabilities
            .extend(mixin.capabilities.iter().cloned());
    }
    Ok(())
}
