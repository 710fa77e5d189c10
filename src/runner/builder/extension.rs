//! Builds a class on top of its parent: inherited members first, then the
//! definition's own members with super-dispatch links where requested.

use std::rc::Rc;

use crate::runner::builder::definition::NormalizedDefinition;
use crate::runner::ds::class_object::{Class, ClassRef};
use crate::runner::ds::function_object::MethodSlot;
use crate::runner::ds::identity::ClassId;
use crate::runner::ds::operations::clone::deep_clone_map;

/// A fresh class that inherits everything `parent` has: methods, defaults,
/// accessors, composed mixins and is-a capabilities.
pub(crate) fn seed_from_parent(id: ClassId, name: &str, parent: &ClassRef) -> Class {
    let mut class = Class::new(id, name);
    class.parent = Some(parent.clone());
    class.lineage.extend(parent.lineage.iter().cloned());
    class.capabilities.extend(parent.capabilities.iter().cloned());
    class.methods = parent.methods.clone();
    class.defaults = deep_clone_map(&parent.defaults);
    class.accessors = parent.accessors.clone();
    class.mixins = parent.mixins.clone();
    class
}

/// Installs the definition's own data members and methods.
///
/// A chained method gets a link to the parent's method of the same name, if
/// the parent has one. Any other method simply replaces what was inherited.
pub(crate) fn apply_members(class: &mut Class, parent: &ClassRef, def: &NormalizedDefinition) {
    for (name, value) in &def.data {
        class.methods.shift_remove(name);
        class.defaults.insert(name.to_string(), value.clone());
    }
    for (name, function) in &def.methods {
        let parent_slot = if function.chains_parent() {
            parent.method(name).cloned()
        } else {
            None
        };
        class.defaults.shift_remove(name);
        let slot = MethodSlot::new(name, &def.class_name, function.clone()).with_parent(parent_slot);
        class.methods.insert(name.to_string(), Rc::new(slot));
    }
}

pub(crate) fn apply_statics(class: &mut Class, def: &NormalizedDefinition) {
    class.statics = def.statics.clone();
}
