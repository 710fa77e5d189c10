//! Class definition flow, including overrides and singletons.
//!
//! ```text
//! define_class(name, source)
//!   ├─ parse + trim name, normalize definition
//!   ├─ directive conflicts, redefinition check
//!   ├─ load dependencies
//!   ├─ extend path:   build on parent -> register -> publish class
//!   │                 -> abstract / singleton -> post-process callback
//!   └─ override path: build on current implementation of the target
//!                     -> redirect target -> republish singleton if forced
//! ```

use std::rc::Rc;

use tracing::debug;

use crate::parser::QualifiedName;
use crate::runner::api::Engine;
use crate::runner::builder::accessors::generate_accessors;
use crate::runner::builder::constructor::instantiate;
use crate::runner::builder::definition::{normalize, DefinitionSource, NormalizedDefinition};
use crate::runner::builder::dependencies::resolve_dependencies;
use crate::runner::builder::extension::{apply_members, apply_statics, seed_from_parent};
use crate::runner::builder::mixins::compose_mixins;
use crate::runner::ds::class_object::ClassRef;
use crate::runner::ds::error::{ClassError, DirectiveConflict};
use crate::runner::ds::value::Value;

pub type PostProcess<'a> = &'a dyn Fn(&Value);

pub(crate) fn define_class(
    engine: &mut Engine,
    name: &str,
    source: DefinitionSource,
    post_process: Option<PostProcess<'_>>,
) -> Result<(), ClassError> {
    let qualified = QualifiedName::parse(name)?;
    let class_name = qualified.to_string();
    if class_name == engine.config().root_class {
        debug!(class = %class_name, "root class is built in, ignoring definition");
        return Ok(());
    }
    let definition = source.into_definition();
    let def = normalize(&class_name, &definition)?;

    let force_singleton = match &def.override_target {
        Some(target) => engine.registry.is_singleton(target),
        None => false,
    };
    check_directives(&def, force_singleton)?;
    if engine.registry.contains(&class_name) {
        return Err(ClassError::Redefinition(class_name));
    }

    resolve_dependencies(engine, &def);

    match def.override_target.clone() {
        None => {
            let parent_name = def
                .extend
                .clone()
                .unwrap_or_else(|| engine.config().root_class.to_string());
            define_extension(engine, &qualified, def, &parent_name, post_process)
        }
        Some(target) => define_override(engine, &qualified, def, &target, force_singleton),
    }
}

fn check_directives(def: &NormalizedDefinition, force_singleton: bool) -> Result<(), ClassError> {
    let overriding = def.override_target.is_some();
    if def.extend.is_some() && overriding {
        return Err(ClassError::Conflict(DirectiveConflict::ExtendAndOverride));
    }
    if overriding && def.singleton && !force_singleton {
        return Err(ClassError::Conflict(DirectiveConflict::OverrideSingleton));
    }
    if def.singleton && def.abstract_class {
        return Err(ClassError::Conflict(DirectiveConflict::AbstractSingleton));
    }
    Ok(())
}

fn define_extension(
    engine: &mut Engine,
    qualified: &QualifiedName,
    def: NormalizedDefinition,
    parent_name: &str,
    post_process: Option<PostProcess<'_>>,
) -> Result<(), ClassError> {
    let class_name = def.class_name.to_string();
    let parent = engine
        .resolve_class(parent_name)
        .ok_or_else(|| ClassError::UndefinedParent(parent_name.to_string()))?;
    let class = build_class(engine, &def, &parent)?;

    engine.registry.define(&class_name)?;
    engine.registry.alias(&def.aliases, &class_name);
    engine.constructors.insert(class_name.to_string(), class.clone());
    engine.namespace.publish(qualified, Value::Class(class));

    if def.abstract_class {
        engine.registry.mark_abstract(&class_name)?;
    }
    if def.singleton {
        engine.registry.mark_singleton(&class_name)?;
        // the override of a singleton is published under the overridden name
        let parent_is_singleton = engine
            .registry
            .lookup(parent_name)
            .map(|n| engine.registry.is_singleton(&n))
            .unwrap_or(false);
        if !parent_is_singleton {
            publish_singleton(engine, qualified, &class_name)?;
        }
    }

    if let Some(callback) = post_process {
        if let Some(registered) = engine.namespace.lookup(qualified) {
            callback(&registered);
        }
    }
    Ok(())
}

fn define_override(
    engine: &mut Engine,
    qualified: &QualifiedName,
    mut def: NormalizedDefinition,
    target: &str,
    force_singleton: bool,
) -> Result<(), ClassError> {
    if !engine.registry.contains(target) && engine.resolve_class(target).is_none() {
        return Err(ClassError::UndefinedOverrideTarget(target.to_string()));
    }
    let class_name = def.class_name.to_string();
    let current = engine
        .registry
        .lookup(target)
        .unwrap_or_else(|| target.to_string());
    def.override_target = None;
    def.extend = Some(current.to_string());
    if force_singleton {
        def.singleton = true;
    }
    define_extension(engine, qualified, def, &current, None)?;

    let implementation = engine
        .registry
        .lookup(&class_name)
        .unwrap_or_else(|| class_name.to_string());
    engine.registry.redirect(target, &implementation)?;

    if force_singleton {
        let target_name = QualifiedName::parse(target)?;
        publish_singleton(engine, &target_name, target)?;
    }
    Ok(())
}

/// Runs the composition pipeline for one definition.
fn build_class(
    engine: &mut Engine,
    def: &NormalizedDefinition,
    parent: &ClassRef,
) -> Result<ClassRef, ClassError> {
    let id = engine.next_class_id();
    let mut class = seed_from_parent(id, &def.class_name, parent);
    apply_members(&mut class, parent, def);
    generate_accessors(&mut class, &def.configs)?;
    compose_mixins(engine, &mut class, &def.mixins)?;
    apply_statics(&mut class, def);
    Ok(Rc::new(class))
}

/// Instantiates whatever `name` currently resolves to and publishes the
/// instance at `qualified`.
fn publish_singleton(
    engine: &mut Engine,
    qualified: &QualifiedName,
    name: &str,
) -> Result<(), ClassError> {
    let class = engine
        .resolve_class(name)
        .ok_or_else(|| ClassError::UnknownClass(name.to_string()))?;
    let instance = instantiate(engine, &class, Value::object())?;
    debug!(singleton = %qualified, class = class.name(), "published singleton");
    engine.namespace.publish(qualified, Value::Instance(instance));
    Ok(())
}
