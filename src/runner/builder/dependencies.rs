//! Loads classes a definition refers to before it is composed.
//!
//! Failures here are never fatal: a dependency that cannot be loaded is
//! logged and skipped, and the definition fails later (for example with
//! "parent is undefined") if it really needed it.

use tracing::{debug, warn};

use crate::runner::api::Engine;
use crate::runner::builder::definition::NormalizedDefinition;

pub(crate) fn resolve_dependencies(engine: &mut Engine, def: &NormalizedDefinition) {
    for name in def.dependencies() {
        if is_satisfied(engine, &name) {
            continue;
        }
        load_dependency(engine, &name);
    }
}

fn is_satisfied(engine: &Engine, name: &str) -> bool {
    let config = engine.config();
    name == config.framework_namespace
        || name == config.root_class
        || config.skip_dependencies.iter().any(|skip| skip == name)
        || engine.loading.contains(name)
        || engine.registry.contains(name)
}

fn load_dependency(engine: &mut Engine, name: &str) {
    // resolvers may define classes, so iterate over a snapshot
    let resolvers = engine.resolvers.clone();
    let resolver = match resolvers.iter().find(|r| r.has_class(name)) {
        Some(resolver) => resolver,
        None => {
            warn!("Unable to load [{}] automatically: no resolver provides it", name);
            return;
        }
    };
    debug!(class = name, resolver = resolver.name(), "loading dependency");
    engine.loading.insert(name.to_string());
    let result = resolver.load(name, engine);
    engine.loading.remove(name);
    if let Err(e) = result {
        warn!("Unable to load [{}] automatically: {}", name, e);
    }
}
