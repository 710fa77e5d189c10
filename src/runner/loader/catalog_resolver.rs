//! Adapts a [`ClassCatalog`] into a [`ClassResolver`].

use tracing::debug;

use crate::runner::api::Engine;
use crate::runner::builder::definition::DefinitionSource;
use crate::runner::ds::error::ClassError;
use crate::runner::loader::catalog::ClassCatalog;
use crate::runner::loader::resolver::ClassResolver;

/// Loads classes by defining them from the catalog's definitions.
pub struct CatalogResolver {
    catalog: ClassCatalog,
}

impl CatalogResolver {
    pub fn new(catalog: ClassCatalog) -> Self {
        CatalogResolver { catalog }
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }
}

impl ClassResolver for CatalogResolver {
    fn has_class(&self, name: &str) -> bool {
        self.catalog.has_class(name)
    }

    fn load(&self, name: &str, engine: &mut Engine) -> Result<(), ClassError> {
        let entry = self.catalog.get(name).ok_or_else(|| ClassError::Load {
            name: name.to_string(),
            reason: "not in catalog".to_string(),
        })?;
        debug!(class = name, "defining class from catalog");
        let thunk = entry.definition.clone();
        let post_process = entry.post_process.clone();
        engine
            .define_class(
                name,
                DefinitionSource::factory(move || thunk()),
                post_process.as_deref(),
            )
            .map_err(|e| ClassError::Load {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    fn name(&self) -> &str {
        "catalog"
    }
}
