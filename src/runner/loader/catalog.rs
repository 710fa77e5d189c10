//! In-memory table of loadable class definitions.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::runner::builder::definition::ClassDefinition;
use crate::runner::ds::value::Value;

pub type DefinitionThunk = Rc<dyn Fn() -> ClassDefinition>;
pub type PostProcessHook = Rc<dyn Fn(&Value)>;

/// One loadable class: its name, a thunk producing a fresh definition and
/// the callback to run once it is registered.
#[derive(Clone)]
pub struct CatalogEntry {
    pub name: String,
    pub definition: DefinitionThunk,
    pub post_process: Option<PostProcessHook>,
}

/// Qualified class name -> definition, in registration order.
#[derive(Clone, Default)]
pub struct ClassCatalog {
    entries: IndexMap<String, CatalogEntry>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        ClassCatalog::default()
    }

    /// Register a definition under `name`, replacing an earlier one.
    pub fn register<F>(&mut self, name: &str, definition: F)
    where
        F: Fn() -> ClassDefinition + 'static,
    {
        self.insert(name, Rc::new(definition), None);
    }

    /// Register a definition together with a post-process callback that
    /// receives the published class (or singleton instance).
    pub fn register_with_post_process<F, P>(&mut self, name: &str, definition: F, post_process: P)
    where
        F: Fn() -> ClassDefinition + 'static,
        P: Fn(&Value) + 'static,
    {
        self.insert(name, Rc::new(definition), Some(Rc::new(post_process)));
    }

    fn insert(&mut self, name: &str, definition: DefinitionThunk, post_process: Option<PostProcessHook>) {
        self.entries.insert(
            name.to_string(),
            CatalogEntry {
                name: name.to_string(),
                definition,
                post_process,
            },
        );
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: &str, definition: F) -> Self
    where
        F: Fn() -> ClassDefinition + 'static,
    {
        self.register(name, definition);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
