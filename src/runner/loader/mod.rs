//! Loading classes on demand.
//!
//! When a definition names a class that is not registered yet (through
//! `extend`, `override`, `requires`, `controllers` or `mixins`), the engine
//! asks its resolvers to provide it before composing the new class:
//!
//! ```text
//! Dependency lookup order:
//! 1. Bare framework name / root class / skip list  → ignored
//! 2. Already registered                             → nothing to do
//! 3. Resolvers, in registration order              → first claimant loads it
//! 4. Nobody claims it                              → warning, carry on
//! ```
//!
//! ### Key Components
//!
//! - **[`ClassResolver`](resolver::ClassResolver)**: trait for providing classes dynamically
//! - **[`ClassCatalog`](catalog::ClassCatalog)**: in-memory name → definition table
//! - **[`CatalogResolver`](catalog_resolver::CatalogResolver)**: adapter exposing a catalog as a resolver
//! - **[`EngineConfig`](config::EngineConfig)**: engine settings, loadable from TOML
//!
//! ## Example: Lazy Dependency
//!
//! ```
//! use blend::runner::api::Engine;
//! use blend::runner::builder::definition::ClassDefinition;
//! use blend::runner::ds::value::Value;
//! use blend::runner::loader::catalog::ClassCatalog;
//! use blend::runner::loader::catalog_resolver::CatalogResolver;
//!
//! let catalog = ClassCatalog::new().with("Shop.Cart", || {
//!     ClassDefinition::new().member("items", Value::array(vec![]))
//! });
//!
//! let mut engine = Engine::new();
//! engine.add_resolver(CatalogResolver::new(catalog));
//!
//! // Shop.Checkout requires Shop.Cart, which the catalog defines on demand.
//! engine
//!     .define_class("Shop.Checkout", ClassDefinition::new().requires("Shop.Cart"), None)
//!     .unwrap();
//! assert!(engine.is_class_defined("Shop.Cart"));
//! ```

pub mod catalog;
pub mod catalog_resolver;
pub mod config;
pub mod resolver;
