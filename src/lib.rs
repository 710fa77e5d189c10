//! # blend - runtime class composition engine
//!
//! A small, self-hosted object system driven by declarative class definitions:
//! - Named classes in a dotted namespace, with aliases
//! - Single inheritance plus additive mixins
//! - Generated getters/setters with change notification
//! - Class overrides (patching a name in place) with `call_parent` chaining
//! - Abstract and singleton classes
//! - Lazy loading of dependencies through pluggable resolvers
//!
//! ## Quick Start
//!
//! ### Defining and creating classes
//!
//! ```
//! use blend::runner::api::Engine;
//! use blend::runner::builder::definition::ClassDefinition;
//! use blend::runner::ds::value::Value;
//!
//! let mut engine = Engine::new();
//! engine
//!     .define_class(
//!         "Test.Person",
//!         ClassDefinition::new()
//!             .alias("app.person")
//!             .config("firstname", "john")
//!             .config("lastname", "doe")
//!             .method("fullname", |ctx| {
//!                 let first = ctx.call_self("getFirstname", vec![])?;
//!                 let last = ctx.call_self("getLastname", vec![])?;
//!                 Ok(Value::from(format!("{} {}", first, last)))
//!             }),
//!         None,
//!     )
//!     .unwrap();
//!
//! let sally = engine
//!     .create("app.person", Value::object_from(vec![("firstname", "Sally")]))
//!     .unwrap();
//! engine.call(&sally, "setLastname", vec![Value::from("Doe")]).unwrap();
//! let name = engine.call(&sally, "fullname", vec![]).unwrap();
//! assert_eq!(name, Value::from("Sally Doe"));
//! ```
//!
//! ### Overrides and `call_parent`
//!
//! An override registers a new class on top of the current implementation
//! of a name and redirects the name to it. A method declared with
//! [`chained`](runner::builder::definition::ClassDefinition::chained) can
//! reach the version it replaced.
//!
//! ```
//! use blend::runner::api::Engine;
//! use blend::runner::builder::definition::ClassDefinition;
//! use blend::runner::ds::value::Value;
//!
//! let mut engine = Engine::new();
//! engine
//!     .define_class(
//!         "Test.ClassX",
//!         ClassDefinition::new().method("say", |_| Ok(Value::from("x"))),
//!         None,
//!     )
//!     .unwrap();
//! engine
//!     .define_class(
//!         "Test.override.ClassX",
//!         ClassDefinition::new()
//!             .overrides("Test.ClassX")
//!             .chained("say", |ctx| {
//!                 let said = ctx.call_parent(vec![])?;
//!                 Ok(Value::from(said.to_string().to_uppercase()))
//!             }),
//!         None,
//!     )
//!     .unwrap();
//!
//! let x = engine.create("Test.ClassX", Value::Undefined).unwrap();
//! assert_eq!(engine.call(&x, "say", vec![]).unwrap(), Value::from("X"));
//! assert!(engine.is_instance_of(&x, "Test.ClassX"));
//! ```
//!
//! ### Singletons
//!
//! ```
//! use blend::runner::api::Engine;
//! use blend::runner::builder::definition::ClassDefinition;
//! use blend::runner::ds::value::Value;
//!
//! let mut engine = Engine::new();
//! engine
//!     .define_class(
//!         "Test.Util",
//!         ClassDefinition::new()
//!             .singleton()
//!             .method("greet", |_| Ok(Value::from("hello"))),
//!         None,
//!     )
//!     .unwrap();
//!
//! let util = engine.singleton("Test.Util").unwrap();
//! assert_eq!(engine.call(&util, "greet", vec![]).unwrap(), Value::from("hello"));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - Qualified class name grammar
//! - **[`runner`]** - The class system
//!   - **[`runner::api`]** - The [`Engine`](runner::api::Engine) façade
//!   - **[`runner::builder`]** - Definition pipeline, registry and instance factory
//!   - **[`runner::ds`]** - Data structures (values, classes, instances, namespace)
//!   - **[`runner::loader`]** - Dependency resolvers and engine configuration

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
