//! The class composition pipeline.
//!
//! A definition flows through these stages, each in its own module:
//!
//! ```text
//! definition ─► normalize ─► dependencies ─► extension ─► accessors
//!                                                │
//!           registry ◄─ constructor ◄─ mixins ◄──┘
//!              │
//!              └─► overrides (singleton republish, redirects)
//! ```
//!
//! [`factory`] is the read side: it turns a name, alias or spec object into
//! a live instance.

pub mod accessors;
pub mod constructor;
pub mod definition;
pub(crate) mod dependencies;
pub(crate) mod extension;
pub mod factory;
pub(crate) mod mixins;
pub mod overrides;
pub mod registry;
