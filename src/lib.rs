//! A privileged accessor over a runtime class model.
//!
//! Classes are registered at runtime with fields, methods and constructors,
//! including non-public ones. The [`Accessor`] facade can then read, write
//! and invoke any member of a live object or class, bypassing declared
//! visibility for the duration of a single call. Member resolution walks
//! the inheritance chain and disambiguates overloads against the runtime
//! types of the actual argument values.
//!
//! ## Module layout
//!
//! - [`core`] - dynamic values, type handles and the name interner
//! - [`runtime`] - class definitions, the registry and hierarchy walking
//! - [`access`] - member location, overload resolution, the access
//!   executor and the [`Accessor`] facade
//! - [`error`] - the [`AccessError`] failure classification

pub mod access;
pub mod core;
pub mod error;
pub mod runtime;

pub use access::Accessor;
pub use error::{AccessError, MemberKind};
