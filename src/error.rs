//! Failure classification for accessor calls.
//!
//! Resolution failures (wrong name, no viable overload, ambiguity) are
//! kept strictly apart from [`AccessError::InvocationFailure`], which
//! means the call reached the member and the member's own code raised.
//! Every failure is reported synchronously to the caller; nothing is
//! logged, retried or suppressed.

use crate::core::value::Visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Constructor => "constructor",
        }
    }
}

#[derive(Debug)]
pub enum AccessError {
    /// No class with this name is registered.
    NoSuchClass { name: String },
    /// A class with this name is already registered.
    DuplicateClass { name: String },
    /// No member with this name exists anywhere in the hierarchy, or no
    /// overload accepts the given arguments.
    MemberNotFound {
        class: String,
        member: String,
        kind: MemberKind,
    },
    /// More than one equally specific overload accepts the arguments.
    AmbiguousOverload {
        class: String,
        member: String,
        viable: usize,
    },
    /// A value is not assignable to the declared field or parameter type.
    TypeMismatch {
        expected: String,
        got: String,
        context: &'static str,
    },
    /// Visibility forbids the access and no elevation is in effect.
    AccessDenied {
        class: String,
        member: String,
        visibility: Visibility,
    },
    /// A static member was addressed through an instance entry point or
    /// vice versa.
    StaticMismatch {
        class: String,
        member: String,
        wanted_static: bool,
    },
    /// Writes to final static fields are refused even under elevation.
    FinalField { class: String, field: String },
    /// The resolved member itself raised during execution. Wraps the
    /// original error; `source()` exposes it.
    InvocationFailure {
        class: String,
        member: String,
        source: anyhow::Error,
    },
}

impl std::fmt::Display for AccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessError::NoSuchClass { name } => {
                write!(f, "Unknown class {}", name)
            }
            AccessError::DuplicateClass { name } => {
                write!(f, "Class {} is already registered", name)
            }
            AccessError::MemberNotFound {
                class,
                member,
                kind,
            } => match kind {
                MemberKind::Constructor => {
                    write!(f, "No constructor of {} matches the given arguments", class)
                }
                MemberKind::Field => {
                    write!(f, "No field {}::{}", class, member)
                }
                MemberKind::Method => {
                    write!(
                        f,
                        "No method {}::{} matches the given arguments",
                        class, member
                    )
                }
            },
            AccessError::AmbiguousOverload {
                class,
                member,
                viable,
            } => {
                write!(
                    f,
                    "Ambiguous call to {}::{}: {} equally specific candidates",
                    class, member, viable
                )
            }
            AccessError::TypeMismatch {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Type mismatch in {}: expected {}, got {}",
                    context, expected, got
                )
            }
            AccessError::AccessDenied {
                class,
                member,
                visibility,
            } => {
                write!(
                    f,
                    "Cannot access {} member {}::{}",
                    visibility.as_str(),
                    class,
                    member
                )
            }
            AccessError::StaticMismatch {
                class,
                member,
                wanted_static,
            } => {
                if *wanted_static {
                    write!(f, "{}::{} is not static", class, member)
                } else {
                    write!(f, "{}::{} is static", class, member)
                }
            }
            AccessError::FinalField { class, field } => {
                write!(f, "Cannot write final static field {}::{}", class, field)
            }
            AccessError::InvocationFailure {
                class,
                member,
                source,
            } => {
                write!(f, "{}::{} raised: {}", class, member, source)
            }
        }
    }
}

impl std::error::Error for AccessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AccessError::InvocationFailure { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
