//! Overload resolution against runtime argument values.
//!
//! The host language resolves overloads from static types at compile
//! time; here nothing but the runtime values exists, so resolution is an
//! explicit assignability-then-specificity algorithm:
//!
//! 1. keep candidates whose arity matches;
//! 2. keep candidates where every argument is assignable to the declared
//!    parameter type: same class or a subclass of it, a boxed wrapper
//!    where a primitive is declared (implicit unboxing), or null against
//!    any non-primitive type;
//! 3. zero viable candidates is a no-match, one is the answer, several
//!    go to a specificity tie-break; a candidate wins only when it is at
//!    least as specific at every position and strictly more specific at
//!    one. Anything else is ambiguous, and ambiguity is fatal - guessing
//!    a candidate would silently change what a test exercises.
//!
//! Array- and list-typed parameters match by exact declared-type
//! equality only. Covariant matching would let `Object[]` capture a
//! `String[]` argument and silently pick the wrong sibling overload.

use crate::core::value::{builtin, Symbol, TypeKey, Val};
use crate::error::{AccessError, MemberKind};
use crate::runtime::class::ClassRegistry;

/// Why resolution failed; mapped to [`AccessError`] at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// No candidate accepts the arguments.
    NotFound,
    /// Several candidates accept them and none is strictly more specific.
    Ambiguous { viable: usize },
}

pub fn into_access_error(
    registry: &ClassRegistry,
    failure: ResolveFailure,
    class: Symbol,
    member: &str,
    kind: MemberKind,
) -> AccessError {
    let class = registry.symbol_name(class).to_string();
    match failure {
        ResolveFailure::NotFound => AccessError::MemberNotFound {
            class,
            member: member.to_string(),
            kind,
        },
        ResolveFailure::Ambiguous { viable } => AccessError::AmbiguousOverload {
            class,
            member: member.to_string(),
            viable,
        },
    }
}

/// Whether `value` can be passed where `param` is declared.
pub fn assignable(registry: &ClassRegistry, value: &Val, param: &TypeKey) -> bool {
    let Some(runtime) = value.runtime_type() else {
        // Null fits any non-primitive type.
        return !param.is_prim();
    };
    match param {
        TypeKey::Prim(kind) => match runtime {
            TypeKey::Prim(rk) => rk == *kind,
            // Implicit unboxing of the matching wrapper.
            TypeKey::Class(sym) => sym == kind.wrapper_symbol(),
            _ => false,
        },
        TypeKey::Class(sym) => match runtime {
            TypeKey::Class(rc) => registry.is_subclass_of(rc, *sym),
            // Arrays, lists and raw scalars are not class instances;
            // arrays and lists still fit the root type.
            TypeKey::Array(_) | TypeKey::List(_) => *sym == builtin::OBJECT,
            TypeKey::Prim(_) => false,
        },
        // Exact declared-type equality only.
        TypeKey::Array(_) | TypeKey::List(_) => runtime == *param,
    }
}

/// Pick the single best-matching signature for `args`, or report why
/// there is none. Returns an index into `signatures`.
pub fn resolve(
    registry: &ClassRegistry,
    signatures: &[&[TypeKey]],
    args: &[Val],
) -> Result<usize, ResolveFailure> {
    let viable: Vec<usize> = signatures
        .iter()
        .enumerate()
        .filter(|(_, sig)| {
            sig.len() == args.len()
                && sig
                    .iter()
                    .zip(args)
                    .all(|(param, arg)| assignable(registry, arg, param))
        })
        .map(|(index, _)| index)
        .collect();

    match viable.as_slice() {
        [] => Err(ResolveFailure::NotFound),
        [only] => Ok(*only),
        _ => {
            let winner = viable.iter().copied().find(|&a| {
                viable
                    .iter()
                    .all(|&b| a == b || more_specific(registry, signatures[a], signatures[b]))
            });
            winner.ok_or(ResolveFailure::Ambiguous {
                viable: viable.len(),
            })
        }
    }
}

/// Strict specificity: at least as specific at every position, strictly
/// more specific at one.
fn more_specific(registry: &ClassRegistry, a: &[TypeKey], b: &[TypeKey]) -> bool {
    let mut strict = false;
    for (ta, tb) in a.iter().zip(b) {
        if !at_least_as_specific(registry, ta, tb) {
            return false;
        }
        if ta != tb {
            strict = true;
        }
    }
    strict
}

/// Type specificity partial order: a type is at least as specific as
/// itself, a subclass is more specific than its ancestors, arrays and
/// lists are more specific than the root type, and a wrapper class is
/// more specific than its primitive kind - a boxed argument viable for
/// both `f(Integer)` and `f(int)` belongs to the wrapper overload.
fn at_least_as_specific(registry: &ClassRegistry, a: &TypeKey, b: &TypeKey) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (TypeKey::Class(ca), TypeKey::Class(cb)) => registry.is_subclass_of(*ca, *cb),
        (TypeKey::Class(ca), TypeKey::Prim(kb)) => *ca == kb.wrapper_symbol(),
        (TypeKey::Array(_) | TypeKey::List(_), TypeKey::Class(cb)) => *cb == builtin::OBJECT,
        _ => false,
    }
}
