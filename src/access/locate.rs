//! Member location in the class hierarchy.
//!
//! Fields follow shadowing semantics: the first declaration found
//! walking the chain self-first wins and hides any ancestor declaration
//! of the same name. Methods are different: non-public methods are never
//! overridden, only shadowed by signature, so every level contributes
//! its declarations to the overload candidate set unless a more derived
//! level already declared an identical parameter list. Constructors are
//! never inherited.

use crate::core::value::Symbol;
use crate::error::{AccessError, MemberKind};
use crate::runtime::class::{ClassRegistry, CtorDef, FieldDef, MethodDef};

/// Find the most derived declaration of a field, instance or static.
pub fn find_field<'a>(
    registry: &'a ClassRegistry,
    class: Symbol,
    name: &str,
) -> Result<(Symbol, &'a FieldDef), AccessError> {
    let not_found = || AccessError::MemberNotFound {
        class: registry.symbol_name(class).to_string(),
        member: name.to_string(),
        kind: MemberKind::Field,
    };
    let sym = registry.interner.find(name).ok_or_else(not_found)?;
    for level in registry.ancestors(class) {
        if let Some(field) = registry.class(level).and_then(|def| def.fields.get(&sym)) {
            return Ok((level, field));
        }
    }
    Err(not_found())
}

/// Collect overload candidates named `name` from every hierarchy level.
/// A declaration is skipped when a more derived level already declared
/// the same parameter list (signature shadowing).
pub fn method_candidates<'a>(
    registry: &'a ClassRegistry,
    class: Symbol,
    name: &str,
) -> Vec<(Symbol, &'a MethodDef)> {
    let Some(sym) = registry.interner.find(name) else {
        return Vec::new();
    };
    let mut candidates: Vec<(Symbol, &MethodDef)> = Vec::new();
    for level in registry.ancestors(class) {
        let Some(overloads) = registry.class(level).and_then(|def| def.methods.get(&sym))
        else {
            continue;
        };
        for method in overloads {
            let shadowed = candidates
                .iter()
                .any(|(_, seen)| seen.params == method.params);
            if !shadowed {
                candidates.push((level, method));
            }
        }
    }
    candidates
}

/// Constructors of `class` itself; never inherited.
pub fn ctor_candidates(
    registry: &ClassRegistry,
    class: Symbol,
) -> Result<&[CtorDef], AccessError> {
    registry
        .class(class)
        .map(|def| def.ctors.as_slice())
        .ok_or_else(|| AccessError::NoSuchClass {
            name: registry.symbol_name(class).to_string(),
        })
}
