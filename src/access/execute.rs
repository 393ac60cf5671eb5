//! The access executor: the final get, set, invoke or construct against
//! a resolved member.
//!
//! Every privileged operation brackets the member with an
//! [`ElevationGuard`]: the member's `accessible` flag is raised before
//! the access and restored to its prior value when the guard drops, on
//! every exit path including a failure inside the invoked body. Outside
//! the bracket, [`check_access`] enforces declared visibility for the
//! ordinary dispatch path used by native bodies.

use crate::core::value::{Obj, Symbol, TypeKey, Val, Visibility};
use crate::error::AccessError;
use crate::runtime::class::{ClassRegistry, CtorDef, FieldDef, MethodBody, MethodDef};
use std::cell::Cell;

/// Scoped elevation of one member's access flag.
pub(crate) struct ElevationGuard<'a> {
    flag: &'a Cell<bool>,
    prev: bool,
}

impl<'a> ElevationGuard<'a> {
    pub(crate) fn raise(flag: &'a Cell<bool>) -> Self {
        let prev = flag.replace(true);
        Self { flag, prev }
    }
}

impl Drop for ElevationGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.prev);
    }
}

/// Enforce visibility unless the member's elevation flag is raised.
pub(crate) fn check_access(
    registry: &ClassRegistry,
    declaring: Symbol,
    member: Symbol,
    visibility: Visibility,
    accessible: bool,
    caller_scope: Option<Symbol>,
) -> Result<(), AccessError> {
    if accessible || registry.is_visible_from(declaring, visibility, caller_scope) {
        Ok(())
    } else {
        Err(AccessError::AccessDenied {
            class: registry.symbol_name(declaring).to_string(),
            member: registry.symbol_name(member).to_string(),
            visibility,
        })
    }
}

/// Representation adjustment after assignability has been established:
/// a boxed scalar unboxes into a primitive slot, everything else is
/// passed through.
fn coerce(value: &Val, ty: &TypeKey) -> Val {
    match (value, ty) {
        (Val::Boxed(p), TypeKey::Prim(_)) => Val::Prim(*p),
        _ => value.clone(),
    }
}

/// Check assignability, then coerce. `TypeMismatch` carries the declared
/// and actual type names.
pub(crate) fn coerce_checked(
    registry: &ClassRegistry,
    value: &Val,
    ty: &TypeKey,
    context: &'static str,
) -> Result<Val, AccessError> {
    if !super::resolve::assignable(registry, value, ty) {
        return Err(AccessError::TypeMismatch {
            expected: registry.type_name(ty),
            got: registry.value_type_name(value),
            context,
        });
    }
    Ok(coerce(value, ty))
}

/// Coerce arguments and run a native body. Errors raised by the body
/// propagate untouched; the privileged entry points wrap them.
pub(crate) fn call_body(
    registry: &ClassRegistry,
    this: Option<&Obj>,
    declaring: Symbol,
    params: &[TypeKey],
    body: &MethodBody,
    args: &[Val],
) -> anyhow::Result<Val> {
    let coerced: Vec<Val> = params.iter().zip(args).map(|(t, a)| coerce(a, t)).collect();
    let ctx = crate::runtime::class::CallCtx {
        registry,
        class: declaring,
        this,
        args: &coerced,
    };
    body(ctx)
}

/// Privileged field read. Static fields read their live value; instance
/// fields read the slot of the declaring level.
pub(crate) fn read_field(
    registry: &ClassRegistry,
    target: Option<&Obj>,
    declaring: Symbol,
    field: &FieldDef,
) -> Result<Val, AccessError> {
    let _guard = ElevationGuard::raise(&field.accessible);
    check_access(
        registry,
        declaring,
        field.name,
        field.visibility,
        field.accessible.get(),
        None,
    )?;
    if field.is_static {
        return Ok(field.static_value.borrow().clone());
    }
    let target = instance_target(registry, target, declaring, field)?;
    Ok(target
        .borrow()
        .slots
        .get(&(declaring, field.name))
        .cloned()
        .unwrap_or_else(|| Val::default_for(&field.ty)))
}

/// Privileged field write. Fails without touching the target when the
/// value is not assignable; final static fields refuse writes even under
/// elevation.
pub(crate) fn write_field(
    registry: &ClassRegistry,
    target: Option<&Obj>,
    declaring: Symbol,
    field: &FieldDef,
    value: &Val,
) -> Result<(), AccessError> {
    let _guard = ElevationGuard::raise(&field.accessible);
    check_access(
        registry,
        declaring,
        field.name,
        field.visibility,
        field.accessible.get(),
        None,
    )?;
    if field.is_static && field.is_final {
        return Err(AccessError::FinalField {
            class: registry.symbol_name(declaring).to_string(),
            field: registry.symbol_name(field.name).to_string(),
        });
    }
    let value = coerce_checked(registry, value, &field.ty, "field write")?;
    if field.is_static {
        *field.static_value.borrow_mut() = value;
        return Ok(());
    }
    let target = instance_target(registry, target, declaring, field)?;
    target
        .borrow_mut()
        .slots
        .insert((declaring, field.name), value);
    Ok(())
}

fn instance_target<'a>(
    registry: &ClassRegistry,
    target: Option<&'a Obj>,
    declaring: Symbol,
    field: &FieldDef,
) -> Result<&'a Obj, AccessError> {
    target.ok_or_else(|| AccessError::StaticMismatch {
        class: registry.symbol_name(declaring).to_string(),
        member: registry.symbol_name(field.name).to_string(),
        wanted_static: true,
    })
}

/// Privileged method invocation. An error raised by the body surfaces as
/// `InvocationFailure` wrapping the original; it is never reported as a
/// resolution error.
pub(crate) fn invoke(
    registry: &ClassRegistry,
    this: Option<&Obj>,
    declaring: Symbol,
    method: &MethodDef,
    args: &[Val],
) -> Result<Val, AccessError> {
    let _guard = ElevationGuard::raise(&method.accessible);
    check_access(
        registry,
        declaring,
        method.name,
        method.visibility,
        method.accessible.get(),
        None,
    )?;
    call_body(registry, this, declaring, &method.params, &method.body, args).map_err(|source| {
        AccessError::InvocationFailure {
            class: registry.symbol_name(declaring).to_string(),
            member: registry.symbol_name(method.name).to_string(),
            source,
        }
    })
}

/// Privileged construction: allocate with default slots, then run the
/// constructor body against the fresh object. A failing body discards
/// the object, so no partially constructed instance escapes.
pub(crate) fn construct(
    registry: &ClassRegistry,
    class: Symbol,
    ctor: &CtorDef,
    args: &[Val],
) -> Result<Obj, AccessError> {
    let obj = registry.new_object(class)?;
    let _guard = ElevationGuard::raise(&ctor.accessible);
    call_body(registry, Some(&obj), class, &ctor.params, &ctor.body, args).map_err(|source| {
        AccessError::InvocationFailure {
            class: registry.symbol_name(class).to_string(),
            member: "<init>".to_string(),
            source,
        }
    })?;
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Visibility;
    use crate::runtime::class::ClassBuilder;

    #[test]
    fn test_elevation_guard_restores_on_drop() {
        let flag = Cell::new(false);
        {
            let _guard = ElevationGuard::raise(&flag);
            assert!(flag.get());
        }
        assert!(!flag.get());
    }

    #[test]
    fn test_elevation_guard_preserves_prior_elevation() {
        let flag = Cell::new(true);
        {
            let _guard = ElevationGuard::raise(&flag);
            assert!(flag.get());
        }
        assert!(flag.get());
    }

    #[test]
    fn test_invoke_failure_restores_flag() {
        let mut reg = ClassRegistry::new();
        let sym = reg
            .register(ClassBuilder::new("Faulty").method(
                "blow",
                [],
                Visibility::Private,
                |_| anyhow::bail!("boom"),
            ))
            .unwrap();
        let blow = reg.interner.find("blow").unwrap();
        let obj = reg.new_object(sym).unwrap();
        let method = &reg.class(sym).unwrap().methods.get(&blow).unwrap()[0];

        let err = invoke(&reg, Some(&obj), sym, method, &[]).unwrap_err();
        assert!(matches!(err, AccessError::InvocationFailure { .. }));
        assert!(!method.accessible.get());
    }

    #[test]
    fn test_coerce_checked_unboxes_into_prim_slot() {
        let reg = ClassRegistry::new();
        let v = coerce_checked(&reg, &Val::boxed_int(4), &TypeKey::int(), "test").unwrap();
        assert_eq!(v, Val::int(4));
        let err =
            coerce_checked(&reg, &Val::str("x"), &TypeKey::int(), "test").unwrap_err();
        assert!(matches!(err, AccessError::TypeMismatch { .. }));
    }
}
