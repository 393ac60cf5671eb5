//! The privileged accessor facade.
//!
//! [`Accessor`] composes the hierarchy walk, member location, overload
//! resolution and the access executor into the entry points test code
//! calls. Each call resolves the member from scratch against the live
//! registry, performs the single access under an elevation bracket, and
//! reports any failure synchronously; the accessor keeps no state
//! between calls.

pub mod execute;
pub mod locate;
pub mod resolve;
pub mod visibility;

use crate::core::value::{Obj, Symbol, TypeKey, Val};
use crate::error::{AccessError, MemberKind};
use crate::runtime::class::{ClassRegistry, MethodDef};

pub struct Accessor<'a> {
    registry: &'a ClassRegistry,
}

impl<'a> Accessor<'a> {
    pub fn new(registry: &'a ClassRegistry) -> Self {
        Self { registry }
    }

    /// Read a field of `obj`, resolved from its runtime class with
    /// shadowing semantics. Static fields are readable through an
    /// instance as well.
    pub fn get_field(&self, obj: &Obj, name: &str) -> Result<Val, AccessError> {
        let class = obj.borrow().class;
        let (declaring, field) = locate::find_field(self.registry, class, name)?;
        execute::read_field(self.registry, Some(obj), declaring, field)
    }

    /// Write a field of `obj`. The value must be assignable to the
    /// declared field type; on failure the object is left untouched.
    pub fn set_field(&self, obj: &Obj, name: &str, value: Val) -> Result<(), AccessError> {
        let class = obj.borrow().class;
        let (declaring, field) = locate::find_field(self.registry, class, name)?;
        execute::write_field(self.registry, Some(obj), declaring, field, &value)
    }

    /// Read a static field of `class` or an ancestor. Works with zero
    /// live instances of the class.
    pub fn get_static_field(&self, class: Symbol, name: &str) -> Result<Val, AccessError> {
        let (declaring, field) = locate::find_field(self.registry, class, name)?;
        execute::read_field(self.registry, None, declaring, field)
    }

    pub fn set_static_field(
        &self,
        class: Symbol,
        name: &str,
        value: Val,
    ) -> Result<(), AccessError> {
        let (declaring, field) = locate::find_field(self.registry, class, name)?;
        execute::write_field(self.registry, None, declaring, field, &value)
    }

    /// Invoke a method on `obj`, resolving overloads against the runtime
    /// types of `args`. A static method resolved through an instance is
    /// dispatched against its class.
    pub fn invoke_method(
        &self,
        obj: &Obj,
        name: &str,
        args: &[Val],
    ) -> Result<Val, AccessError> {
        let class = obj.borrow().class;
        let (declaring, method) = self.resolve_method(class, name, args)?;
        let this = (!method.is_static).then_some(obj);
        execute::invoke(self.registry, this, declaring, method, args)
    }

    /// Invoke a static method of `class` or an ancestor.
    pub fn invoke_static_method(
        &self,
        class: Symbol,
        name: &str,
        args: &[Val],
    ) -> Result<Val, AccessError> {
        let (declaring, method) = self.resolve_method(class, name, args)?;
        if !method.is_static {
            return Err(AccessError::StaticMismatch {
                class: self.registry.symbol_name(declaring).to_string(),
                member: name.to_string(),
                wanted_static: true,
            });
        }
        execute::invoke(self.registry, None, declaring, method, args)
    }

    /// Instantiate `class` through whichever constructor matches `args`,
    /// regardless of its visibility.
    pub fn new_instance(&self, class: Symbol, args: &[Val]) -> Result<Obj, AccessError> {
        let candidates = locate::ctor_candidates(self.registry, class)?;
        if candidates.is_empty() {
            return Err(AccessError::MemberNotFound {
                class: self.registry.symbol_name(class).to_string(),
                member: "<init>".to_string(),
                kind: MemberKind::Constructor,
            });
        }
        let signatures: Vec<&[TypeKey]> =
            candidates.iter().map(|c| c.params.as_slice()).collect();
        let index = resolve::resolve(self.registry, &signatures, args).map_err(|failure| {
            resolve::into_access_error(
                self.registry,
                failure,
                class,
                "<init>",
                MemberKind::Constructor,
            )
        })?;
        execute::construct(self.registry, class, &candidates[index], args)
    }

    fn resolve_method(
        &self,
        class: Symbol,
        name: &str,
        args: &[Val],
    ) -> Result<(Symbol, &'a MethodDef), AccessError> {
        let candidates = locate::method_candidates(self.registry, class, name);
        if candidates.is_empty() {
            return Err(AccessError::MemberNotFound {
                class: self.registry.symbol_name(class).to_string(),
                member: name.to_string(),
                kind: MemberKind::Method,
            });
        }
        let signatures: Vec<&[TypeKey]> =
            candidates.iter().map(|(_, m)| m.params.as_slice()).collect();
        let index = resolve::resolve(self.registry, &signatures, args).map_err(|failure| {
            resolve::into_access_error(self.registry, failure, class, name, MemberKind::Method)
        })?;
        Ok(candidates[index])
    }
}
