//! Class definitions and the registry.
//!
//! Classes are registered at runtime through [`ClassBuilder`] and live in
//! a [`ClassRegistry`] for the lifetime of the test. The registry is
//! seeded with the builtin root class `Object`, `String`, and the eight
//! primitive wrapper classes. Member definitions are immutable once
//! registered; the only mutable member state is a static field's live
//! value and the per-member elevation flag, both behind interior
//! mutability so lookups never need `&mut`.

use crate::access::{execute, locate, resolve};
use crate::core::interner::Interner;
use crate::core::value::{
    builtin, Obj, ObjectData, Symbol, TypeKey, Val, Visibility,
};
use crate::error::{AccessError, MemberKind};
use anyhow::Context as _;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Ordered parameter-type list. Most members take few parameters.
pub type ParamList = SmallVec<[TypeKey; 4]>;

/// Native body of a method or constructor.
pub type MethodBody = Rc<dyn Fn(CallCtx<'_>) -> anyhow::Result<Val>>;

#[derive(Debug)]
pub struct FieldDef {
    pub name: Symbol,
    pub ty: TypeKey,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub default: Val,
    /// Live value; meaningful only when `is_static`.
    pub(crate) static_value: RefCell<Val>,
    /// Elevation flag, raised for the duration of a privileged call.
    pub(crate) accessible: Cell<bool>,
}

pub struct MethodDef {
    pub name: Symbol,
    pub params: ParamList,
    pub visibility: Visibility,
    pub is_static: bool,
    pub(crate) accessible: Cell<bool>,
    pub(crate) body: MethodBody,
}

impl std::fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .field("is_static", &self.is_static)
            .finish_non_exhaustive()
    }
}

pub struct CtorDef {
    pub params: ParamList,
    pub visibility: Visibility,
    pub(crate) accessible: Cell<bool>,
    pub(crate) body: MethodBody,
}

impl std::fmt::Debug for CtorDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtorDef")
            .field("params", &self.params)
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct ClassDef {
    pub name: Symbol,
    pub parent: Option<Symbol>,
    pub fields: IndexMap<Symbol, FieldDef>,
    /// Overload sets grouped by name.
    pub methods: HashMap<Symbol, Vec<MethodDef>>,
    pub ctors: Vec<CtorDef>,
}

#[derive(Debug)]
pub struct ClassRegistry {
    pub(crate) interner: Interner,
    classes: IndexMap<Symbol, ClassDef>,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Create a registry seeded with the builtin classes.
    pub fn new() -> Self {
        let mut reg = Self {
            interner: Interner::new(),
            classes: IndexMap::new(),
        };
        for name in builtin::NAMES {
            let sym = reg.interner.intern(name);
            let parent = (sym != builtin::OBJECT).then_some(builtin::OBJECT);
            reg.classes.insert(
                sym,
                ClassDef {
                    name: sym,
                    parent,
                    fields: IndexMap::new(),
                    methods: HashMap::new(),
                    ctors: Vec::new(),
                },
            );
        }
        debug_assert_eq!(reg.interner.find("Object"), Some(builtin::OBJECT));
        debug_assert_eq!(reg.interner.find("Double"), Some(builtin::DOUBLE));
        reg
    }

    /// Register a class built with [`ClassBuilder`]. The parent, if any,
    /// must already be registered, and the name must not be. Both rules
    /// together keep every parent chain finite.
    pub fn register(&mut self, builder: ClassBuilder) -> Result<Symbol, AccessError> {
        let parent = match &builder.parent {
            Some(name) => Some(self.class_named(name)?),
            None => Some(builtin::OBJECT),
        };
        let name = self.interner.intern(&builder.name);
        if self.classes.contains_key(&name) {
            return Err(AccessError::DuplicateClass { name: builder.name });
        }

        let mut fields = IndexMap::new();
        for spec in builder.fields {
            let fname = self.interner.intern(&spec.name);
            let default = spec
                .default
                .unwrap_or_else(|| Val::default_for(&spec.ty));
            fields.insert(
                fname,
                FieldDef {
                    name: fname,
                    ty: spec.ty,
                    visibility: spec.visibility,
                    is_static: spec.is_static,
                    is_final: spec.is_final,
                    static_value: RefCell::new(default.clone()),
                    accessible: Cell::new(false),
                    default,
                },
            );
        }

        let mut methods: HashMap<Symbol, Vec<MethodDef>> = HashMap::new();
        for spec in builder.methods {
            let mname = self.interner.intern(&spec.name);
            methods.entry(mname).or_default().push(MethodDef {
                name: mname,
                params: spec.params,
                visibility: spec.visibility,
                is_static: spec.is_static,
                accessible: Cell::new(false),
                body: spec.body,
            });
        }

        let ctors = builder
            .ctors
            .into_iter()
            .map(|spec| CtorDef {
                params: spec.params,
                visibility: spec.visibility,
                accessible: Cell::new(false),
                body: spec.body,
            })
            .collect();

        self.classes.insert(
            name,
            ClassDef {
                name,
                parent,
                fields,
                methods,
                ctors,
            },
        );
        Ok(name)
    }

    pub fn class(&self, sym: Symbol) -> Option<&ClassDef> {
        self.classes.get(&sym)
    }

    pub fn class_named(&self, name: &str) -> Result<Symbol, AccessError> {
        self.interner
            .find(name)
            .filter(|sym| self.classes.contains_key(sym))
            .ok_or_else(|| AccessError::NoSuchClass {
                name: name.to_string(),
            })
    }

    pub fn symbol_name(&self, sym: Symbol) -> &str {
        self.interner.lookup(sym).unwrap_or("?")
    }

    /// The symbol of an already-interned name, if any. Member names are
    /// interned at registration, so an unknown name means no such member
    /// exists anywhere.
    pub fn find_symbol(&self, name: &str) -> Option<Symbol> {
        self.interner.find(name)
    }

    /// Display form of a declared type, for error messages.
    pub fn type_name(&self, ty: &TypeKey) -> String {
        match ty {
            TypeKey::Prim(kind) => kind.type_name().to_string(),
            TypeKey::Class(sym) => self.symbol_name(*sym).to_string(),
            TypeKey::Array(elem) => format!("{}[]", self.type_name(elem)),
            TypeKey::List(elem) => format!("List<{}>", self.type_name(elem)),
        }
    }

    /// Display form of a value's runtime type.
    pub fn value_type_name(&self, value: &Val) -> String {
        match value.runtime_type() {
            Some(ty) => self.type_name(&ty),
            None => "null".to_string(),
        }
    }

    /// Allocate an object of `class` with every instance slot at every
    /// hierarchy level initialized to its declared default. Constructor
    /// bodies run against this.
    pub fn new_object(&self, class: Symbol) -> Result<Obj, AccessError> {
        if self.class(class).is_none() {
            return Err(AccessError::NoSuchClass {
                name: self.symbol_name(class).to_string(),
            });
        }
        let mut slots = IndexMap::new();
        for level in self.ancestors(class) {
            let def = match self.class(level) {
                Some(def) => def,
                None => continue,
            };
            for (fname, field) in &def.fields {
                if !field.is_static {
                    slots.insert((level, *fname), field.default.clone());
                }
            }
        }
        Ok(Rc::new(RefCell::new(ObjectData { class, slots })))
    }
}

struct FieldSpec {
    name: String,
    ty: TypeKey,
    visibility: Visibility,
    is_static: bool,
    is_final: bool,
    default: Option<Val>,
}

struct MethodSpec {
    name: String,
    params: ParamList,
    visibility: Visibility,
    is_static: bool,
    body: MethodBody,
}

struct CtorSpec {
    params: ParamList,
    visibility: Visibility,
    body: MethodBody,
}

/// Declarative class registration, in the spirit of native class
/// definitions provided by runtime extensions.
pub struct ClassBuilder {
    name: String,
    parent: Option<String>,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    ctors: Vec<CtorSpec>,
}

impl ClassBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            ctors: Vec::new(),
        }
    }

    pub fn parent(mut self, name: &str) -> Self {
        self.parent = Some(name.to_string());
        self
    }

    pub fn field(mut self, name: &str, ty: TypeKey, visibility: Visibility) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            ty,
            visibility,
            is_static: false,
            is_final: false,
            default: None,
        });
        self
    }

    /// Final instance field; its value is established by a constructor.
    pub fn final_field(mut self, name: &str, ty: TypeKey, visibility: Visibility) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            ty,
            visibility,
            is_static: false,
            is_final: true,
            default: None,
        });
        self
    }

    pub fn static_field(
        mut self,
        name: &str,
        ty: TypeKey,
        visibility: Visibility,
        init: Val,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            ty,
            visibility,
            is_static: true,
            is_final: false,
            default: Some(init),
        });
        self
    }

    pub fn static_final_field(
        mut self,
        name: &str,
        ty: TypeKey,
        visibility: Visibility,
        init: Val,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            ty,
            visibility,
            is_static: true,
            is_final: true,
            default: Some(init),
        });
        self
    }

    pub fn method(
        mut self,
        name: &str,
        params: impl IntoIterator<Item = TypeKey>,
        visibility: Visibility,
        body: impl Fn(CallCtx<'_>) -> anyhow::Result<Val> + 'static,
    ) -> Self {
        self.methods.push(MethodSpec {
            name: name.to_string(),
            params: params.into_iter().collect(),
            visibility,
            is_static: false,
            body: Rc::new(body),
        });
        self
    }

    pub fn static_method(
        mut self,
        name: &str,
        params: impl IntoIterator<Item = TypeKey>,
        visibility: Visibility,
        body: impl Fn(CallCtx<'_>) -> anyhow::Result<Val> + 'static,
    ) -> Self {
        self.methods.push(MethodSpec {
            name: name.to_string(),
            params: params.into_iter().collect(),
            visibility,
            is_static: true,
            body: Rc::new(body),
        });
        self
    }

    pub fn ctor(
        mut self,
        params: impl IntoIterator<Item = TypeKey>,
        visibility: Visibility,
        body: impl Fn(CallCtx<'_>) -> anyhow::Result<Val> + 'static,
    ) -> Self {
        self.ctors.push(CtorSpec {
            params: params.into_iter().collect(),
            visibility,
            body: Rc::new(body),
        });
        self
    }
}

/// What a native body sees while executing: the registry, the class the
/// body is declared on, the receiver (absent for static members and
/// during static dispatch) and the already-coerced argument values.
pub struct CallCtx<'a> {
    pub registry: &'a ClassRegistry,
    /// Declaring class of the executing body; the caller scope for any
    /// nested dispatch.
    pub class: Symbol,
    pub this: Option<&'a Obj>,
    pub args: &'a [Val],
}

impl CallCtx<'_> {
    /// The coerced argument at `index`. Asking past the arity the body
    /// was dispatched with is a body error, not a panic.
    pub fn arg(&self, index: usize) -> anyhow::Result<&Val> {
        self.args
            .get(index)
            .with_context(|| format!("missing argument {index}"))
    }

    fn this_obj(&self) -> anyhow::Result<&Obj> {
        self.this.context("instance member accessed without a receiver")
    }

    /// Read a field visible from the declaring class, with shadowing
    /// resolved from the declaring class upward. Visibility is enforced
    /// with the declaring class as caller scope.
    pub fn get_field(&self, name: &str) -> anyhow::Result<Val> {
        let (declaring, field) = locate::find_field(self.registry, self.class, name)?;
        execute::check_access(
            self.registry,
            declaring,
            field.name,
            field.visibility,
            field.accessible.get(),
            Some(self.class),
        )?;
        if field.is_static {
            return Ok(field.static_value.borrow().clone());
        }
        let this = self.this_obj()?;
        let slot = (declaring, field.name);
        Ok(this
            .borrow()
            .slots
            .get(&slot)
            .cloned()
            .unwrap_or_else(|| Val::default_for(&field.ty)))
    }

    pub fn set_field(&self, name: &str, value: Val) -> anyhow::Result<()> {
        let (declaring, field) = locate::find_field(self.registry, self.class, name)?;
        execute::check_access(
            self.registry,
            declaring,
            field.name,
            field.visibility,
            field.accessible.get(),
            Some(self.class),
        )?;
        let value = execute::coerce_checked(self.registry, &value, &field.ty, "field write")?;
        if field.is_static {
            *field.static_value.borrow_mut() = value;
            return Ok(());
        }
        let this = self.this_obj()?;
        this.borrow_mut().slots.insert((declaring, field.name), value);
        Ok(())
    }

    pub fn get_static(&self, name: &str) -> anyhow::Result<Val> {
        self.get_field(name)
    }

    pub fn set_static(&self, name: &str, value: Val) -> anyhow::Result<()> {
        self.set_field(name, value)
    }

    /// Dispatch a method with the declaring class as caller scope.
    /// Visibility is enforced; no elevation happens on this path.
    pub fn call(&self, name: &str, args: &[Val]) -> anyhow::Result<Val> {
        let start = match self.this {
            Some(obj) => obj.borrow().class,
            None => self.class,
        };
        let candidates = locate::method_candidates(self.registry, start, name);
        if candidates.is_empty() {
            return Err(AccessError::MemberNotFound {
                class: self.registry.symbol_name(start).to_string(),
                member: name.to_string(),
                kind: MemberKind::Method,
            }
            .into());
        }
        let signatures: Vec<&[TypeKey]> =
            candidates.iter().map(|(_, m)| m.params.as_slice()).collect();
        let index = resolve::resolve(self.registry, &signatures, args).map_err(|failure| {
            resolve::into_access_error(
                self.registry,
                failure,
                start,
                name,
                MemberKind::Method,
            )
        })?;
        let (declaring, method) = candidates[index];
        execute::check_access(
            self.registry,
            declaring,
            method.name,
            method.visibility,
            method.accessible.get(),
            Some(self.class),
        )?;
        let this = if method.is_static { None } else { Some(self.this_obj()?) };
        execute::call_body(
            self.registry,
            this,
            declaring,
            &method.params,
            &method.body,
            args,
        )
    }

    /// Delegate to another constructor of the declaring class, running it
    /// against the same receiver.
    pub fn call_ctor(&self, args: &[Val]) -> anyhow::Result<Val> {
        self.delegate_ctor(self.class, args)
    }

    /// Run an ancestor constructor against the same receiver.
    pub fn call_super_ctor(&self, args: &[Val]) -> anyhow::Result<Val> {
        let parent = self
            .registry
            .class(self.class)
            .and_then(|def| def.parent)
            .context("class has no parent")?;
        self.delegate_ctor(parent, args)
    }

    fn delegate_ctor(&self, class: Symbol, args: &[Val]) -> anyhow::Result<Val> {
        let this = self.this_obj()?;
        let candidates = locate::ctor_candidates(self.registry, class)?;
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
        let ctor = &candidates[index];
        execute::check_access(
            self.registry,
            class,
            class,
            ctor.visibility,
            ctor.accessible.get(),
            Some(self.class),
        )?;
        execute::call_body(
            self.registry,
            Some(this),
            class,
            &ctor.params,
            &ctor.body,
            args,
        )
    }
}
