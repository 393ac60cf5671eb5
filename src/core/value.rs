//! Dynamic values and runtime type handles.
//!
//! A [`Val`] is the runtime representation of any value the accessor can
//! read, write or pass as an argument. Scalars exist in two forms: raw
//! ([`Val::Prim`]) and wrapper-object ([`Val::Boxed`]), and overload
//! resolution treats the two as distinct runtime types. Arrays and lists
//! carry their declared element type so parameter matching can compare
//! declared types exactly.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Interned name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Symbol(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// Well-known classes seeded by the registry, in interning order.
pub mod builtin {
    use super::Symbol;

    pub const OBJECT: Symbol = Symbol(0);
    pub const STRING: Symbol = Symbol(1);
    pub const BOOLEAN: Symbol = Symbol(2);
    pub const CHARACTER: Symbol = Symbol(3);
    pub const BYTE: Symbol = Symbol(4);
    pub const SHORT: Symbol = Symbol(5);
    pub const INTEGER: Symbol = Symbol(6);
    pub const LONG: Symbol = Symbol(7);
    pub const FLOAT: Symbol = Symbol(8);
    pub const DOUBLE: Symbol = Symbol(9);

    /// Names in the exact order `ClassRegistry::new` interns them.
    pub const NAMES: [&str; 10] = [
        "Object",
        "String",
        "Boolean",
        "Character",
        "Byte",
        "Short",
        "Integer",
        "Long",
        "Float",
        "Double",
    ];
}

/// The eight primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimKind {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimKind {
    pub fn type_name(self) -> &'static str {
        match self {
            PrimKind::Bool => "boolean",
            PrimKind::Char => "char",
            PrimKind::Byte => "byte",
            PrimKind::Short => "short",
            PrimKind::Int => "int",
            PrimKind::Long => "long",
            PrimKind::Float => "float",
            PrimKind::Double => "double",
        }
    }

    /// The builtin wrapper class corresponding to this kind.
    pub fn wrapper_symbol(self) -> Symbol {
        match self {
            PrimKind::Bool => builtin::BOOLEAN,
            PrimKind::Char => builtin::CHARACTER,
            PrimKind::Byte => builtin::BYTE,
            PrimKind::Short => builtin::SHORT,
            PrimKind::Int => builtin::INTEGER,
            PrimKind::Long => builtin::LONG,
            PrimKind::Float => builtin::FLOAT,
            PrimKind::Double => builtin::DOUBLE,
        }
    }

    /// Inverse of [`PrimKind::wrapper_symbol`].
    pub fn of_wrapper(sym: Symbol) -> Option<PrimKind> {
        match sym {
            builtin::BOOLEAN => Some(PrimKind::Bool),
            builtin::CHARACTER => Some(PrimKind::Char),
            builtin::BYTE => Some(PrimKind::Byte),
            builtin::SHORT => Some(PrimKind::Short),
            builtin::INTEGER => Some(PrimKind::Int),
            builtin::LONG => Some(PrimKind::Long),
            builtin::FLOAT => Some(PrimKind::Float),
            builtin::DOUBLE => Some(PrimKind::Double),
            _ => None,
        }
    }
}

/// A scalar of one primitive kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimVal {
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl PrimVal {
    pub fn kind(self) -> PrimKind {
        match self {
            PrimVal::Bool(_) => PrimKind::Bool,
            PrimVal::Char(_) => PrimKind::Char,
            PrimVal::Byte(_) => PrimKind::Byte,
            PrimVal::Short(_) => PrimKind::Short,
            PrimVal::Int(_) => PrimKind::Int,
            PrimVal::Long(_) => PrimKind::Long,
            PrimVal::Float(_) => PrimKind::Float,
            PrimVal::Double(_) => PrimKind::Double,
        }
    }

    /// The default value of a kind (all-zero, like an uninitialized field).
    pub fn zero(kind: PrimKind) -> PrimVal {
        match kind {
            PrimKind::Bool => PrimVal::Bool(false),
            PrimKind::Char => PrimVal::Char('\0'),
            PrimKind::Byte => PrimVal::Byte(0),
            PrimKind::Short => PrimVal::Short(0),
            PrimKind::Int => PrimVal::Int(0),
            PrimKind::Long => PrimVal::Long(0),
            PrimKind::Float => PrimVal::Float(0.0),
            PrimKind::Double => PrimVal::Double(0.0),
        }
    }
}

/// Declared-type handle: what a field, parameter or array element is
/// declared as. Runtime types reuse the same representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Prim(PrimKind),
    Class(Symbol),
    Array(Box<TypeKey>),
    List(Box<TypeKey>),
}

impl TypeKey {
    pub fn class(sym: Symbol) -> Self {
        TypeKey::Class(sym)
    }

    pub fn object() -> Self {
        TypeKey::Class(builtin::OBJECT)
    }

    pub fn string() -> Self {
        TypeKey::Class(builtin::STRING)
    }

    /// The wrapper class type of a primitive kind.
    pub fn wrapper(kind: PrimKind) -> Self {
        TypeKey::Class(kind.wrapper_symbol())
    }

    pub fn int() -> Self {
        TypeKey::Prim(PrimKind::Int)
    }

    pub fn long() -> Self {
        TypeKey::Prim(PrimKind::Long)
    }

    pub fn short() -> Self {
        TypeKey::Prim(PrimKind::Short)
    }

    pub fn byte() -> Self {
        TypeKey::Prim(PrimKind::Byte)
    }

    pub fn ch() -> Self {
        TypeKey::Prim(PrimKind::Char)
    }

    pub fn boolean() -> Self {
        TypeKey::Prim(PrimKind::Bool)
    }

    pub fn float() -> Self {
        TypeKey::Prim(PrimKind::Float)
    }

    pub fn double() -> Self {
        TypeKey::Prim(PrimKind::Double)
    }

    pub fn array(elem: TypeKey) -> Self {
        TypeKey::Array(Box::new(elem))
    }

    pub fn list(elem: TypeKey) -> Self {
        TypeKey::List(Box::new(elem))
    }

    pub fn is_prim(&self) -> bool {
        matches!(self, TypeKey::Prim(_))
    }
}

/// Shared handle to a live object.
pub type Obj = Rc<RefCell<ObjectData>>;

#[derive(Debug, Clone)]
pub enum Val {
    Null,
    /// Raw scalar.
    Prim(PrimVal),
    /// Wrapper-object scalar.
    Boxed(PrimVal),
    Str(Rc<String>),
    Array {
        elem: TypeKey,
        items: Rc<RefCell<Vec<Val>>>,
    },
    List {
        elem: TypeKey,
        items: Rc<RefCell<Vec<Val>>>,
    },
    Object(Obj),
}

impl PartialEq for Val {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Val::Null, Val::Null) => true,
            (Val::Prim(a), Val::Prim(b)) => a == b,
            (Val::Boxed(a), Val::Boxed(b)) => a == b,
            (Val::Str(a), Val::Str(b)) => a == b,
            (
                Val::Array { elem: ea, items: ia },
                Val::Array { elem: eb, items: ib },
            ) => ea == eb && *ia.borrow() == *ib.borrow(),
            (
                Val::List { elem: ea, items: ia },
                Val::List { elem: eb, items: ib },
            ) => ea == eb && *ia.borrow() == *ib.borrow(),
            (Val::Object(a), Val::Object(b)) => {
                Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow()
            }
            _ => false,
        }
    }
}

impl Val {
    pub fn int(v: i32) -> Self {
        Val::Prim(PrimVal::Int(v))
    }

    pub fn long(v: i64) -> Self {
        Val::Prim(PrimVal::Long(v))
    }

    pub fn short(v: i16) -> Self {
        Val::Prim(PrimVal::Short(v))
    }

    pub fn byte(v: i8) -> Self {
        Val::Prim(PrimVal::Byte(v))
    }

    pub fn ch(v: char) -> Self {
        Val::Prim(PrimVal::Char(v))
    }

    pub fn bool(v: bool) -> Self {
        Val::Prim(PrimVal::Bool(v))
    }

    pub fn float(v: f32) -> Self {
        Val::Prim(PrimVal::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Val::Prim(PrimVal::Double(v))
    }

    pub fn boxed(v: PrimVal) -> Self {
        Val::Boxed(v)
    }

    pub fn boxed_int(v: i32) -> Self {
        Val::Boxed(PrimVal::Int(v))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Val::Str(Rc::new(s.into()))
    }

    pub fn array(elem: TypeKey, items: Vec<Val>) -> Self {
        Val::Array {
            elem,
            items: Rc::new(RefCell::new(items)),
        }
    }

    pub fn list(elem: TypeKey, items: Vec<Val>) -> Self {
        Val::List {
            elem,
            items: Rc::new(RefCell::new(items)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Val::Null)
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Val::Prim(PrimVal::Int(v)) | Val::Boxed(PrimVal::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Val::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The runtime type of this value, or `None` for null. A boxed
    /// scalar's runtime type is its wrapper class, a raw scalar's is the
    /// primitive kind itself.
    pub fn runtime_type(&self) -> Option<TypeKey> {
        match self {
            Val::Null => None,
            Val::Prim(p) => Some(TypeKey::Prim(p.kind())),
            Val::Boxed(p) => Some(TypeKey::Class(p.kind().wrapper_symbol())),
            Val::Str(_) => Some(TypeKey::Class(builtin::STRING)),
            Val::Array { elem, .. } => Some(TypeKey::Array(Box::new(elem.clone()))),
            Val::List { elem, .. } => Some(TypeKey::List(Box::new(elem.clone()))),
            Val::Object(o) => Some(TypeKey::Class(o.borrow().class)),
        }
    }

    /// Default value for a declared type: zero for primitives, null for
    /// everything else. Matches uninitialized field semantics.
    pub fn default_for(ty: &TypeKey) -> Val {
        match ty {
            TypeKey::Prim(kind) => Val::Prim(PrimVal::zero(*kind)),
            _ => Val::Null,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Val::Null => "null",
            Val::Prim(_) => "primitive",
            Val::Boxed(_) => "boxed",
            Val::Str(_) => "string",
            Val::Array { .. } => "array",
            Val::List { .. } => "list",
            Val::Object(_) => "object",
        }
    }
}

/// Payload of a live object. Field slots are keyed by *(declaring class,
/// field name)* so a field shadowed at a more derived level occupies a
/// slot distinct from its ancestor's.
#[derive(Debug, Clone)]
pub struct ObjectData {
    pub class: Symbol,
    pub slots: IndexMap<(Symbol, Symbol), Val>,
}

impl PartialEq for ObjectData {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.slots == other.slots
    }
}
