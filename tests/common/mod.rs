//! Shared fixture classes for accessor tests.
//!
//! `TestParent` and `TestChild` exercise the full member surface:
//! private fields of every primitive kind, arrays, a `List<String>`,
//! static and final fields, overloaded private constructors that
//! delegate to each other, and private/protected/static methods.

#![allow(dead_code)]

use pry_rs::core::value::{PrimKind, Symbol, TypeKey, Val, Visibility};
use pry_rs::runtime::class::{ClassBuilder, ClassRegistry};

pub struct Fixtures {
    pub registry: ClassRegistry,
    pub parent: Symbol,
    pub child: Symbol,
}

pub fn fixtures() -> Fixtures {
    let mut registry = ClassRegistry::new();
    let parent = registry
        .register(test_parent())
        .expect("register TestParent");
    let child = registry.register(test_child()).expect("register TestChild");
    Fixtures {
        registry,
        parent,
        child,
    }
}

fn test_parent() -> ClassBuilder {
    ClassBuilder::new("TestParent")
        .field("privateName", TypeKey::string(), Visibility::Private)
        .field("privateObject", TypeKey::object(), Visibility::Private)
        .static_field(
            "privateStaticInt",
            TypeKey::int(),
            Visibility::Private,
            Val::int(0),
        )
        .final_field("privateFinalInt", TypeKey::int(), Visibility::Private)
        .final_field("privateFinalString", TypeKey::string(), Visibility::Private)
        .static_final_field(
            "privateStaticFinalInt",
            TypeKey::int(),
            Visibility::Private,
            Val::int(3),
        )
        .static_final_field(
            "privateStaticFinalString",
            TypeKey::string(),
            Visibility::Private,
            Val::str("Tester"),
        )
        .ctor([TypeKey::string()], Visibility::Public, |ctx| {
            ctx.call_ctor(&[ctx.arg(0)?.clone(), Val::str("Brown")])
        })
        .ctor(
            [TypeKey::string(), TypeKey::object()],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateName", ctx.arg(0)?.clone())?;
                ctx.set_field("privateObject", ctx.arg(1)?.clone())?;
                ctx.set_static("privateStaticInt", Val::int(1))?;
                ctx.set_field("privateFinalInt", Val::int(2))?;
                ctx.set_field("privateFinalString", Val::str("Tom"))?;
                Ok(Val::Null)
            },
        )
        .ctor([], Visibility::Private, |ctx| {
            ctx.call_ctor(&[Val::str("Charlie"), Val::str("Brown")])
        })
        .method("getName", [], Visibility::Private, |ctx| {
            ctx.get_field("privateName")
        })
        .method(
            "setName",
            [TypeKey::string()],
            Visibility::Protected,
            |ctx| {
                ctx.set_field("privateName", ctx.arg(0)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method("setName", [], Visibility::Private, |ctx| {
            ctx.set_field("privateName", Val::str("Chaplin"))?;
            Ok(Val::Null)
        })
        .method("getObject", [], Visibility::Private, |ctx| {
            ctx.get_field("privateObject")
        })
        .method("setObject", [TypeKey::object()], Visibility::Private, |ctx| {
            ctx.set_field("privateObject", ctx.arg(0)?.clone())?;
            Ok(Val::Null)
        })
        .static_method(
            "setStaticInt",
            [TypeKey::int()],
            Visibility::Private,
            |ctx| {
                ctx.set_static("privateStaticInt", ctx.arg(0)?.clone())?;
                Ok(Val::Null)
            },
        )
        .static_method("getStaticInt", [], Visibility::Private, |ctx| {
            ctx.get_static("privateStaticInt")
        })
        .method("getFinalInt", [], Visibility::Private, |ctx| {
            ctx.get_field("privateFinalInt")
        })
        .method("getFinalString", [], Visibility::Private, |ctx| {
            ctx.get_field("privateFinalString")
        })
        .static_method("getStaticFinalInt", [], Visibility::Private, |ctx| {
            ctx.get_static("privateStaticFinalInt")
        })
        .static_method("getStaticFinalString", [], Visibility::Private, |ctx| {
            ctx.get_static("privateStaticFinalString")
        })
}

fn test_child() -> ClassBuilder {
    let builder = ClassBuilder::new("TestChild")
        .parent("TestParent")
        .field("privateInt", TypeKey::int(), Visibility::Private)
        .field("privateLong", TypeKey::long(), Visibility::Private)
        .field("privateShort", TypeKey::short(), Visibility::Private)
        .field("privateByte", TypeKey::byte(), Visibility::Private)
        .field("privateChar", TypeKey::ch(), Visibility::Private)
        .field("privateBoolean", TypeKey::boolean(), Visibility::Private)
        .field("privateFloat", TypeKey::float(), Visibility::Private)
        .field("privateDouble", TypeKey::double(), Visibility::Private)
        .field(
            "privateInts",
            TypeKey::array(TypeKey::int()),
            Visibility::Private,
        )
        .field(
            "privateStrings",
            TypeKey::array(TypeKey::string()),
            Visibility::Private,
        )
        .field(
            "privateObjects",
            TypeKey::array(TypeKey::object()),
            Visibility::Private,
        )
        .field(
            "privateCollection",
            TypeKey::list(TypeKey::string()),
            Visibility::Private,
        )
        .ctor(
            [TypeKey::string(), TypeKey::wrapper(PrimKind::Int)],
            Visibility::Private,
            |ctx| {
                ctx.call_super_ctor(&[ctx.arg(0)?.clone()])?;
                ctx.set_field("privateInt", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .ctor([TypeKey::string()], Visibility::Public, |ctx| {
            ctx.call_ctor(&[ctx.arg(0)?.clone(), Val::boxed_int(8)])
        })
        .method("getInt", [], Visibility::Private, |ctx| {
            ctx.get_field("privateInt")
        })
        .method("setInt", [TypeKey::int()], Visibility::Private, |ctx| {
            ctx.set_field("privateInt", ctx.arg(0)?.clone())?;
            Ok(Val::Null)
        })
        .method("isPrivateBoolean", [], Visibility::Private, |ctx| {
            ctx.get_field("privateBoolean")
        })
        .method(
            "setPrivateBoolean",
            [TypeKey::boolean()],
            Visibility::Private,
            set_arg0("privateBoolean"),
        )
        .method("getPrivateByte", [], Visibility::Private, |ctx| {
            ctx.get_field("privateByte")
        })
        .method(
            "setPrivateByte",
            [TypeKey::byte()],
            Visibility::Private,
            set_arg0("privateByte"),
        )
        .method("getPrivateChar", [], Visibility::Private, |ctx| {
            ctx.get_field("privateChar")
        })
        .method(
            "setPrivateChar",
            [TypeKey::ch()],
            Visibility::Private,
            set_arg0("privateChar"),
        )
        .method("getPrivateLong", [], Visibility::Private, |ctx| {
            ctx.get_field("privateLong")
        })
        .method(
            "setPrivateLong",
            [TypeKey::long()],
            Visibility::Private,
            set_arg0("privateLong"),
        )
        .method("getPrivateShort", [], Visibility::Private, |ctx| {
            ctx.get_field("privateShort")
        })
        .method(
            "setPrivateShort",
            [TypeKey::short()],
            Visibility::Private,
            set_arg0("privateShort"),
        )
        .method("getPrivateDouble", [], Visibility::Private, |ctx| {
            ctx.get_field("privateDouble")
        })
        .method(
            "setPrivateDouble",
            [TypeKey::double()],
            Visibility::Private,
            set_arg0("privateDouble"),
        )
        .method("getPrivateFloat", [], Visibility::Private, |ctx| {
            ctx.get_field("privateFloat")
        })
        .method(
            "setPrivateFloat",
            [TypeKey::float()],
            Visibility::Private,
            set_arg0("privateFloat"),
        )
        .method("getPrivateInts", [], Visibility::Private, |ctx| {
            ctx.get_field("privateInts")
        })
        .method(
            "setPrivateInts",
            [TypeKey::array(TypeKey::int())],
            Visibility::Private,
            set_arg0("privateInts"),
        )
        .method("getPrivateStrings", [], Visibility::Private, |ctx| {
            ctx.get_field("privateStrings")
        })
        .method(
            "setPrivateStrings",
            [TypeKey::array(TypeKey::string())],
            Visibility::Private,
            set_arg0("privateStrings"),
        )
        .method("getPrivateObjects", [], Visibility::Private, |ctx| {
            ctx.get_field("privateObjects")
        })
        .method(
            "setPrivateObjects",
            [TypeKey::array(TypeKey::object())],
            Visibility::Private,
            set_arg0("privateObjects"),
        )
        .method("getPrivateCollection", [], Visibility::Private, |ctx| {
            ctx.get_field("privateCollection")
        })
        .method(
            "setPrivateCollection",
            [TypeKey::list(TypeKey::string())],
            Visibility::Private,
            set_arg0("privateCollection"),
        );

    // The positional-overload family: same two parameter types in both
    // orders, plus sibling array overloads differing only in element
    // type.
    builder
        .method(
            "setPrivateStringsAndInt",
            [TypeKey::array(TypeKey::string()), TypeKey::int()],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateStrings", ctx.arg(0)?.clone())?;
                ctx.set_field("privateInt", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateObjectsAndInt",
            [TypeKey::array(TypeKey::object()), TypeKey::int()],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateObjects", ctx.arg(0)?.clone())?;
                ctx.set_field("privateInt", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateIntAndStrings",
            [TypeKey::int(), TypeKey::array(TypeKey::string())],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateInt", ctx.arg(0)?.clone())?;
                ctx.set_field("privateStrings", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateIntAndObjects",
            [TypeKey::int(), TypeKey::array(TypeKey::object())],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateInt", ctx.arg(0)?.clone())?;
                ctx.set_field("privateObjects", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateStringsAndObjects",
            [
                TypeKey::array(TypeKey::string()),
                TypeKey::array(TypeKey::object()),
            ],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateStrings", ctx.arg(0)?.clone())?;
                ctx.set_field("privateObjects", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateObjectsAndStrings",
            [
                TypeKey::array(TypeKey::object()),
                TypeKey::array(TypeKey::string()),
            ],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateObjects", ctx.arg(0)?.clone())?;
                ctx.set_field("privateStrings", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setPrivateObjectsAndObjects",
            [
                TypeKey::array(TypeKey::object()),
                TypeKey::array(TypeKey::object()),
            ],
            Visibility::Private,
            |ctx| {
                ctx.set_field("privateObjects", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
        .method(
            "setSumOfTwoInts",
            [TypeKey::int(), TypeKey::int()],
            Visibility::Private,
            |ctx| {
                let a = ctx.arg(0)?.as_int().unwrap_or(0);
                let b = ctx.arg(1)?.as_int().unwrap_or(0);
                ctx.set_field("privateInt", Val::int(a + b))?;
                Ok(Val::Null)
            },
        )
        .method(
            "setData",
            [TypeKey::string(), TypeKey::int()],
            Visibility::Private,
            |ctx| {
                ctx.call("setName", &[ctx.arg(0)?.clone()])?;
                ctx.set_field("privateInt", ctx.arg(1)?.clone())?;
                Ok(Val::Null)
            },
        )
}

/// Body that stores its single argument into `field`.
fn set_arg0(
    field: &'static str,
) -> impl Fn(pry_rs::runtime::class::CallCtx<'_>) -> anyhow::Result<Val> {
    move |ctx| {
        ctx.set_field(field, ctx.arg(0)?.clone())?;
        Ok(Val::Null)
    }
}

/// Convenience: a `String[]` value.
pub fn string_array(items: &[&str]) -> Val {
    Val::array(
        TypeKey::string(),
        items.iter().map(|s| Val::str(*s)).collect(),
    )
}

/// Convenience: an `Object[]` value.
pub fn object_array(items: Vec<Val>) -> Val {
    Val::array(TypeKey::object(), items)
}
