//! Built-in types, modules and values installed into the root scope.

use tracing::debug;

use crate::errors::errors::{Error, ErrorImpl};
use crate::Position;

use super::{
    scope::Scope,
    types::{Primitive, TypeArena, TypeId},
};

/// Methods of `std.core.types.string` that are also exposed as instance
/// methods on `String`.
pub const STRING_METHODS: [&str; 2] = ["uppercase", "lowercase"];

/// Handles to the types created during bootstrap.
#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    pub root_object: TypeId,
    pub any: TypeId,
    pub object: TypeId,
    pub string: TypeId,
    pub integer: TypeId,
    pub boolean: TypeId,
    pub void: TypeId,
    pub console_type: TypeId,
    pub console: TypeId,
    pub std: TypeId,
    pub string_module: TypeId,
}

pub fn bootstrap(types: &mut TypeArena, scope: &mut Scope) -> Result<Intrinsics, Error> {
    bootstrap_impl(types, scope).map_err(|error| error.at(Position::null()))
}

fn bootstrap_impl(types: &mut TypeArena, scope: &mut Scope) -> Result<Intrinsics, ErrorImpl> {
    let root_object = types.alloc_root_object("Root");

    let any = types.alloc_primitive(Primitive::Any, root_object);
    let object = types.alloc_intrinsic_object("Object", root_object);
    let string = types.alloc_primitive(Primitive::String, root_object);
    let integer = types.alloc_primitive(Primitive::Integer, root_object);
    let boolean = types.alloc_primitive(Primitive::Boolean, root_object);
    let void = types.alloc_primitive(Primitive::Void, root_object);

    scope.set_local("Any", any)?;
    scope.set_local("Object", object)?;
    scope.set_local("String", string)?;
    scope.set_local("Integer", integer)?;
    scope.set_local("Number", integer)?;
    scope.set_local("Boolean", boolean)?;
    scope.set_local("Void", void)?;

    // std -> core -> types -> string
    let std = types.alloc_module("std");
    scope.set_local("std", std)?;
    let core = types.alloc_module("core");
    types.attach_module(std, core)?;
    let types_module = types.alloc_module("types");
    types.attach_module(core, types_module)?;
    let string_module = types.alloc_module("string");
    types.attach_module(types_module, string_module)?;

    for method in STRING_METHODS {
        let function = types.alloc_function(root_object, vec![string], Some(string));
        types.set_type_of_property(string_module, method, function)?;
        let shim = types.alloc_shim(root_object, string, function);
        types.set_type_of_property(string, method, shim)?;
    }

    let console_type = types.alloc_intrinsic_object("BuiltinConsole", object);
    let log = types.alloc_function(root_object, vec![any], Some(void));
    types.set_type_of_property(console_type, "log", log)?;
    types.set_flags_of_property(console_type, "log", "r")?;
    let console = types.alloc_instance(console_type);
    scope.set_local("console", console)?;

    debug!(types = types.len(), "bootstrapped intrinsics");

    Ok(Intrinsics {
        root_object,
        any,
        object,
        string,
        integer,
        boolean,
        void,
        console_type,
        console,
        std,
        string_module,
    })
}
