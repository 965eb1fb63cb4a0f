//! The type hierarchy.
//!
//! Every type lives in a [`TypeArena`] and is addressed by a copyable
//! [`TypeId`]. Links between types (supertypes, module parents, shim targets)
//! are plain handles, so the arena is the single owner of all types.

use std::{cell::OnceCell, fmt::Display, ops::Index, str::FromStr};

use indexmap::IndexMap;

use crate::errors::errors::ErrorImpl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tag carried by the intrinsic leaf objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Any,
    String,
    Integer,
    Boolean,
    Void,
}

impl Primitive {
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Any => "Any",
            Primitive::String => "String",
            Primitive::Integer => "Integer",
            Primitive::Boolean => "Boolean",
            Primitive::Void => "Void",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyFlags {
    pub read_only: bool,
}

impl FromStr for PropertyFlags {
    type Err = ErrorImpl;

    fn from_str(flags: &str) -> Result<Self, Self::Err> {
        let mut parsed = PropertyFlags::default();
        for flag in flags.chars() {
            match flag {
                'r' => parsed.read_only = true,
                _ => return Err(ErrorImpl::UnknownPropertyFlag { flag }),
            }
        }
        Ok(parsed)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    pub ty: Option<TypeId>,
    pub flags: PropertyFlags,
}

#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,
    pub supertype: Option<TypeId>,
    pub intrinsic: bool,
    pub is_root: bool,
    pub primitive: Option<Primitive>,
    pub properties: IndexMap<String, Property>,
}

#[derive(Debug, Clone)]
pub struct FunctionType {
    /// The root object of the type system that created this function.
    pub root: TypeId,
    pub params: Vec<TypeId>,
    pub ret: Option<TypeId>,
    pub is_instance_method: bool,
    /// For instance-method shims, the module function they forward to.
    pub shim_for: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct ModuleType {
    pub name: String,
    pub parent: Option<TypeId>,
    pub children: Vec<TypeId>,
    pub properties: IndexMap<String, Property>,
}

#[derive(Debug, Clone)]
pub struct InstanceType {
    pub of: TypeId,
}

/// Placeholder for a binding whose type is still being computed.
#[derive(Debug, Clone, Default)]
pub struct UnknownType {
    pub known: OnceCell<TypeId>,
}

#[derive(Debug, Clone)]
pub enum Type {
    Object(ObjectType),
    Function(FunctionType),
    Module(ModuleType),
    Instance(InstanceType),
    Unknown(UnknownType),
}

impl Type {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Object(_) => "Object",
            Type::Function(_) => "Function",
            Type::Module(_) => "Module",
            Type::Instance(_) => "Instance",
            Type::Unknown(_) => "Unknown",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Type::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleType> {
        match self {
            Type::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown(_))
    }
}

#[derive(Debug, Default)]
pub struct TypeArena {
    types: Vec<Type>,
}

impl TypeArena {
    pub fn new() -> Self {
        TypeArena { types: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, ty)| (TypeId(index as u32), ty))
    }

    fn alloc(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Allocates the root object, the only object without a supertype.
    pub fn alloc_root_object(&mut self, name: impl Into<String>) -> TypeId {
        self.alloc(Type::Object(ObjectType {
            name: name.into(),
            supertype: None,
            intrinsic: true,
            is_root: true,
            primitive: None,
            properties: IndexMap::new(),
        }))
    }

    pub fn alloc_object(&mut self, name: impl Into<String>, supertype: TypeId) -> TypeId {
        self.alloc(Type::Object(ObjectType {
            name: name.into(),
            supertype: Some(supertype),
            intrinsic: false,
            is_root: false,
            primitive: None,
            properties: IndexMap::new(),
        }))
    }

    pub fn alloc_intrinsic_object(&mut self, name: impl Into<String>, supertype: TypeId) -> TypeId {
        let id = self.alloc_object(name, supertype);
        if let Type::Object(object) = &mut self.types[id.index()] {
            object.intrinsic = true;
        }
        id
    }

    pub fn alloc_primitive(&mut self, primitive: Primitive, supertype: TypeId) -> TypeId {
        self.alloc(Type::Object(ObjectType {
            name: primitive.name().to_string(),
            supertype: Some(supertype),
            intrinsic: true,
            is_root: false,
            primitive: Some(primitive),
            properties: IndexMap::new(),
        }))
    }

    pub fn alloc_function(&mut self, root: TypeId, params: Vec<TypeId>, ret: Option<TypeId>) -> TypeId {
        self.alloc(Type::Function(FunctionType {
            root,
            params,
            ret,
            is_instance_method: false,
            shim_for: None,
        }))
    }

    /// Allocates a zero-argument instance method forwarding to `target`.
    pub fn alloc_shim(&mut self, root: TypeId, ret: TypeId, target: TypeId) -> TypeId {
        self.alloc(Type::Function(FunctionType {
            root,
            params: Vec::new(),
            ret: Some(ret),
            is_instance_method: true,
            shim_for: Some(target),
        }))
    }

    pub fn alloc_module(&mut self, name: impl Into<String>) -> TypeId {
        self.alloc(Type::Module(ModuleType {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            properties: IndexMap::new(),
        }))
    }

    pub fn alloc_instance(&mut self, of: TypeId) -> TypeId {
        self.alloc(Type::Instance(InstanceType { of }))
    }

    pub fn alloc_unknown(&mut self) -> TypeId {
        self.alloc(Type::Unknown(UnknownType::default()))
    }

    fn properties_mut(&mut self, owner: TypeId) -> Result<&mut IndexMap<String, Property>, ErrorImpl> {
        let described = self.describe(owner);
        match &mut self.types[owner.index()] {
            Type::Object(object) => Ok(&mut object.properties),
            Type::Module(module) => Ok(&mut module.properties),
            _ => Err(ErrorImpl::NotPropertyBearing { type_: described }),
        }
    }

    pub fn set_type_of_property(&mut self, owner: TypeId, name: &str, ty: TypeId) -> Result<(), ErrorImpl> {
        self.properties_mut(owner)?
            .entry(name.to_string())
            .or_default()
            .ty = Some(ty);
        Ok(())
    }

    /// Parses `flags` (e.g. `"r"`) and stores them on the property.
    pub fn set_flags_of_property(&mut self, owner: TypeId, name: &str, flags: &str) -> Result<(), ErrorImpl> {
        let flags = flags.parse::<PropertyFlags>()?;
        self.properties_mut(owner)?
            .entry(name.to_string())
            .or_default()
            .flags = flags;
        Ok(())
    }

    fn module_mut(&mut self, id: TypeId) -> Result<&mut ModuleType, ErrorImpl> {
        let described = self.describe(id);
        match &mut self.types[id.index()] {
            Type::Module(module) => Ok(module),
            _ => Err(ErrorImpl::NotPropertyBearing { type_: described }),
        }
    }

    pub fn set_parent(&mut self, child: TypeId, parent: TypeId) -> Result<(), ErrorImpl> {
        self.module_mut(parent)?;
        let module = self.module_mut(child)?;
        if module.parent.is_some() {
            return Err(ErrorImpl::ModuleAlreadyParented { module: module.name.clone() });
        }
        module.parent = Some(parent);
        Ok(())
    }

    pub fn add_child(&mut self, parent: TypeId, child: TypeId) -> Result<(), ErrorImpl> {
        let child_name = self.module_mut(child)?.name.clone();
        let module = self.module_mut(parent)?;
        if module.children.contains(&child) {
            return Err(ErrorImpl::ModuleAlreadyChild { module: child_name });
        }
        module.children.push(child);
        Ok(())
    }

    /// Links `child` under `parent` in both directions.
    pub fn attach_module(&mut self, parent: TypeId, child: TypeId) -> Result<(), ErrorImpl> {
        self.set_parent(child, parent)?;
        self.add_child(parent, child)
    }

    /// Fills an Unknown placeholder. The first resolution wins; any later one,
    /// or resolving something that is not a placeholder, is an error.
    pub fn resolve_unknown(&self, id: TypeId, known: TypeId) -> Result<(), ErrorImpl> {
        match &self.types[id.index()] {
            Type::Unknown(unknown) => unknown
                .known
                .set(known)
                .map_err(|_| ErrorImpl::PlaceholderAlreadyResolved),
            _ => Err(ErrorImpl::PlaceholderAlreadyResolved),
        }
    }

    /// Looks through a placeholder. Concrete types resolve to themselves, an
    /// empty placeholder to `None`.
    pub fn known(&self, id: TypeId) -> Option<TypeId> {
        match &self.types[id.index()] {
            Type::Unknown(unknown) => unknown.known.get().copied(),
            _ => Some(id),
        }
    }

    /// Nominal equality.
    pub fn equals(&self, a: TypeId, b: TypeId) -> bool {
        a == b
    }

    pub fn property_of(&self, owner: TypeId, name: &str) -> Option<&Property> {
        match &self.types[owner.index()] {
            Type::Object(_) => self
                .supertypes_inclusive(owner)
                .filter_map(|id| self.types[id.index()].as_object())
                .find_map(|object| object.properties.get(name)),
            Type::Module(module) => module.properties.get(name),
            Type::Instance(instance) => self.property_of(instance.of, name),
            Type::Unknown(_) => self.known(owner).and_then(|id| self.property_of(id, name)),
            Type::Function(_) => None,
        }
    }

    pub fn child_module(&self, module: TypeId, name: &str) -> Option<TypeId> {
        let module = self.types[module.index()].as_module()?;
        module.children.iter().copied().find(|child| {
            self.types[child.index()]
                .as_module()
                .is_some_and(|child| child.name == name)
        })
    }

    /// Walks the supertype chain, starting at the direct supertype of `id`.
    pub fn supertypes(&self, id: TypeId) -> Supertypes<'_> {
        let next = self.types[id.index()].as_object().and_then(|object| object.supertype);
        Supertypes { arena: self, next }
    }

    fn supertypes_inclusive(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::once(id).chain(self.supertypes(id))
    }

    pub fn is_subtype_of(&self, a: TypeId, b: TypeId) -> bool {
        self.supertypes_inclusive(a).any(|id| id == b)
    }

    /// Human readable rendering used in diagnostics.
    pub fn describe(&self, id: TypeId) -> String {
        let Some(ty) = self.types.get(id.index()) else {
            return format!("<invalid {}>", id);
        };
        match ty {
            Type::Object(object) => object.name.clone(),
            Type::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|param| self.describe(*param))
                    .collect::<Vec<_>>()
                    .join(", ");
                let ret = match function.ret {
                    Some(ret) => self.describe(ret),
                    None => String::from("?"),
                };
                format!("({}) -> {}", params, ret)
            },
            Type::Module(module) => format!("module {}", module.name),
            Type::Instance(instance) => format!("instance of {}", self.describe(instance.of)),
            Type::Unknown(unknown) => match unknown.known.get() {
                Some(known) => self.describe(*known),
                None => String::from("unknown"),
            },
        }
    }
}

impl Index<TypeId> for TypeArena {
    type Output = Type;

    fn index(&self, id: TypeId) -> &Self::Output {
        &self.types[id.index()]
    }
}

pub struct Supertypes<'a> {
    arena: &'a TypeArena,
    next: Option<TypeId>,
}

impl Iterator for Supertypes<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.arena[current].as_object().and_then(|object| object.supertype);
        Some(current)
    }
}
