use std::collections::HashMap;

use crate::errors::errors::ErrorImpl;

use super::types::TypeId;

/// A lexical scope mapping names to types.
///
/// The parent is borrowed, so a child can never outlive the scope it was
/// opened in.
#[derive(Debug, Default)]
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    locals: HashMap<String, TypeId>,
}

impl<'p> Scope<'p> {
    pub fn new() -> Self {
        Scope {
            parent: None,
            locals: HashMap::new(),
        }
    }

    pub fn child(parent: &'p Scope<'p>) -> Self {
        Scope {
            parent: Some(parent),
            locals: HashMap::new(),
        }
    }

    /// Looks `name` up here, then in each ancestor.
    pub fn get(&self, name: &str) -> Result<TypeId, ErrorImpl> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(ty) = current.locals.get(name) {
                return Ok(*ty);
            }
            scope = current.parent;
        }

        Err(ErrorImpl::UnknownVariable { name: name.to_string() })
    }

    pub fn get_local(&self, name: &str) -> Option<TypeId> {
        self.locals.get(name).copied()
    }

    pub fn set_local(&mut self, name: &str, ty: TypeId) -> Result<(), ErrorImpl> {
        if self.locals.contains_key(name) {
            return Err(ErrorImpl::DuplicateLocal { name: name.to_string() });
        }
        self.locals.insert(name.to_string(), ty);
        Ok(())
    }

    /// Number of ancestors; the root scope has depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.parent;
        while let Some(parent) = scope {
            depth += 1;
            scope = parent.parent;
        }
        depth
    }

    pub fn locals(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.locals.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}
