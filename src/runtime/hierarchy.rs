//! Ancestor-chain walking.
//!
//! Class hierarchies are single-inheritance and acyclic by construction:
//! a parent must be registered before any of its subclasses and a
//! registered name cannot be redefined, so a chain always terminates at
//! the builtin root class. The walk is recomputed
//! from the live registry on every call; hierarchy shape never changes
//! for a registered class.

use crate::core::value::Symbol;
use crate::runtime::class::ClassRegistry;

impl ClassRegistry {
    /// The ordered ancestor chain of `class`: the class itself first,
    /// then each parent, ending at the root class inclusive.
    pub fn ancestors(&self, class: Symbol) -> Vec<Symbol> {
        let mut chain = Vec::new();
        let mut current = Some(class);
        while let Some(sym) = current {
            chain.push(sym);
            current = self.class(sym).and_then(|def| def.parent);
        }
        chain
    }

    /// Whether `child` is `parent` or a subclass of it.
    pub fn is_subclass_of(&self, child: Symbol, parent: Symbol) -> bool {
        let mut current = Some(child);
        while let Some(sym) = current {
            if sym == parent {
                return true;
            }
            current = self.class(sym).and_then(|def| def.parent);
        }
        false
    }
}
