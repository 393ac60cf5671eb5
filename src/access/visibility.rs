//! Visibility rules for class members.
//!
//! Public is accessible from anywhere, protected from the defining class
//! or a subclass of it, private only from the defining class itself.
//! These rules govern the ordinary dispatch path; the privileged
//! executor bypasses them solely through a member's elevation flag.

use crate::core::value::{Symbol, Visibility};
use crate::runtime::class::ClassRegistry;

impl ClassRegistry {
    /// Whether a member declared on `defining_class` with `visibility`
    /// is accessible from `caller_scope` (`None` means outside any
    /// class body).
    pub fn is_visible_from(
        &self,
        defining_class: Symbol,
        visibility: Visibility,
        caller_scope: Option<Symbol>,
    ) -> bool {
        match visibility {
            Visibility::Public => true,
            Visibility::Protected => caller_scope
                .map(|scope| self.is_subclass_of(scope, defining_class))
                .unwrap_or(false),
            Visibility::Private => Some(defining_class) == caller_scope,
        }
    }
}
