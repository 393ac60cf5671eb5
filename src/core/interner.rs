use crate::core::value::Symbol;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<String, Symbol>,
    vec: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let sym = Symbol(self.vec.len() as u32);
        self.vec.push(s.to_string());
        self.map.insert(s.to_string(), sym);
        sym
    }

    pub fn find(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    pub fn lookup(&self, sym: Symbol) -> Option<&str> {
        self.vec.get(sym.0 as usize).map(|v| v.as_str())
    }
}
