use crate::behavior::Objectable;
use crate::hash::{KEYWORD_SALT, SYMBOL_SALT, hash_combine};
use crate::interner::InternedName;
use crate::object::Object;

/// `:name`. Keywords with the same name share one interned id, so equality
/// never compares strings.
#[derive(Debug)]
pub struct Keyword {
    name: InternedName,
}

impl Keyword {
    pub fn new(name: &str) -> Self {
        Keyword {
            name: InternedName::new(name),
        }
    }

    pub fn name(&self) -> String {
        self.name.resolve()
    }
}

impl Objectable for Keyword {
    fn render(&self, buff: &mut String) {
        buff.push(':');
        self.name.with_str(|s| buff.push_str(s));
    }

    fn to_hash(&self) -> u64 {
        hash_combine(self.name.content_hash(), KEYWORD_SALT)
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::Keyword(k) if k.name == self.name)
    }
}

crate::object_behavior!(Keyword => Keyword []);

#[derive(Debug)]
pub struct Symbol {
    name: InternedName,
}

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol {
            name: InternedName::new(name),
        }
    }

    pub fn name(&self) -> String {
        self.name.resolve()
    }
}

impl Objectable for Symbol {
    fn render(&self, buff: &mut String) {
        self.name.with_str(|s| buff.push_str(s));
    }

    fn to_hash(&self) -> u64 {
        hash_combine(self.name.content_hash(), SYMBOL_SALT)
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::Symbol(s) if s.name == self.name)
    }
}

crate::object_behavior!(Symbol => Symbol []);
