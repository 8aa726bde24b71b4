use std::fmt::Write;
use std::sync::Arc;

use crate::behavior::{AssociativelyReadable, Countable, Objectable, Seqable};
use crate::hash::{hash_integer, hash_real, hash_str};
use crate::object::{Object, nil};

const NIL_HASH: u64 = 0;
const TRUE_HASH: u64 = 1231;
const FALSE_HASH: u64 = 1237;

// ============================================================================
// Nil
// ============================================================================

/// The empty value. Only one instance exists; see [`crate::object::nil`].
#[derive(Debug)]
pub struct Nil {
    _private: (),
}

impl Nil {
    pub(crate) const fn new() -> Self {
        Nil { _private: () }
    }
}

impl Objectable for Nil {
    fn render(&self, buff: &mut String) {
        buff.push_str("nil");
    }

    fn to_hash(&self) -> u64 {
        NIL_HASH
    }

    fn equal(&self, other: &Object) -> bool {
        other.is_nil()
    }
}

impl Seqable for Nil {
    fn seq(self: &Arc<Self>) -> Object {
        nil()
    }

    fn fresh_seq(self: &Arc<Self>) -> Object {
        nil()
    }
}

impl Countable for Nil {
    fn count(&self) -> usize {
        0
    }
}

impl AssociativelyReadable for Nil {
    fn get(&self, _key: &Object) -> Object {
        nil()
    }

    fn get_or(&self, _key: &Object, fallback: &Object) -> Object {
        fallback.clone()
    }
}

crate::object_behavior!(Nil => Nil [Seqable, Countable, AssociativelyReadable]);

// ============================================================================
// Boolean
// ============================================================================

#[derive(Debug)]
pub struct Boolean {
    value: bool,
}

impl Boolean {
    pub fn new(value: bool) -> Self {
        Boolean { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl Objectable for Boolean {
    fn render(&self, buff: &mut String) {
        buff.push_str(if self.value { "true" } else { "false" });
    }

    fn to_hash(&self) -> u64 {
        if self.value { TRUE_HASH } else { FALSE_HASH }
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::Boolean(b) if b.value == self.value)
    }
}

crate::object_behavior!(Boolean => Boolean []);

// ============================================================================
// Numbers
// ============================================================================

#[derive(Debug)]
pub struct Integer {
    value: i64,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Integer { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Objectable for Integer {
    fn render(&self, buff: &mut String) {
        let _ = write!(buff, "{}", self.value);
    }

    fn to_hash(&self) -> u64 {
        hash_integer(self.value)
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::Integer(i) if i.value == self.value)
    }
}

crate::object_behavior!(Integer => Integer []);

/// A double-precision float. Never equal to an [`Integer`], even when the
/// numeric values coincide. Equality is reflexive: every NaN equals every
/// other NaN, so a map holding one still equals itself.
#[derive(Debug)]
pub struct Real {
    value: f64,
}

impl Real {
    pub fn new(value: f64) -> Self {
        Real { value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Objectable for Real {
    fn render(&self, buff: &mut String) {
        if self.value.is_nan() {
            buff.push_str("##NaN");
        } else if self.value.is_infinite() {
            buff.push_str(if self.value > 0.0 { "##Inf" } else { "##-Inf" });
        } else {
            let _ = write!(buff, "{:?}", self.value);
        }
    }

    fn to_hash(&self) -> u64 {
        hash_real(self.value)
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::Real(r) if r.value == self.value
            || (r.value.is_nan() && self.value.is_nan()))
    }
}

crate::object_behavior!(Real => Real []);

// ============================================================================
// Strings
// ============================================================================

#[derive(Debug)]
pub struct PersistentString {
    data: String,
}

impl PersistentString {
    pub fn new(data: impl Into<String>) -> Self {
        PersistentString { data: data.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl Objectable for PersistentString {
    fn render(&self, buff: &mut String) {
        buff.push('"');
        for c in self.data.chars() {
            match c {
                '"' => buff.push_str("\\\""),
                '\\' => buff.push_str("\\\\"),
                '\n' => buff.push_str("\\n"),
                '\t' => buff.push_str("\\t"),
                '\r' => buff.push_str("\\r"),
                c => buff.push(c),
            }
        }
        buff.push('"');
    }

    fn to_hash(&self) -> u64 {
        hash_str(&self.data)
    }

    fn equal(&self, other: &Object) -> bool {
        matches!(other, Object::PersistentString(s) if s.data == self.data)
    }
}

crate::object_behavior!(PersistentString => PersistentString []);

#[cfg(test)]
mod tests {
    use crate::obj::{boolean, integer, real, string};
    use crate::object::nil;

    #[test]
    fn test_render_scalars() {
        assert_eq!(nil().to_string(), "nil");
        assert_eq!(boolean(true).to_string(), "true");
        assert_eq!(boolean(false).to_string(), "false");
        assert_eq!(integer(-42).to_string(), "-42");
        assert_eq!(real(1.0).to_string(), "1.0");
        assert_eq!(real(0.25).to_string(), "0.25");
    }

    #[test]
    fn test_render_special_reals() {
        assert_eq!(real(f64::NAN).to_string(), "##NaN");
        assert_eq!(real(f64::INFINITY).to_string(), "##Inf");
        assert_eq!(real(f64::NEG_INFINITY).to_string(), "##-Inf");
    }

    #[test]
    fn test_render_string_escapes() {
        assert_eq!(string("hi").to_string(), "\"hi\"");
        assert_eq!(
            string("a\"b\\c\nd").to_string(),
            "\"a\\\"b\\\\c\\nd\""
        );
    }

    #[test]
    fn test_integer_and_real_are_distinct() {
        assert_ne!(integer(1), real(1.0));
        assert_eq!(integer(1), integer(1));
        assert_eq!(real(0.0), real(-0.0));
        assert_eq!(real(0.0).to_hash(), real(-0.0).to_hash());
    }

    #[test]
    fn test_nan_equals_itself() {
        let nan = real(f64::NAN);
        assert!(nan.equal(&nan));
        assert_eq!(nan, real(-f64::NAN));
        assert_eq!(nan.to_hash(), real(-f64::NAN).to_hash());
        assert_ne!(nan, real(0.0));
    }

    #[test]
    fn test_booleans_hash_apart() {
        assert_ne!(boolean(true).to_hash(), boolean(false).to_hash());
        assert_eq!(boolean(true), boolean(true));
    }

    #[test]
    fn test_strings_compare_by_content() {
        assert_eq!(string("abc"), string(String::from("abc")));
        assert_ne!(string("abc"), string("abd"));
        assert_eq!(string("abc").to_hash(), string("abc").to_hash());
    }
}
