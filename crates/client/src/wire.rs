//! Field casing and tolerant decoding.
//!
//! The remote store's JSON casing is not reliably known per deployment: it
//! may emit and accept lower-camel-case or capitalized field names. Each
//! logical field is therefore a [`FieldName`] alias pair; encoding picks the
//! key for the requested [`FieldCase`], decoding consults the aliases in
//! order. Entities decode through [`FromWire`], which never fails: absent
//! fields get their documented defaults instead.

use serde_json::{Map, Value};

/// Field-naming convention for the remote store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldCase {
    /// `pessoaId`, the convention the client prefers.
    LowerCamel,
    /// `PessoaId`, accepted by some deployments instead.
    Pascal,
}

/// A logical wire field and the source keys it may arrive under.
#[derive(Clone, Copy, Debug)]
pub struct FieldName {
    camel: &'static str,
    pascal: &'static str,
}

impl FieldName {
    pub const fn new(camel: &'static str, pascal: &'static str) -> Self {
        Self { camel, pascal }
    }

    /// The key to emit under the given casing scheme.
    pub fn key(&self, case: FieldCase) -> &'static str {
        match case {
            FieldCase::LowerCamel => self.camel,
            FieldCase::Pascal => self.pascal,
        }
    }

    fn lookup<'a>(&self, source: &'a Value) -> Option<&'a Value> {
        [self.camel, self.pascal]
            .into_iter()
            .find_map(|key| source.get(key))
    }

    /// Integer field; absent or non-integer values default to 0.
    pub fn int(&self, source: &Value) -> i64 {
        self.lookup(source).and_then(Value::as_i64).unwrap_or(0)
    }

    /// Non-negative integer field; absent, negative or oversized values
    /// default to 0.
    pub fn unsigned(&self, source: &Value) -> u32 {
        self.lookup(source)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(0)
    }

    /// Decimal field; absent or non-numeric values default to 0.
    pub fn number(&self, source: &Value) -> f64 {
        self.lookup(source).and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// String field; absent or non-string values default to empty.
    pub fn text(&self, source: &Value) -> String {
        self.lookup(source)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

/// JSON object under construction for one casing scheme.
pub(crate) struct WireObject {
    case: FieldCase,
    map: Map<String, Value>,
}

impl WireObject {
    pub(crate) fn new(case: FieldCase) -> Self {
        Self {
            case,
            map: Map::new(),
        }
    }

    pub(crate) fn set(&mut self, field: &FieldName, value: impl Into<Value>) {
        self.map.insert(field.key(self.case).to_string(), value.into());
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

/// Builds a typed entity from an arbitrary response body.
pub trait FromWire {
    fn from_wire(raw: &Value) -> Self;
}

/// Keys a list response may be wrapped under.
const LIST_KEYS: &[&str] = &["items", "itens", "data"];

/// Normalizes a list response into typed entities.
///
/// Accepts a bare array or an object wrapping one under `items`, `itens` or
/// `data`; any other shape decodes to an empty list rather than failing the
/// caller.
pub fn decode_list<T: FromWire>(raw: &Value) -> Vec<T> {
    let items = match raw {
        Value::Array(items) => Some(items),
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(Value::as_array),
        _ => None,
    };
    items
        .map(|items| items.iter().map(T::from_wire).collect())
        .unwrap_or_default()
}
