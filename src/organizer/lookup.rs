//! Typed lookups over raw JSON snapshots.
//!
//! Upstream producers disagree on key names and nesting, so every output
//! field is described by a [`KeyChain`] and resolved through one [`Lookup`].
//! Absent keys, `null`s and values of the wrong shape all resolve to `None`;
//! nothing here can fail.

use serde_json::{Map, Value};

/// Ordered candidate key paths for one output field.
///
/// Paths are dotted (`DHT22_FEEDER.temperature`) and tried in order. The first
/// path whose value passes the caller's extractor wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChain {
    /// Output field name, used in diagnostics.
    pub field: &'static str,
    /// Candidate paths, most specific first.
    pub paths: &'static [&'static str],
}

/// Read-only view over a snapshot and its wrapper sub-mappings.
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    scopes: Vec<&'a Map<String, Value>>,
}

impl<'a> Lookup<'a> {
    /// Build a lookup over `raw`.
    ///
    /// The root mapping is searched first, then every wrapper named in
    /// `wrappers` that exists and is itself a mapping. A non-mapping `raw`
    /// produces an empty lookup.
    pub fn new(raw: &'a Value, wrappers: &[&str]) -> Self {
        let mut scopes = Vec::new();
        if let Value::Object(root) = raw {
            scopes.push(root);
            for name in wrappers {
                if let Some(Value::Object(inner)) = root.get(*name) {
                    scopes.push(inner);
                }
            }
        }
        Self { scopes }
    }

    /// True when the snapshot was not a mapping.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// First candidate of `chain` accepted by `extract`.
    ///
    /// Each path is tried in every scope, root first, before the next path.
    /// An unusable value at the root does not hide a usable one in a wrapper.
    /// `null` counts as absent.
    pub fn resolve<T>(
        &self,
        chain: &KeyChain,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Option<T> {
        chain.paths.iter().find_map(|path| {
            self.scopes
                .iter()
                .copied()
                .filter_map(|scope| walk(scope, path))
                .find_map(&extract)
        })
    }

    /// First candidate that coerces to a finite number.
    pub fn number(&self, chain: &KeyChain) -> Option<f64> {
        self.resolve(chain, as_number)
    }

    /// First candidate that coerces to a boolean.
    pub fn flag(&self, chain: &KeyChain) -> Option<bool> {
        self.resolve(chain, as_flag)
    }

    /// First candidate that is a mapping.
    pub fn mapping(&self, chain: &KeyChain) -> Option<&'a Map<String, Value>> {
        self.resolve(chain, Value::as_object)
    }
}

fn walk<'a>(scope: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    // Keys that literally contain a dot take precedence over nesting.
    let value = match scope.get(path) {
        Some(value) => value,
        None => {
            let mut segments = path.split('.');
            let mut current = scope.get(segments.next()?)?;
            for segment in segments {
                current = current.as_object()?.get(segment)?;
            }
            current
        }
    };
    (!value.is_null()).then_some(value)
}

/// Coerce a raw value to a finite number.
///
/// Accepts JSON numbers, numeric strings and measurement wrappers of the form
/// `{"value": x, "unit": "..."}`.
pub fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Object(map) => return map.get("value").and_then(as_number),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Coerce a raw value to a boolean, rejecting shapes that carry no flag.
pub fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(_) | Value::String(_) => Some(truthy(value)),
        Value::Object(map) => map.get("value").and_then(as_flag),
        Value::Null | Value::Array(_) => None,
    }
}

/// Loose truthiness used for relay states.
///
/// Numbers are true when non-zero. Strings are read as numbers when they
/// parse, `on`/`true`/`yes` are true, `off`/`false`/`no` and blank are false,
/// and any other text is true. Arrays and mappings without a `value` key are
/// true; `null` is false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<f64>() {
                return n != 0.0 && !n.is_nan();
            }
            !matches!(s.to_ascii_lowercase().as_str(), "" | "off" | "false" | "no")
        }
        Value::Object(map) => map.get("value").map_or(true, truthy),
        Value::Array(_) => true,
    }
}

/// Short description of a value's shape for diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a mapping",
    }
}
