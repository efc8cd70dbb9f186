//! Human-readable rendering of values for `print` and tooling output.

use rustc_hash::FxHashSet;
use sprig_ir::format_number;

use crate::heap::ObjectId;
use crate::interpreter::Interpreter;
use crate::object::ObjectKind;
use crate::value::Value;

const MAX_DEPTH: usize = 8;

impl Interpreter {
    /// Renders `value`: strings quoted, arrays as `[a, b]`, tables as
    /// `Name { key: value }` with keys sorted.
    ///
    /// Named tables nested inside another value render by name only, so
    /// printing a value that references the builtins stays short.
    pub fn inspect(&self, value: &Value) -> String {
        let mut out = String::new();
        let mut seen = FxHashSet::default();
        self.inspect_into(value, 0, &mut seen, &mut out);
        out
    }

    /// Like [`Interpreter::inspect`], but a top-level string is not quoted.
    pub fn display(&self, value: &Value) -> String {
        match value {
            Value::String(text) => text.to_string(),
            other => self.inspect(other),
        }
    }

    fn inspect_into(
        &self,
        value: &Value,
        depth: usize,
        seen: &mut FxHashSet<ObjectId>,
        out: &mut String,
    ) {
        let id = match value {
            Value::Void => return out.push_str("void"),
            Value::Null => return out.push_str("null"),
            Value::Boolean(b) => return out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => return out.push_str(&format_number(*n)),
            Value::String(text) => return out.push_str(&format!("{text:?}")),
            Value::Object(id) => *id,
        };

        let Some(object) = self.heap.object(id) else {
            return out.push_str("<collected>");
        };
        if depth >= MAX_DEPTH || seen.contains(&id) {
            return out.push_str(&object.display_name());
        }

        match &object.kind {
            ObjectKind::Array(elements) => {
                seen.insert(id);
                out.push('[');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.inspect_into(element, depth + 1, seen, out);
                }
                out.push(']');
                seen.remove(&id);
            }
            ObjectKind::Table(properties) => {
                if depth > 0 && object.name.is_some() {
                    return out.push_str(&object.display_name());
                }
                seen.insert(id);
                if let Some(name) = &object.name {
                    out.push_str(name);
                    out.push(' ');
                }
                let mut entries: Vec<_> = properties
                    .iter()
                    .map(|(key, value)| (self.interner.lookup(*key), value))
                    .collect();
                entries.sort_unstable_by_key(|(key, _)| *key);
                if entries.is_empty() {
                    out.push_str("{}");
                } else {
                    out.push_str("{ ");
                    for (i, (key, value)) in entries.into_iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        out.push_str(key);
                        out.push_str(": ");
                        self.inspect_into(value, depth + 1, seen, out);
                    }
                    out.push_str(" }");
                }
                seen.remove(&id);
            }
            ObjectKind::Function(_) | ObjectKind::Handle(_) => out.push_str(&object.display_name()),
        }
    }
}
