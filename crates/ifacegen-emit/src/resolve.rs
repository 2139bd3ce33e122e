//! Namespace paths and the two qualification rules built on them.
//!
//! Every non-namespace declaration reachable from the layout gets a path: the
//! names of its enclosing namespaces, root first. Flattening concatenates that
//! path onto the identifier; minimal qualification keeps only the path
//! elements the referencing declaration does not already have.

use ifacegen_schema::{Declaration, Schema, SchemaError};
use std::collections::HashMap;

/// Scope separator of the namespaced syntax.
pub const SCOPE_SEPARATOR: &str = "::";

/// `key -> enclosing namespace names` for one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespacePaths {
    paths: HashMap<String, Vec<String>>,
}

impl NamespacePaths {
    /// Pre-order walk of the layout, recording a copy of the current path for
    /// each enum, struct, function and typedef.
    pub fn build(schema: &Schema) -> Result<Self, SchemaError> {
        let mut paths = HashMap::new();
        let mut current = Vec::new();
        collect(schema, schema.layout(), &mut current, &mut paths)?;
        Ok(Self { paths })
    }

    /// Enclosing namespaces of `key`, or `None` for primitives and
    /// declarations never reached from the layout.
    pub fn path_of(&self, key: &str) -> Option<&[String]> {
        self.paths.get(key).map(Vec::as_slice)
    }

    /// Concatenated path used as identifier prefix (`["omm", "Cpu"]` -> `ommCpu`).
    pub fn flattened_prefix(&self, key: &str) -> Option<String> {
        self.path_of(key).map(|path| path.concat())
    }

    /// Scopes needed to name `to` from inside `from`.
    ///
    /// This is the set difference `path(to) - path(from)` in `to`'s order, not
    /// a common-prefix trim. Downstream headers depend on this exact output.
    pub fn minimal_qualifier(&self, from: &str, to: &str) -> Vec<&str> {
        let Some(target) = self.path_of(to) else {
            return Vec::new();
        };
        let context = self.path_of(from).unwrap_or_default();
        set_difference(target, context)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn collect(
    schema: &Schema,
    keys: &[String],
    current: &mut Vec<String>,
    paths: &mut HashMap<String, Vec<String>>,
) -> Result<(), SchemaError> {
    for key in keys {
        match schema.lookup(key)? {
            Declaration::Namespace(ns) => {
                current.push(ns.name.clone());
                collect(schema, &ns.children, current, paths)?;
                current.pop();
            }
            _ => {
                paths.insert(key.clone(), current.clone());
            }
        }
    }
    Ok(())
}

/// Elements of `target` absent from `context`, order preserved.
pub fn set_difference<'a>(target: &'a [String], context: &[String]) -> Vec<&'a str> {
    target
        .iter()
        .filter(|name| !context.contains(name))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_schema() -> Schema {
        ifacegen_schema::from_value(json!({
            "layout": ["omm"],
            "omm": { "type": "namespace", "name": "omm", "values": ["Result", "Cpu", "Debug"] },
            "Result": { "type": "enum", "name": "Result", "values": [{ "name": "SUCCESS" }] },
            "Cpu": { "type": "namespace", "name": "Cpu", "values": ["CpuDesc"] },
            "CpuDesc": { "type": "struct", "name": "BakeInputDesc" },
            "Debug": { "type": "namespace", "name": "Debug", "values": ["Save"] },
            "Save": {
                "type": "function",
                "name": "SaveAsImages",
                "ret": { "type": "Result" },
                "args": [{ "name": "desc", "type": "CpuDesc", "const": true, "ref": true }]
            }
        }))
        .unwrap()
    }

    #[test]
    fn paths_follow_namespace_nesting() {
        let paths = NamespacePaths::build(&nested_schema()).unwrap();
        assert_eq!(paths.path_of("Result").unwrap(), ["omm"]);
        assert_eq!(paths.path_of("CpuDesc").unwrap(), ["omm", "Cpu"]);
        assert_eq!(paths.path_of("Save").unwrap(), ["omm", "Debug"]);
        // namespaces themselves get no entry
        assert!(paths.path_of("Cpu").is_none());
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn flattened_prefix_concatenates_without_separator() {
        let paths = NamespacePaths::build(&nested_schema()).unwrap();
        assert_eq!(paths.flattened_prefix("CpuDesc").as_deref(), Some("ommCpu"));
        assert_eq!(paths.flattened_prefix("uint32_t"), None);
    }

    #[test]
    fn minimal_qualifier_drops_shared_scopes() {
        let paths = NamespacePaths::build(&nested_schema()).unwrap();
        assert_eq!(paths.minimal_qualifier("Save", "CpuDesc"), ["Cpu"]);
        assert!(paths.minimal_qualifier("CpuDesc", "Result").is_empty());
        assert!(paths.minimal_qualifier("Save", "float").is_empty());
    }

    #[test]
    fn minimal_qualifier_from_unknown_context_is_fully_qualified() {
        let paths = NamespacePaths::build(&nested_schema()).unwrap();
        assert_eq!(paths.minimal_qualifier("nowhere", "CpuDesc"), ["omm", "Cpu"]);
    }

    #[test]
    fn set_difference_is_not_prefix_trimming() {
        let target = vec!["a".to_string(), "x".to_string(), "b".to_string()];
        let context = vec!["b".to_string(), "a".to_string()];
        assert_eq!(set_difference(&target, &context), ["x"]);

        // Same name at different depths under-qualifies.
        let target = vec!["x".to_string(), "y".to_string()];
        let context = vec!["y".to_string(), "x".to_string(), "z".to_string()];
        assert!(set_difference(&target, &context).is_empty());
    }
}
