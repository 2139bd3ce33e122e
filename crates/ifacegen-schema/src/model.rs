//! Typed representation of an API surface description.
//!
//! A [`Schema`] owns every [`Declaration`] by key plus the root `layout`, the
//! ordered list of keys that defines emission order. Nothing here is mutated
//! once loading finishes; emitters only read.

use crate::error::SchemaError;
use std::collections::BTreeMap;

/// Highest schema document version this crate understands.
pub const SCHEMA_VERSION: u32 = 1;

/// A complete, validated schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub(crate) version: u32,
    pub(crate) layout: Vec<String>,
    pub(crate) declarations: BTreeMap<String, Declaration>,
}

/// One named node of the schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Namespace(Namespace),
    Enum(Enum),
    Struct(Struct),
    Function(Function),
    Typedef(Typedef),
}

/// Discriminant of a [`Declaration`], handy for logging and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    Namespace,
    Enum,
    Struct,
    Function,
    Typedef,
}

/// A scope grouping child declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    pub name: String,
    /// Child declaration keys, in emission order.
    pub children: Vec<String>,
}

/// An enumerated type.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    /// Bit-flag enums get operator overloads appended after the body.
    pub is_flag: bool,
    /// Emit an empty line between consecutive values.
    pub blank_line_between_values: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub value: Option<EnumValueInit>,
    pub comment: Option<String>,
}

/// Explicit initializer of an enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumValueInit {
    /// Emitted verbatim, e.g. `5` or `1u << 3`.
    Literal(String),
    /// Key of another declaration whose name is emitted, qualified per syntax.
    Reference(String),
}

/// An aggregate type with an optional trailing anonymous union.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    pub name: String,
    pub members: Vec<Member>,
    pub union_members: Vec<Member>,
    pub comment: Option<String>,
    /// Only meaningful in syntaxes with native scopes; the flattened syntax skips it.
    pub namespaced_only: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    /// Declaration key or primitive type name.
    pub ty: String,
    pub is_const: bool,
    pub is_pointer: bool,
    pub is_static: bool,
    pub is_constexpr: bool,
    pub default: Option<DefaultValue>,
    pub comment: Option<String>,
}

/// Default value of a struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Literal source text (`0`, `0.5f`, `true`, `nullptr`, ...).
    Literal(String),
    /// Use whatever the member's own type considers its default.
    UseTypeDefault,
    /// A specific enumerator. `enum_key` falls back to the member type when absent.
    EnumValueReference {
        enum_key: Option<String>,
        value: String,
    },
}

/// A callable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub ret: ReturnType,
    pub args: Vec<Argument>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnType {
    pub ty: String,
    pub is_const: bool,
    pub is_reference: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub ty: String,
    pub is_const: bool,
    pub is_reference: bool,
    pub is_pointer: bool,
    pub is_double_pointer: bool,
}

/// A type alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub underlying: String,
}

impl Schema {
    /// Assemble a schema from parts and validate cross references.
    pub fn new(
        layout: Vec<String>,
        declarations: BTreeMap<String, Declaration>,
    ) -> Result<Self, SchemaError> {
        let schema = Self {
            version: SCHEMA_VERSION,
            layout,
            declarations,
        };
        schema.check_references()?;
        Ok(schema)
    }

    /// Document version the schema was loaded from.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Root emission order.
    pub fn layout(&self) -> &[String] {
        &self.layout
    }

    /// Look up a declaration, failing with [`SchemaError::UnknownKey`].
    pub fn lookup(&self, key: &str) -> Result<&Declaration, SchemaError> {
        self.declarations
            .get(key)
            .ok_or_else(|| SchemaError::UnknownKey(key.to_string()))
    }

    /// Look up a declaration, treating a miss as "not a declaration".
    pub fn get(&self, key: &str) -> Option<&Declaration> {
        self.declarations.get(key)
    }

    /// Number of declarations of each kind.
    pub fn counts(&self) -> BTreeMap<DeclKind, usize> {
        let mut counts = BTreeMap::new();
        for decl in self.declarations.values() {
            *counts.entry(decl.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Every layout entry and namespace child must name a declaration.
    pub(crate) fn check_references(&self) -> Result<(), SchemaError> {
        for key in &self.layout {
            self.lookup(key)?;
        }
        for decl in self.declarations.values() {
            if let Declaration::Namespace(ns) = decl {
                for child in &ns.children {
                    self.lookup(child)?;
                }
            }
        }
        Ok(())
    }
}

impl Declaration {
    /// Unqualified name as written in the schema.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Namespace(d) => &d.name,
            Declaration::Enum(d) => &d.name,
            Declaration::Struct(d) => &d.name,
            Declaration::Function(d) => &d.name,
            Declaration::Typedef(d) => &d.name,
        }
    }

    pub fn kind(&self) -> DeclKind {
        match self {
            Declaration::Namespace(_) => DeclKind::Namespace,
            Declaration::Enum(_) => DeclKind::Enum,
            Declaration::Struct(_) => DeclKind::Struct,
            Declaration::Function(_) => DeclKind::Function,
            Declaration::Typedef(_) => DeclKind::Typedef,
        }
    }
}

impl DeclKind {
    /// The `type` tag used in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            DeclKind::Namespace => "namespace",
            DeclKind::Enum => "enum",
            DeclKind::Struct => "struct",
            DeclKind::Function => "function",
            DeclKind::Typedef => "typedef",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl Struct {
    /// Whether any regular member carries a default value.
    pub fn has_defaults(&self) -> bool {
        self.members.iter().any(|m| m.default.is_some())
    }
}

impl Member {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_const: false,
            is_pointer: false,
            is_static: false,
            is_constexpr: false,
            default: None,
            comment: None,
        }
    }

    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enum_decl(name: &str) -> Declaration {
        Declaration::Enum(Enum {
            name: name.to_string(),
            values: vec![EnumValue {
                name: "A".into(),
                value: None,
                comment: None,
            }],
            is_flag: false,
            blank_line_between_values: false,
        })
    }

    #[test]
    fn build_schema_programmatically() {
        let mut decls = BTreeMap::new();
        decls.insert("Kind".to_string(), enum_decl("Kind"));
        decls.insert(
            "ns".to_string(),
            Declaration::Namespace(Namespace {
                name: "api".into(),
                children: vec!["Kind".into()],
            }),
        );

        let schema = Schema::new(vec!["ns".into()], decls).unwrap();
        assert_eq!(schema.layout(), ["ns".to_string()]);
        assert_eq!(schema.lookup("Kind").unwrap().name(), "Kind");
        assert_eq!(schema.counts()[&DeclKind::Namespace], 1);
    }

    #[test]
    fn dangling_namespace_child_is_rejected() {
        let mut decls = BTreeMap::new();
        decls.insert(
            "ns".to_string(),
            Declaration::Namespace(Namespace {
                name: "api".into(),
                children: vec!["Missing".into()],
            }),
        );

        let err = Schema::new(vec!["ns".into()], decls).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownKey(k) if k == "Missing"));
    }

    #[test]
    fn has_defaults_ignores_union_members() {
        let s = Struct {
            name: "S".into(),
            members: vec![Member::new("a", "uint32_t")],
            union_members: vec![Member::new("b", "float").with_default(DefaultValue::UseTypeDefault)],
            comment: None,
            namespaced_only: false,
        };
        assert!(!s.has_defaults());
    }
}
