//! JSON schema document to typed [`Schema`].
//!
//! The document is a single object: `layout` (root emission order), an
//! optional `version`, and one entry per declaration key whose `type` field
//! selects the declaration kind.

use crate::error::SchemaError;
use crate::model::*;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};

const LAYOUT_KEY: &str = "layout";
const VERSION_KEY: &str = "version";
const USE_TYPE_DEFAULT: &str = "default";

/// Parse a schema from JSON text.
pub fn from_json(text: &str) -> Result<Schema, SchemaError> {
    let value: Value = serde_json::from_str(text)?;
    from_value(value)
}

/// Build a schema from an already parsed JSON document.
pub fn from_value(value: Value) -> Result<Schema, SchemaError> {
    let Value::Object(mut root) = value else {
        return Err(SchemaError::NotAnObject);
    };

    let version = parse_version(root.remove(VERSION_KEY))?;
    let layout = parse_layout(root.remove(LAYOUT_KEY))?;

    let keys: BTreeSet<String> = root.keys().cloned().collect();
    let mut declarations = BTreeMap::new();
    for (key, raw) in root {
        let decl = parse_declaration(&key, raw, &keys)?;
        declarations.insert(key, decl);
    }

    let mut schema = Schema::new(layout, declarations)?;
    schema.version = version;
    tracing::debug!(
        declarations = schema.declarations.len(),
        roots = schema.layout.len(),
        "loaded schema"
    );
    Ok(schema)
}

fn parse_version(value: Option<Value>) -> Result<u32, SchemaError> {
    let Some(value) = value else {
        return Ok(SCHEMA_VERSION);
    };
    let found = value
        .as_u64()
        .ok_or_else(|| SchemaError::malformed(VERSION_KEY, "expected a non-negative integer"))?;
    if found > u64::from(SCHEMA_VERSION) {
        return Err(SchemaError::UnsupportedVersion {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    // Checked against SCHEMA_VERSION above, so it fits.
    Ok(found as u32)
}

fn parse_layout(value: Option<Value>) -> Result<Vec<String>, SchemaError> {
    let value = value.ok_or(SchemaError::MissingLayout)?;
    serde_json::from_value(value)
        .map_err(|e| SchemaError::malformed(LAYOUT_KEY, format!("expected an array of keys: {e}")))
}

fn parse_declaration(
    key: &str,
    raw: Value,
    keys: &BTreeSet<String>,
) -> Result<Declaration, SchemaError> {
    if !raw.is_object() {
        return Err(SchemaError::malformed(key, "declaration must be an object"));
    }
    let raw: RawDeclaration =
        serde_json::from_value(raw).map_err(|e| SchemaError::malformed(key, e))?;

    let decl = match raw {
        RawDeclaration::Namespace { name, values } => Declaration::Namespace(Namespace {
            name,
            children: values,
        }),
        RawDeclaration::Enum {
            name,
            values,
            is_flag,
            inject_new_line,
        } => Declaration::Enum(Enum {
            name,
            values: values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    value: v.value.and_then(RawScalar::into_text).map(|text| {
                        if keys.contains(&text) {
                            EnumValueInit::Reference(text)
                        } else {
                            EnumValueInit::Literal(text)
                        }
                    }),
                    comment: non_empty(v.comment),
                })
                .collect(),
            is_flag,
            blank_line_between_values: inject_new_line,
        }),
        RawDeclaration::Struct {
            name,
            members,
            union_members,
            comment,
            cpp_only,
        } => Declaration::Struct(Struct {
            name,
            members: members.into_iter().map(RawMember::into_member).collect(),
            union_members: union_members
                .into_iter()
                .map(RawMember::into_member)
                .collect(),
            comment: non_empty(comment),
            namespaced_only: cpp_only,
        }),
        RawDeclaration::Function {
            name,
            ret,
            args,
            comment,
        } => Declaration::Function(Function {
            name,
            ret: ReturnType {
                ty: ret.ty,
                is_const: ret.is_const,
                is_reference: ret.is_ref,
            },
            args: args
                .into_iter()
                .map(|a| Argument {
                    name: a.name,
                    ty: a.ty,
                    is_const: a.is_const,
                    is_reference: a.is_ref,
                    is_pointer: a.ptr,
                    is_double_pointer: a.ptr2x,
                })
                .collect(),
            comment: non_empty(comment),
        }),
        RawDeclaration::Typedef {
            name,
            underlying_type,
        } => Declaration::Typedef(Typedef {
            name,
            underlying: underlying_type,
        }),
    };
    Ok(decl)
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawDeclaration {
    Namespace {
        name: String,
        values: Vec<String>,
    },
    Enum {
        name: String,
        values: Vec<RawEnumValue>,
        #[serde(default, rename = "isFlag")]
        is_flag: bool,
        #[serde(default, rename = "injectNewLine")]
        inject_new_line: bool,
    },
    Struct {
        name: String,
        #[serde(default)]
        members: Vec<RawMember>,
        #[serde(default)]
        union_members: Vec<RawMember>,
        #[serde(default)]
        comment: Option<String>,
        #[serde(default, rename = "cppOnly")]
        cpp_only: bool,
    },
    Function {
        name: String,
        ret: RawReturn,
        #[serde(default)]
        args: Vec<RawArgument>,
        #[serde(default)]
        comment: Option<String>,
    },
    Typedef {
        name: String,
        underlying_type: String,
    },
}

#[derive(Deserialize)]
struct RawEnumValue {
    name: String,
    #[serde(default)]
    value: Option<RawScalar>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Deserialize)]
struct RawMember {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "const")]
    is_const: bool,
    #[serde(default)]
    ptr: bool,
    #[serde(default, rename = "static")]
    is_static: bool,
    #[serde(default)]
    constexpr: bool,
    #[serde(default)]
    value: Option<RawDefault>,
    #[serde(default)]
    comment: Option<String>,
}

#[derive(Deserialize)]
struct RawReturn {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "const")]
    is_const: bool,
    #[serde(default, rename = "ref")]
    is_ref: bool,
}

#[derive(Deserialize)]
struct RawArgument {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, rename = "const")]
    is_const: bool,
    #[serde(default, rename = "ref")]
    is_ref: bool,
    #[serde(default)]
    ptr: bool,
    #[serde(default)]
    ptr2x: bool,
}

/// Scalar written where source text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl RawScalar {
    /// Empty strings count as "no value".
    fn into_text(self) -> Option<String> {
        match self {
            RawScalar::Text(t) if t.is_empty() => None,
            RawScalar::Text(t) => Some(t),
            RawScalar::Number(n) => Some(n.to_string()),
            RawScalar::Bool(b) => Some(b.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDefault {
    Scalar(RawScalar),
    EnumValue {
        #[serde(rename = "type", default)]
        enum_key: Option<String>,
        value: String,
    },
}

impl RawDefault {
    fn into_default(self) -> Option<DefaultValue> {
        match self {
            RawDefault::Scalar(scalar) => scalar.into_text().map(|text| {
                if text == USE_TYPE_DEFAULT {
                    DefaultValue::UseTypeDefault
                } else {
                    DefaultValue::Literal(text)
                }
            }),
            RawDefault::EnumValue { enum_key, value } => {
                Some(DefaultValue::EnumValueReference { enum_key, value })
            }
        }
    }
}

impl RawMember {
    fn into_member(self) -> Member {
        Member {
            name: self.name,
            ty: self.ty,
            is_const: self.is_const,
            is_pointer: self.ptr,
            is_static: self.is_static,
            is_constexpr: self.constexpr,
            default: self.value.and_then(RawDefault::into_default),
            comment: non_empty(self.comment),
        }
    }
}
