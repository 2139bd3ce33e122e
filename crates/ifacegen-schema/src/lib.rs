//! Schema model for ifacegen.
//!
//! A schema describes an API surface once (namespaces, enums, structs,
//! functions, typedefs) so it can be rendered into several header syntaxes.
//! This crate owns the typed model and the JSON loader; rendering lives in
//! `ifacegen-emit`.
//!
//! # Example
//!
//! ```
//! use ifacegen_schema::{Declaration, from_json};
//!
//! let schema = from_json(r#"{
//!     "layout": ["B"],
//!     "B": { "type": "enum", "name": "Kind", "values": [{ "name": "X" }, { "name": "Y", "value": "5" }] }
//! }"#).unwrap();
//!
//! assert_eq!(schema.layout(), ["B".to_string()]);
//! assert!(matches!(schema.lookup("B").unwrap(), Declaration::Enum(_)));
//! ```

mod error;
pub mod load;
pub mod model;

pub use error::SchemaError;
pub use load::{from_json, from_value};
pub use model::{
    Argument, DeclKind, Declaration, DefaultValue, Enum, EnumValue, EnumValueInit, Function,
    Member, Namespace, ReturnType, SCHEMA_VERSION, Schema, Struct, Typedef,
};
