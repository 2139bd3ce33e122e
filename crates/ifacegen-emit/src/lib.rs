//! Header generation from ifacegen schemas.
//!
//! One [`Schema`](ifacegen_schema::Schema) renders to several header syntaxes
//! through a shared walk of the layout:
//!
//! ```text
//! Schema ──> NamespacePaths ──┬─> c    (flattened names, default factories)
//!            (resolve.rs)     └─> cpp  (namespaces, minimal qualification)
//! ```
//!
//! # Example
//!
//! ```
//! use ifacegen_emit::{EmitOptions, generate};
//!
//! let schema = ifacegen_schema::from_json(r#"{
//!     "layout": ["ns"],
//!     "ns": { "type": "namespace", "name": "omm", "values": ["Kind"] },
//!     "Kind": { "type": "enum", "name": "Kind", "values": [{ "name": "X" }] }
//! }"#).unwrap();
//!
//! let c = generate(&schema, "c", &EmitOptions::for_prefix("omm")).unwrap();
//! assert!(c.contains("typedef enum ommKind"));
//!
//! let cpp = generate(&schema, "cpp", &EmitOptions::for_prefix("omm")).unwrap();
//! assert!(cpp.contains("namespace omm"));
//! ```
//!
//! # Feature Flags
//!
//! - `syntax-c` - flattened C header
//! - `syntax-cpp` - namespaced C++ header

mod error;
pub mod format;
pub mod options;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod traits;
pub mod walk;

pub use error::EmitError;
pub use options::EmitOptions;
pub use resolve::NamespacePaths;
pub use traits::{Context, Syntax};

pub use registry::{get_syntax, register_syntax, syntax_names, syntaxes};

#[cfg(feature = "syntax-c")]
pub use output::{CSyntax, generate_c};

#[cfg(feature = "syntax-cpp")]
pub use output::{CppSyntax, generate_cpp};

use ifacegen_schema::Schema;

/// Render `schema` with the registered syntax called `syntax`.
pub fn generate(
    schema: &Schema,
    syntax: &str,
    options: &EmitOptions,
) -> Result<String, EmitError> {
    let syntax = get_syntax(syntax).ok_or_else(|| EmitError::UnknownSyntax(syntax.to_string()))?;
    walk::generate(schema, syntax, options)
}
