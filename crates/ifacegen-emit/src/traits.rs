//! The syntax strategy interface.

use crate::options::EmitOptions;
use crate::resolve::NamespacePaths;
use ifacegen_schema::{Declaration, Enum, Function, Namespace, Schema, Struct, Typedef};

/// Read-only state shared by every render call of one run.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub schema: &'a Schema,
    pub paths: &'a NamespacePaths,
    pub options: &'a EmitOptions,
}

impl<'a> Context<'a> {
    pub fn new(schema: &'a Schema, paths: &'a NamespacePaths, options: &'a EmitOptions) -> Self {
        Self {
            schema,
            paths,
            options,
        }
    }
}

/// A target header syntax.
///
/// The schema walk (layout order, sibling separation, namespace recursion)
/// is shared; a syntax decides how each declaration and each type reference
/// is spelled. Every render call appends whole lines to `out`.
///
/// # Implementing Custom Syntaxes
///
/// ```ignore
/// use ifacegen_emit::{Syntax, register_syntax};
///
/// struct RustFfiSyntax;
///
/// impl Syntax for RustFfiSyntax {
///     fn name(&self) -> &'static str { "rust-ffi" }
///     fn extension(&self) -> &'static str { "rs" }
///     /* render_* ... */
/// }
///
/// static RUST_FFI: RustFfiSyntax = RustFfiSyntax;
/// register_syntax(&RUST_FFI);
/// ```
pub trait Syntax: Send + Sync {
    /// Unique registry name (e.g. "c", "cpp").
    fn name(&self) -> &'static str;

    /// File extension of the generated header (e.g. "h", "hpp").
    fn extension(&self) -> &'static str;

    /// Whether `decl` appears in this syntax at all.
    fn includes(&self, _decl: &Declaration) -> bool {
        true
    }

    /// Text emitted once before the first declaration.
    fn prologue(&self, _cx: &Context<'_>, _out: &mut String) {}

    /// Spell a reference to `ty` (declaration key or primitive name) as seen
    /// from inside the declaration `from`.
    fn render_type_reference(&self, cx: &Context<'_>, from: &str, ty: &str) -> String;

    /// Open a namespace and return the depth its children render at.
    fn open_namespace(&self, cx: &Context<'_>, out: &mut String, ns: &Namespace, depth: usize)
    -> usize;

    fn close_namespace(&self, cx: &Context<'_>, out: &mut String, ns: &Namespace, depth: usize);

    fn render_enum(&self, cx: &Context<'_>, out: &mut String, key: &str, decl: &Enum, depth: usize);

    fn render_struct(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Struct,
        depth: usize,
    );

    fn render_function(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Function,
        depth: usize,
    );

    fn render_typedef(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Typedef,
        depth: usize,
    );
}
