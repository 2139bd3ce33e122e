//! The schema walk shared by every syntax.

use crate::error::EmitError;
use crate::options::EmitOptions;
use crate::resolve::NamespacePaths;
use crate::traits::{Context, Syntax};
use ifacegen_schema::{Declaration, Schema};

/// Render `schema` in `syntax`, declarations in layout order.
///
/// The result is a pure function of its inputs: the same schema and options
/// always produce byte-identical text.
pub fn generate(
    schema: &Schema,
    syntax: &dyn Syntax,
    options: &EmitOptions,
) -> Result<String, EmitError> {
    let paths = NamespacePaths::build(schema)?;
    let cx = Context::new(schema, &paths, options);

    let mut out = String::new();
    syntax.prologue(&cx, &mut out);
    write_siblings(&cx, syntax, &mut out, schema.layout(), 0)?;

    tracing::debug!(
        syntax = syntax.name(),
        bytes = out.len(),
        "rendered schema"
    );
    Ok(out)
}

/// Siblings are separated by one blank line.
fn write_siblings(
    cx: &Context<'_>,
    syntax: &dyn Syntax,
    out: &mut String,
    keys: &[String],
    depth: usize,
) -> Result<(), EmitError> {
    let mut first = true;
    for key in keys {
        let decl = cx.schema.lookup(key)?;
        if !syntax.includes(decl) {
            tracing::debug!(key = %key, syntax = syntax.name(), "skipping declaration");
            continue;
        }
        let mark = out.len();
        if !first {
            out.push('\n');
        }
        write_declaration(cx, syntax, out, key, decl, depth)?;
        // A namespace whose children were all filtered out writes nothing.
        if out.len() == mark + usize::from(!first) {
            out.truncate(mark);
        } else {
            first = false;
        }
    }
    Ok(())
}

fn write_declaration(
    cx: &Context<'_>,
    syntax: &dyn Syntax,
    out: &mut String,
    key: &str,
    decl: &Declaration,
    depth: usize,
) -> Result<(), EmitError> {
    tracing::trace!(key, kind = %decl.kind(), depth, "emitting");
    match decl {
        Declaration::Namespace(ns) => {
            let inner = syntax.open_namespace(cx, out, ns, depth);
            write_siblings(cx, syntax, out, &ns.children, inner)?;
            syntax.close_namespace(cx, out, ns, depth);
        }
        Declaration::Enum(e) => syntax.render_enum(cx, out, key, e, depth),
        Declaration::Struct(s) => syntax.render_struct(cx, out, key, s, depth),
        Declaration::Function(f) => syntax.render_function(cx, out, key, f, depth),
        Declaration::Typedef(t) => syntax.render_typedef(cx, out, key, t, depth),
    }
    Ok(())
}
