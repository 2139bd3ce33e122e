//! Namespaced C++ header syntax.
//!
//! Namespaces render as native scope blocks and references carry only the
//! scopes the referencing declaration is not already inside (see
//! [`NamespacePaths::minimal_qualifier`](crate::resolve::NamespacePaths::minimal_qualifier)).
//! Member defaults are written as default member initializers.

use crate::error::EmitError;
use crate::format::{column_width, pad, push_line, write_comment};
use crate::options::EmitOptions;
use crate::resolve::SCOPE_SEPARATOR;
use crate::traits::{Context, Syntax};
use ifacegen_schema::{
    DefaultValue, Enum, EnumValueInit, Function, Member, Namespace, Schema, Struct, Typedef,
};

/// Static instance of the C++ syntax for the registry.
pub static CPP_SYNTAX: CppSyntax = CppSyntax;

/// Minimal-qualification strategy.
pub struct CppSyntax;

/// Render `schema` as a namespaced C++ header body.
pub fn generate_cpp(schema: &Schema, options: &EmitOptions) -> Result<String, EmitError> {
    crate::walk::generate(schema, &CPP_SYNTAX, options)
}

impl CppSyntax {
    fn member_lhs(&self, cx: &Context<'_>, from: &str, member: &Member) -> String {
        let mut lhs = String::new();
        if member.is_static {
            lhs.push_str("static ");
        }
        if member.is_constexpr {
            lhs.push_str("constexpr ");
        }
        if member.is_const {
            lhs.push_str("const ");
        }
        lhs.push_str(&self.render_type_reference(cx, from, &member.ty));
        if member.is_pointer {
            lhs.push('*');
        }
        lhs
    }

    fn default_value(
        &self,
        cx: &Context<'_>,
        from: &str,
        member: &Member,
        value: &DefaultValue,
    ) -> String {
        match value {
            DefaultValue::Literal(text) => text.clone(),
            DefaultValue::UseTypeDefault => "{}".to_string(),
            DefaultValue::EnumValueReference { enum_key, value } => {
                let key = enum_key.as_deref().unwrap_or(&member.ty);
                format!(
                    "{}{SCOPE_SEPARATOR}{value}",
                    self.render_type_reference(cx, from, key)
                )
            }
        }
    }

    fn write_members(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        from: &str,
        members: &[Member],
        depth: usize,
    ) {
        let lhs: Vec<String> = members
            .iter()
            .map(|m| self.member_lhs(cx, from, m))
            .collect();
        let width = column_width(&lhs);
        let name_width = column_width(members.iter().map(|m| m.name.as_str()));

        for (member, lhs) in members.iter().zip(&lhs) {
            if let Some(comment) = &member.comment {
                write_comment(out, comment, depth);
            }
            let line = match &member.default {
                Some(value) => format!(
                    "{}{} = {};",
                    pad(lhs, width + 1),
                    pad(&member.name, name_width + 1),
                    self.default_value(cx, from, member, value)
                ),
                None => format!("{}{};", pad(lhs, width + 1), member.name),
            };
            push_line(out, depth, &line);
        }
    }
}

impl Syntax for CppSyntax {
    fn name(&self) -> &'static str {
        "cpp"
    }

    fn extension(&self) -> &'static str {
        "hpp"
    }

    fn render_type_reference(&self, cx: &Context<'_>, from: &str, ty: &str) -> String {
        let Some(decl) = cx.schema.get(ty) else {
            tracing::trace!(ty, "passing through unresolved type name");
            return ty.to_string();
        };
        let scopes = cx.paths.minimal_qualifier(from, ty);
        if scopes.is_empty() {
            decl.name().to_string()
        } else {
            format!(
                "{}{SCOPE_SEPARATOR}{}",
                scopes.join(SCOPE_SEPARATOR),
                decl.name()
            )
        }
    }

    fn open_namespace(
        &self,
        _cx: &Context<'_>,
        out: &mut String,
        ns: &Namespace,
        depth: usize,
    ) -> usize {
        push_line(out, depth, &format!("namespace {}", ns.name));
        push_line(out, depth, "{");
        out.push('\n');
        depth + 1
    }

    fn close_namespace(&self, _cx: &Context<'_>, out: &mut String, ns: &Namespace, depth: usize) {
        out.push('\n');
        push_line(out, depth, &format!("}} // namespace {}", ns.name));
    }

    fn render_enum(&self, cx: &Context<'_>, out: &mut String, key: &str, decl: &Enum, depth: usize) {
        let width = column_width(decl.values.iter().map(|v| v.name.as_str()));

        push_line(out, depth, &format!("enum class {}", decl.name));
        push_line(out, depth, "{");
        for (i, value) in decl.values.iter().enumerate() {
            if i > 0 && decl.blank_line_between_values {
                out.push('\n');
            }
            if let Some(comment) = &value.comment {
                write_comment(out, comment, depth + 1);
            }
            let init = match &value.value {
                Some(EnumValueInit::Literal(text)) => Some(text.clone()),
                Some(EnumValueInit::Reference(target)) => {
                    Some(self.render_type_reference(cx, key, target))
                }
                None => None,
            };
            let line = match init {
                Some(init) => format!("{}= {init},", pad(&value.name, width + 1)),
                None => format!("{},", value.name),
            };
            push_line(out, depth + 1, &line);
        }
        push_line(out, depth, "};");
        if decl.is_flag {
            push_line(
                out,
                depth,
                &format!("{}({});", cx.options.flag_macro, decl.name),
            );
        }
    }

    fn render_struct(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Struct,
        depth: usize,
    ) {
        if let Some(comment) = &decl.comment {
            write_comment(out, comment, depth);
        }
        push_line(out, depth, &format!("struct {}", decl.name));
        push_line(out, depth, "{");
        self.write_members(cx, out, key, &decl.members, depth + 1);
        if !decl.union_members.is_empty() {
            out.push('\n');
            push_line(out, depth + 1, "union");
            push_line(out, depth + 1, "{");
            self.write_members(cx, out, key, &decl.union_members, depth + 2);
            push_line(out, depth + 1, "};");
        }
        push_line(out, depth, "};");
    }

    fn render_function(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Function,
        depth: usize,
    ) {
        if let Some(comment) = &decl.comment {
            write_comment(out, comment, depth);
        }

        let mut line = String::from("static inline ");
        if decl.ret.is_const {
            line.push_str("const ");
        }
        line.push_str(&self.render_type_reference(cx, key, &decl.ret.ty));
        if decl.ret.is_reference {
            line.push('&');
        }
        line.push(' ');
        line.push_str(&decl.name);

        let args: Vec<String> = decl
            .args
            .iter()
            .map(|arg| {
                let mut text = String::new();
                if arg.is_const {
                    text.push_str("const ");
                }
                text.push_str(&self.render_type_reference(cx, key, &arg.ty));
                if arg.is_double_pointer {
                    text.push_str("**");
                }
                if arg.is_pointer {
                    text.push('*');
                }
                if arg.is_reference {
                    text.push('&');
                }
                text.push(' ');
                text.push_str(&arg.name);
                text
            })
            .collect();
        line.push_str(&format!("({});", args.join(", ")));
        push_line(out, depth, &line);
    }

    fn render_typedef(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        decl: &Typedef,
        depth: usize,
    ) {
        let underlying = self.render_type_reference(cx, key, &decl.underlying);
        push_line(out, depth, &format!("using {} = {underlying};", decl.name));
    }
}
