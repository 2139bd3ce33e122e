//! Flattened C header syntax.
//!
//! C has no scopes, so every identifier is prefixed with the concatenated
//! names of its enclosing namespaces (`omm` + `Cpu` + `BakeInputDesc` gives
//! `ommCpuBakeInputDesc`). Member defaults cannot be written inline, so a
//! struct with defaulted members gets an extra `<Name>Default()` factory.

use crate::error::EmitError;
use crate::format::{column_width, pad, push_line, write_comment};
use crate::options::EmitOptions;
use crate::traits::{Context, Syntax};
use ifacegen_schema::{
    Declaration, DefaultValue, Enum, EnumValueInit, Function, Member, Namespace, Schema, Struct,
    Typedef,
};

/// Static instance of the C syntax for the registry.
pub static C_SYNTAX: CSyntax = CSyntax;

/// Flattening strategy.
pub struct CSyntax;

/// Render `schema` as a flattened C header body.
pub fn generate_c(schema: &Schema, options: &EmitOptions) -> Result<String, EmitError> {
    crate::walk::generate(schema, &C_SYNTAX, options)
}

impl CSyntax {
    /// Name of the declaration `key` itself.
    fn flat_name(&self, cx: &Context<'_>, key: &str, name: &str) -> String {
        match cx.paths.flattened_prefix(key) {
            Some(prefix) => format!("{prefix}{name}"),
            None => name.to_string(),
        }
    }

    /// Everything left of the member name: `const T*`.
    fn member_lhs(&self, cx: &Context<'_>, from: &str, member: &Member) -> String {
        let mut lhs = String::new();
        if member.is_const {
            lhs.push_str("const ");
        }
        lhs.push_str(&self.render_type_reference(cx, from, &member.ty));
        if member.is_pointer {
            lhs.push('*');
        }
        lhs
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
        for (member, lhs) in members.iter().zip(&lhs) {
            if let Some(comment) = &member.comment {
                write_comment(out, comment, depth);
            }
            push_line(
                out,
                depth,
                &format!("{}{};", pad(lhs, width + 1), member.name),
            );
        }
    }

    fn default_value(
        &self,
        cx: &Context<'_>,
        from: &str,
        member: &Member,
        value: &DefaultValue,
    ) -> String {
        match value {
            DefaultValue::Literal(text) => match text.as_str() {
                "nullptr" => "NULL".to_string(),
                "true" => "1".to_string(),
                "false" => "0".to_string(),
                other => other.to_string(),
            },
            DefaultValue::UseTypeDefault => {
                let ty = self.render_type_reference(cx, from, &member.ty);
                match cx.schema.get(&member.ty) {
                    Some(Declaration::Struct(s)) if s.has_defaults() => format!("{ty}Default()"),
                    Some(Declaration::Struct(_)) => format!("({ty}){{0}}"),
                    Some(Declaration::Enum(_)) => format!("({ty})0"),
                    _ => "0".to_string(),
                }
            }
            DefaultValue::EnumValueReference { enum_key, value } => {
                let key = enum_key.as_deref().unwrap_or(&member.ty);
                format!("{}_{value}", self.render_type_reference(cx, from, key))
            }
        }
    }

    /// `inline T TDefault()` assigning every defaulted member.
    fn write_default_factory(
        &self,
        cx: &Context<'_>,
        out: &mut String,
        key: &str,
        name: &str,
        decl: &Struct,
        depth: usize,
    ) {
        let width = column_width(decl.members.iter().map(|m| m.name.as_str()));
        out.push('\n');
        push_line(out, depth, &format!("inline {name} {name}Default()"));
        push_line(out, depth, "{");
        push_line(out, depth + 1, &format!("{name} v;"));
        for member in &decl.members {
            let Some(value) = &member.default else {
                continue;
            };
            let value = self.default_value(cx, key, member, value);
            let target = format!("v.{}", member.name);
            push_line(
                out,
                depth + 1,
                &format!("{} = {value};", pad(&target, width + 3)),
            );
        }
        push_line(out, depth + 1, "return v;");
        push_line(out, depth, "}");
    }
}

impl Syntax for CSyntax {
    fn name(&self) -> &'static str {
        "c"
    }

    fn extension(&self) -> &'static str {
        "h"
    }

    fn includes(&self, decl: &Declaration) -> bool {
        !matches!(decl, Declaration::Struct(s) if s.namespaced_only)
    }

    fn prologue(&self, cx: &Context<'_>, out: &mut String) {
        out.push_str(&format!(
            "typedef {} {};\n\n",
            cx.options.bool_storage, cx.options.bool_alias
        ));
    }

    fn render_type_reference(&self, cx: &Context<'_>, _from: &str, ty: &str) -> String {
        if ty == "bool" {
            return cx.options.bool_alias.clone();
        }
        match cx.schema.get(ty) {
            Some(decl) => self.flat_name(cx, ty, decl.name()),
            None => {
                tracing::trace!(ty, "passing through unresolved type name");
                ty.to_string()
            }
        }
    }

    fn open_namespace(
        &self,
        _cx: &Context<'_>,
        _out: &mut String,
        _ns: &Namespace,
        depth: usize,
    ) -> usize {
        depth
    }

    fn close_namespace(&self, _cx: &Context<'_>, _out: &mut String, _ns: &Namespace, _depth: usize) {
    }

    fn render_enum(&self, cx: &Context<'_>, out: &mut String, key: &str, decl: &Enum, depth: usize) {
        let name = self.flat_name(cx, key, &decl.name);
        let tags: Vec<String> = decl
            .values
            .iter()
            .map(|v| format!("{name}_{}", v.name))
            .collect();
        let width = column_width(&tags);

        push_line(out, depth, &format!("typedef enum {name}"));
        push_line(out, depth, "{");
        for (i, (value, tag)) in decl.values.iter().zip(&tags).enumerate() {
            if i > 0 && decl.blank_line_between_values {
                out.push('\n');
            }
            if let Some(comment) = &value.comment {
                write_comment(out, comment, depth + 1);
            }
            let line = match &value.value {
                Some(EnumValueInit::Literal(text)) => format!("{}= {text},", pad(tag, width + 1)),
                Some(EnumValueInit::Reference(target)) => format!(
                    "{}= {},",
                    pad(tag, width + 1),
                    self.render_type_reference(cx, key, target)
                ),
                None => format!("{tag},"),
            };
            push_line(out, depth + 1, &line);
        }
        push_line(out, depth, &format!("}} {name};"));
        if decl.is_flag {
            push_line(out, depth, &format!("{}({name});", cx.options.flag_macro));
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
        let name = self.flat_name(cx, key, &decl.name);

        push_line(out, depth, &format!("typedef struct {name}"));
        push_line(out, depth, "{");
        self.write_members(cx, out, key, &decl.members, depth + 1);
        if !decl.union_members.is_empty() {
            out.push('\n');
            push_line(out, depth + 1, "union");
            push_line(out, depth + 1, "{");
            self.write_members(cx, out, key, &decl.union_members, depth + 2);
            push_line(out, depth + 1, "};");
        }
        push_line(out, depth, &format!("}} {name};"));

        if decl.has_defaults() {
            self.write_default_factory(cx, out, key, &name, decl, depth);
        }
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

        let mut line = format!("{} ", cx.options.export_macro);
        if decl.ret.is_const {
            line.push_str("const ");
        }
        line.push_str(&self.render_type_reference(cx, key, &decl.ret.ty));
        if decl.ret.is_reference {
            line.push('*');
        }
        line.push(' ');
        line.push_str(&self.flat_name(cx, key, &decl.name));

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
                // C has no references; pass by pointer.
                if arg.is_reference {
                    text.push('*');
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
        let name = self.flat_name(cx, key, &decl.name);
        push_line(out, depth, &format!("typedef {underlying} {name};"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(schema: serde_json::Value) -> String {
        let schema = ifacegen_schema::from_value(schema).unwrap();
        generate_c(&schema, &EmitOptions::for_prefix("omm")).unwrap()
    }

    #[test]
    fn enum_scenario() {
        let out = render(json!({
            "layout": ["B"],
            "B": { "type": "enum", "name": "Kind", "values": [{ "name": "X" }, { "name": "Y", "value": "5" }] }
        }));
        assert!(out.contains("typedef enum Kind\n{\n   Kind_X,\n   Kind_Y = 5,\n} Kind;\n"), "{out}");
    }

    #[test]
    fn prologue_defines_bool_alias() {
        let out = render(json!({ "layout": [] }));
        assert_eq!(out, "typedef uint8_t ommBool;\n\n");
    }

    #[test]
    fn flag_enum_gets_operator_macro_and_blank_lines() {
        let out = render(json!({
            "layout": ["F"],
            "F": {
                "type": "enum", "name": "Flags", "isFlag": true, "injectNewLine": true,
                "values": [{ "name": "None" }, { "name": "A", "value": "1u << 0", "comment": "first bit" }]
            }
        }));
        let expected = "\
typedef enum Flags
{
   Flags_None,

   // first bit
   Flags_A    = 1u << 0,
} Flags;
OMM_DEFINE_ENUM_FLAG_OPERATORS(Flags);
";
        assert!(out.ends_with(expected), "{out}");
    }

    #[test]
    fn nested_names_are_flattened() {
        let out = render(json!({
            "layout": ["omm"],
            "omm": { "type": "namespace", "name": "omm", "values": ["Cpu"] },
            "Cpu": { "type": "namespace", "name": "Cpu", "values": ["Tex", "Handle", "Create"] },
            "Tex": { "type": "struct", "name": "Texture", "members": [{ "name": "ok", "type": "bool" }] },
            "Handle": { "type": "typedef", "name": "Handle", "underlying_type": "uintptr_t" },
            "Create": {
                "type": "function", "name": "CreateTexture",
                "ret": { "type": "Handle" },
                "args": [
                    { "name": "desc", "type": "Tex", "const": true, "ref": true },
                    { "name": "out", "type": "Handle", "ptr": true },
                    { "name": "all", "type": "Tex", "const": true, "ptr2x": true }
                ]
            }
        }));
        assert!(out.contains("typedef struct ommCpuTexture\n{\n   ommBool ok;\n} ommCpuTexture;\n"), "{out}");
        assert!(out.contains("typedef uintptr_t ommCpuHandle;\n"));
        assert!(out.contains(
            "OMM_API ommCpuHandle ommCpuCreateTexture(const ommCpuTexture* desc, ommCpuHandle* out, const ommCpuTexture** all);\n"
        ));
    }

    #[test]
    fn default_factory_assigns_only_defaulted_members() {
        let out = render(json!({
            "layout": ["Mode", "Inner", "Outer"],
            "Mode": { "type": "enum", "name": "Mode", "values": [{ "name": "Fast" }, { "name": "Slow" }] },
            "Inner": { "type": "struct", "name": "Inner", "members": [{ "name": "x", "type": "float", "value": "0.5f" }] },
            "Outer": {
                "type": "struct", "name": "Outer",
                "members": [
                    { "name": "inner", "type": "Inner", "value": "default" },
                    { "name": "mode", "type": "Mode", "value": { "type": "Mode", "value": "Slow" } },
                    { "name": "enabled", "type": "bool", "value": "true" },
                    { "name": "data", "type": "void", "const": true, "ptr": true, "value": "nullptr" },
                    { "name": "untouched", "type": "uint32_t" }
                ]
            }
        }));
        let expected = "\
typedef struct Outer
{
   Inner       inner;
   Mode        mode;
   ommBool     enabled;
   const void* data;
   uint32_t    untouched;
} Outer;

inline Outer OuterDefault()
{
   Outer v;
   v.inner      = InnerDefault();
   v.mode       = Mode_Slow;
   v.enabled    = 1;
   v.data       = NULL;
   return v;
}
";
        assert!(out.ends_with(expected), "{out}");
        assert!(!out.contains("v.untouched"));
    }

    #[test]
    fn type_default_falls_back_to_zero_equivalents() {
        let out = render(json!({
            "layout": ["Mode", "Plain", "Outer"],
            "Mode": { "type": "enum", "name": "Mode", "values": [{ "name": "Fast" }] },
            "Plain": { "type": "struct", "name": "Plain", "members": [{ "name": "x", "type": "float" }] },
            "Outer": {
                "type": "struct", "name": "Outer",
                "members": [
                    { "name": "p", "type": "Plain", "value": "default" },
                    { "name": "m", "type": "Mode", "value": "default" },
                    { "name": "n", "type": "uint32_t", "value": "default" }
                ]
            }
        }));
        assert!(out.contains("   v.p  = (Plain){0};\n"), "{out}");
        assert!(out.contains("   v.m  = (Mode)0;\n"), "{out}");
        assert!(out.contains("   v.n  = 0;\n"), "{out}");
        assert!(!out.contains("PlainDefault"));
    }

    #[test]
    fn enum_value_reference_uses_flattened_name() {
        let out = render(json!({
            "layout": ["omm"],
            "omm": { "type": "namespace", "name": "omm", "values": ["Cpu", "Debug"] },
            "Cpu": { "type": "namespace", "name": "Cpu", "values": ["CpuX"] },
            "CpuX": { "type": "enum", "name": "X", "values": [{ "name": "A" }] },
            "Debug": { "type": "namespace", "name": "Debug", "values": ["DebugY"] },
            "DebugY": { "type": "enum", "name": "Y", "values": [{ "name": "Same", "value": "CpuX" }] }
        }));
        assert!(out.contains("   ommDebugY_Same = ommCpuX,\n"), "{out}");
    }

    #[test]
    fn emptied_namespace_adds_no_blank_line() {
        let out = render(json!({
            "layout": ["A", "ns", "B"],
            "A": { "type": "typedef", "name": "A", "underlying_type": "int" },
            "ns": { "type": "namespace", "name": "ns", "values": ["S"] },
            "S": { "type": "struct", "name": "S", "cppOnly": true },
            "B": { "type": "typedef", "name": "B", "underlying_type": "int" }
        }));
        assert!(out.ends_with("typedef int A;\n\ntypedef int B;\n"), "{out}");

        let leading = render(json!({
            "layout": ["ns", "B"],
            "ns": { "type": "namespace", "name": "ns", "values": ["S"] },
            "S": { "type": "struct", "name": "S", "cppOnly": true },
            "B": { "type": "typedef", "name": "B", "underlying_type": "int" }
        }));
        assert_eq!(leading, "typedef uint8_t ommBool;\n\ntypedef int B;\n");
    }

    #[test]
    fn struct_without_defaults_has_no_factory() {
        let out = render(json!({
            "layout": ["S"],
            "S": { "type": "struct", "name": "S", "members": [{ "name": "a", "type": "int" }] }
        }));
        assert!(!out.contains("SDefault"));
    }

    #[test]
    fn namespaced_only_structs_are_skipped() {
        let out = render(json!({
            "layout": ["A", "S", "B"],
            "A": { "type": "typedef", "name": "A", "underlying_type": "int" },
            "S": { "type": "struct", "name": "S", "cppOnly": true },
            "B": { "type": "typedef", "name": "B", "underlying_type": "int" }
        }));
        assert!(out.ends_with("typedef int A;\n\ntypedef int B;\n"), "{out}");
    }

    #[test]
    fn union_members_render_one_level_deeper() {
        let out = render(json!({
            "layout": ["P"],
            "P": {
                "type": "struct", "name": "PipelineDesc",
                "members": [{ "name": "type", "type": "uint32_t" }],
                "union_members": [
                    { "name": "compute", "type": "ComputeDesc" },
                    { "name": "graphics", "type": "GraphicsDesc" }
                ]
            }
        }));
        let expected = "\
typedef struct PipelineDesc
{
   uint32_t type;

   union
   {
      ComputeDesc  compute;
      GraphicsDesc graphics;
   };
} PipelineDesc;
";
        assert!(out.ends_with(expected), "{out}");
    }
}
