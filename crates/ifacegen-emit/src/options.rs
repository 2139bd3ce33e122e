//! Names the generated headers rely on but do not define themselves.

/// Library-level names shared by every syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Prefixed to every flattened function, e.g. `OMM_API`.
    pub export_macro: String,
    /// Invoked after each flag enum, e.g. `OMM_DEFINE_ENUM_FLAG_OPERATORS`.
    pub flag_macro: String,
    /// Stand-in for `bool` in the flattened syntax, e.g. `ommBool`.
    pub bool_alias: String,
    /// Integer type the boolean alias is defined as.
    pub bool_storage: String,
}

impl EmitOptions {
    /// Derive every name from one library prefix: `omm` gives `OMM_API`,
    /// `OMM_DEFINE_ENUM_FLAG_OPERATORS` and `ommBool`.
    pub fn for_prefix(prefix: &str) -> Self {
        let upper = prefix.to_uppercase();
        Self {
            export_macro: format!("{upper}_API"),
            flag_macro: format!("{upper}_DEFINE_ENUM_FLAG_OPERATORS"),
            bool_alias: format!("{prefix}Bool"),
            bool_storage: "uint8_t".to_string(),
        }
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::for_prefix("lib")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_derive_from_prefix() {
        let options = EmitOptions::for_prefix("omm");
        assert_eq!(options.export_macro, "OMM_API");
        assert_eq!(options.flag_macro, "OMM_DEFINE_ENUM_FLAG_OPERATORS");
        assert_eq!(options.bool_alias, "ommBool");
        assert_eq!(options.bool_storage, "uint8_t");
    }
}
