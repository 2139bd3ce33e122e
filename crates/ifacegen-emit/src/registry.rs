//! Registry of header syntaxes.

use crate::traits::Syntax;
use std::sync::{OnceLock, PoisonError, RwLock};

/// Global registry of syntaxes.
static SYNTAXES: RwLock<Vec<&'static dyn Syntax>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom syntax.
///
/// Built-in syntaxes are registered automatically on first use. A custom
/// syntax registered under a built-in name is shadowed by the built-in.
pub fn register_syntax(syntax: &'static dyn Syntax) {
    init_builtin();
    SYNTAXES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(syntax);
}

/// Initialize built-in syntaxes (called automatically on first use).
fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut syntaxes = SYNTAXES.write().unwrap_or_else(PoisonError::into_inner);

        #[cfg(feature = "syntax-c")]
        {
            syntaxes.push(&crate::output::c::C_SYNTAX);
        }

        #[cfg(feature = "syntax-cpp")]
        {
            syntaxes.push(&crate::output::cpp::CPP_SYNTAX);
        }
    });
}

/// Get a syntax by name.
pub fn get_syntax(name: &str) -> Option<&'static dyn Syntax> {
    init_builtin();
    SYNTAXES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|s| s.name() == name)
        .copied()
}

/// List all registered syntaxes.
pub fn syntaxes() -> Vec<&'static dyn Syntax> {
    init_builtin();
    SYNTAXES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// List all registered syntax names.
pub fn syntax_names() -> Vec<&'static str> {
    init_builtin();
    SYNTAXES
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .map(|s| s.name())
        .collect()
}
