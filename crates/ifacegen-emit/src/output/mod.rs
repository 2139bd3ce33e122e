//! Built-in header syntaxes.
//!
//! Each syntax implements [`Syntax`](crate::traits::Syntax) and is reachable
//! through the registry by name.

// Flattened C
#[cfg(feature = "syntax-c")]
pub mod c;

#[cfg(feature = "syntax-c")]
pub use c::{C_SYNTAX, CSyntax, generate_c};

// Namespaced C++
#[cfg(feature = "syntax-cpp")]
pub mod cpp;

#[cfg(feature = "syntax-cpp")]
pub use cpp::{CPP_SYNTAX, CppSyntax, generate_cpp};
