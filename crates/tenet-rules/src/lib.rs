//! tenet-rules: built-in style rules
//!
//! Available rules, in registration order:
//! - no-var-declaration: Declare variables with let or const, never var
//! - single-binding-per-declaration: One binding per declaration statement
//! - prefer-strict-equality: Use === and !== instead of == and !=
//! - casing-convention: camelCase bindings, PascalCase constructors,
//!   UPPER_SNAKE_CASE constants, _camelCase private members
//! - prefer-literal-construction: `{}` and `[]` instead of `new Object()` and friends
//! - prefer-template: Template literals instead of string concatenation
//! - no-nested-ternary: Ternaries must not nest
//! - no-ternary: Use if statements instead of ternaries (off by default)
//! - no-class-properties: Assign properties in the constructor (off by default)
//! - private-members-last: Public members before private ones (off by default)

pub mod casing_convention;
pub mod no_class_properties;
pub mod no_nested_ternary;
pub mod no_ternary;
pub mod no_var_declaration;
pub mod prefer_literal_construction;
pub mod prefer_strict_equality;
pub mod prefer_template;
pub mod private_members_last;
pub mod registry;
pub mod single_binding_per_declaration;

mod util;

pub use registry::{builtin_registry, builtin_rules};
