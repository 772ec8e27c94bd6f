//! C code emission module.
//!
//! This module turns a type-checked program into C-shaped source text.
//! The target has no nested-scope shadowing, so every function body is
//! emitted in two phases:
//!
//! - First one declaration per variable bound anywhere in the function's
//!   scope subtree, each name suffixed with its owning scope's slot number
//! - Then the statements themselves, with var-decl sites reduced to their
//!   initializing assignments
//!
//! Function headers are built from the resolved parameter and result types.

pub mod expr;
pub mod stmt;
pub mod transpiler;
