//! Type checking and semantic analysis module.
//!
//! This module infers a type for every declaration in the program using
//! Hindley-Milner style unification. It runs three stages over the AST:
//!
//! - A scope pass that builds the lexical scope tree and binds every
//!   declared name (functions, parameters, locals) to a type
//! - A constraint pass that assigns a type to every expression node and
//!   generates type equations from the language's typing rules
//! - A unification pass that solves the equations into a substitution,
//!   rejecting structural mismatches and infinite types
//!
//! Scope errors (duplicate declarations, undeclared identifiers) are
//! logged and tolerated; unification errors reject the whole program.

pub mod constraints;
pub mod scope;
pub mod type_checker;
pub mod types;
pub mod unify;

#[cfg(test)]
mod tests;
