//! Pipeline orchestration for the semantic passes.
//!
//! `type_check` runs scope building, constraint generation and
//! unification over a parsed program and hands back everything the
//! reporter and the transpiler need: the scope tree, the node side
//! tables, and the solved substitution.

use std::collections::HashMap;

use crate::ast::statements::Program;
use crate::errors::errors::Error;

use super::{
    constraints::{ConstraintGenerator, TypeEquation},
    scope::{build_scopes, ScopeArena, ScopeId},
    types::{TypeArena, TypeId},
    unify::{apply_unifier, unify_equations, Substitution},
};

#[derive(Debug)]
pub struct TypeChecker {
    pub arena: TypeArena,
    pub scopes: ScopeArena,
    /// Scope attached to each scope-introducing node, keyed by node id.
    pub node_scopes: HashMap<i32, ScopeId>,
    /// Inferred type of every expression node, keyed by node id.
    pub node_types: HashMap<i32, TypeId>,
    /// Function type of every `fn` declaration, keyed by node id.
    pub function_types: HashMap<i32, TypeId>,
    pub equations: Vec<TypeEquation>,
    pub subst: Substitution,
}

/// Runs the semantic pipeline over a program.
///
/// On unification failure the returned error describes the first
/// unsolvable equation and the substitution is left empty — no partial
/// result is retained.
pub fn type_check(program: &Program) -> (TypeChecker, Option<Error>) {
    let mut arena = TypeArena::new();

    let scope_pass = build_scopes(program, &mut arena);

    let mut generator = ConstraintGenerator::new(
        &mut arena,
        &scope_pass.scopes,
        &scope_pass.node_scopes,
        &scope_pass.function_types,
    );
    generator.generate(program);

    let (node_types, equations) = generator.finish();

    let (subst, error) = match unify_equations(&equations, &arena) {
        Ok(subst) => (subst, None),
        Err(error) => (Substitution::new(), Some(error)),
    };

    let type_checker = TypeChecker {
        arena,
        scopes: scope_pass.scopes,
        node_scopes: scope_pass.node_scopes,
        node_types,
        function_types: scope_pass.function_types,
        equations,
        subst,
    };

    (type_checker, error)
}

impl TypeChecker {
    /// Fully applies the solved substitution to a type.
    pub fn resolve(&mut self, ty: TypeId) -> TypeId {
        apply_unifier(ty, &self.subst, &mut self.arena)
    }

    /// One line per declaration, `<name>: <printed resolved type>`, in
    /// scope-creation order and declaration order within a scope.
    pub fn report(&mut self) -> String {
        let mut out = String::new();

        for index in 0..self.scopes.len() {
            let scope = ScopeId(index as u32);
            for (name, ty) in self.scopes.symbols_in_order(scope) {
                let resolved = self.resolve(ty);
                out.push_str(&format!("{}: {}\n", name, self.arena.print(resolved)));
            }
        }

        out
    }
}
