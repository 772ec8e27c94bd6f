//! The unification engine and the substitution it produces.
//!
//! Equations are processed strictly in generation order, threading one
//! accumulating substitution; the first equation that cannot be unified
//! rejects the whole set. This is a syntactic unifier: the grammar is
//! first-order with no overloading, so no backtracking is ever needed.

use std::collections::HashMap;

use crate::errors::errors::{Error, ErrorImpl};
use crate::Position;

use super::constraints::TypeEquation;
use super::types::{Type, TypeArena, TypeId};

/// A mapping from type-variable id to type.
///
/// Kept acyclic by the occurs check at insertion time, so exhaustively
/// chasing bindings always terminates.
#[derive(Debug, Clone, Default)]
pub struct Substitution {
    map: HashMap<u32, TypeId>,
}

impl Substitution {
    pub fn new() -> Self {
        Substitution {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, var: u32) -> Option<TypeId> {
        self.map.get(&var).copied()
    }

    pub fn insert(&mut self, var: u32, ty: TypeId) {
        self.map.insert(var, ty);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Solves the whole equation list, or fails on the first equation that
/// cannot be unified. No partial substitution survives a failure.
pub fn unify_equations(equations: &[TypeEquation], arena: &TypeArena) -> Result<Substitution, Error> {
    let mut subst = Substitution::new();
    for equation in equations {
        subst = unify(equation.left, equation.right, subst, arena)?;
    }
    Ok(subst)
}

/// Unifies two types under an accumulated substitution.
pub fn unify(
    x: TypeId,
    y: TypeId,
    subst: Substitution,
    arena: &TypeArena,
) -> Result<Substitution, Error> {
    if arena.equal(x, y) {
        return Ok(subst);
    }

    if matches!(arena.get(x), Type::Variable { .. }) {
        return unify_variable(x, y, subst, arena);
    }
    if matches!(arena.get(y), Type::Variable { .. }) {
        return unify_variable(y, x, subst, arena);
    }

    if let (
        Type::Function {
            from: from_x,
            to: to_x,
        },
        Type::Function {
            from: from_y,
            to: to_y,
        },
    ) = (arena.get(x), arena.get(y))
    {
        if from_x.len() != from_y.len() {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    expected: from_x.len(),
                    received: from_y.len(),
                },
                Position::null(),
            ));
        }

        // Result first, then parameters left to right.
        let mut subst = unify(*to_x, *to_y, subst, arena)?;
        for (param_x, param_y) in from_x.iter().zip(from_y.iter()) {
            subst = unify(*param_x, *param_y, subst, arena)?;
        }
        return Ok(subst);
    }

    Err(Error::new(
        ErrorImpl::TypeMismatch {
            left: arena.print(x),
            right: arena.print(y),
        },
        Position::null(),
    ))
}

/// Unifies a type variable with another type.
///
/// An already-bound variable defers to its binding (the substitution stays
/// a function, never a relation), and the occurs check rejects bindings
/// that would produce an infinite type.
fn unify_variable(
    type_var: TypeId,
    other: TypeId,
    subst: Substitution,
    arena: &TypeArena,
) -> Result<Substitution, Error> {
    let var_id = match arena.get(type_var) {
        Type::Variable { id } => *id,
        _ => {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    left: arena.print(type_var),
                    right: arena.print(other),
                },
                Position::null(),
            ))
        }
    };

    if let Some(bound) = subst.get(var_id) {
        return unify(bound, other, subst, arena);
    }

    if let Type::Variable { id: other_id } = arena.get(other) {
        if let Some(other_bound) = subst.get(*other_id) {
            return unify(type_var, other_bound, subst, arena);
        }
    }

    if occurs_check(var_id, other, &subst, arena) {
        return Err(Error::new(
            ErrorImpl::InfiniteType {
                type_var: arena.print(type_var),
                contained_in: arena.print(other),
            },
            Position::null(),
        ));
    }

    let mut subst = subst;
    subst.insert(var_id, other);
    Ok(subst)
}

/// Whether the variable occurs inside the given type — directly,
/// transitively through the current substitution, or inside a function
/// type's parameters or result.
pub fn occurs_check(var_id: u32, ty: TypeId, subst: &Substitution, arena: &TypeArena) -> bool {
    match arena.get(ty) {
        Type::Variable { id } => {
            if *id == var_id {
                return true;
            }
            match subst.get(*id) {
                Some(bound) => occurs_check(var_id, bound, subst, arena),
                None => false,
            }
        }
        Type::Function { from, to } => {
            if occurs_check(var_id, *to, subst, arena) {
                return true;
            }
            from.iter()
                .any(|param| occurs_check(var_id, *param, subst, arena))
        }
        Type::Concrete { .. } => false,
    }
}

/// Applies a substitution exhaustively ("zonking"), collapsing a type to
/// its most concrete known form.
///
/// Concrete types come back unchanged; a variable is chased through the
/// substitution until it reaches a non-variable or an unbound variable
/// (unbound variables come back as themselves — an unconstrained type is
/// permitted); a function type is rebuilt in the arena from its resolved
/// parts.
pub fn apply_unifier(ty: TypeId, subst: &Substitution, arena: &mut TypeArena) -> TypeId {
    if subst.is_empty() {
        return ty;
    }

    match arena.get(ty).clone() {
        Type::Concrete { .. } => ty,
        Type::Variable { id } => match subst.get(id) {
            Some(bound) => apply_unifier(bound, subst, arena),
            None => ty,
        },
        Type::Function { from, to } => {
            let mut resolved_from = Vec::with_capacity(from.len());
            for param in from {
                resolved_from.push(apply_unifier(param, subst, arena));
            }
            let resolved_to = apply_unifier(to, subst, arena);
            arena.new_function(resolved_from, resolved_to)
        }
    }
}
