//! Constraint generation: the second walk over the AST.
//!
//! Reuses the scopes attached by the scope pass, assigns a type to every
//! expression node (keyed by node id), and emits the type equations that
//! encode the language's typing rules. Rules needing a "fresh" type
//! allocate the expression's type variable on entry and relate it to the
//! subexpression types on exit.
//!
//! Resolution failures are logged and produce no equation: the offending
//! expression keeps an unconstrained variable, so one bad reference does
//! not abort the pass.

use std::collections::HashMap;

use crate::ast::{
    ast::{Expr, Stmt},
    statements::{BlockStmt, FnDeclStmt, Program},
};
use crate::lexer::tokens::TokenKind;

use super::{
    scope::{ScopeArena, ScopeId},
    types::{Type, TypeArena, TypeId},
};

/// An assertion that two types denote the same type.
///
/// The pair is unordered as far as solvability goes; the equation list
/// order only shapes the substitution's presentation.
#[derive(Debug, Clone, Copy)]
pub struct TypeEquation {
    pub left: TypeId,
    pub right: TypeId,
}

pub struct ConstraintGenerator<'a> {
    arena: &'a mut TypeArena,
    scopes: &'a ScopeArena,
    node_scopes: &'a HashMap<i32, ScopeId>,
    function_types: &'a HashMap<i32, TypeId>,
    pub node_types: HashMap<i32, TypeId>,
    pub equations: Vec<TypeEquation>,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(
        arena: &'a mut TypeArena,
        scopes: &'a ScopeArena,
        node_scopes: &'a HashMap<i32, ScopeId>,
        function_types: &'a HashMap<i32, TypeId>,
    ) -> Self {
        ConstraintGenerator {
            arena,
            scopes,
            node_scopes,
            function_types,
            node_types: HashMap::new(),
            equations: Vec::new(),
        }
    }

    pub fn generate(&mut self, program: &Program) {
        for function in &program.functions {
            self.gen_function(function);
        }
    }

    /// Releases the arena borrow and hands back the pass results.
    pub fn finish(self) -> (HashMap<i32, TypeId>, Vec<TypeEquation>) {
        (self.node_types, self.equations)
    }

    /// The scope attached to a node, or the enclosing one for nodes that
    /// introduce none.
    fn scope_for(&self, node_id: i32, enclosing: ScopeId) -> ScopeId {
        self.node_scopes.get(&node_id).copied().unwrap_or(enclosing)
    }

    fn equate(&mut self, left: TypeId, right: TypeId) {
        self.equations.push(TypeEquation { left, right });
    }

    fn gen_function(&mut self, function: &FnDeclStmt) {
        // The scope pass records a function type for every declaration,
        // collision or not, so return statements always have a result
        // slot to constrain against.
        let recorded = self.function_types.get(&function.id).and_then(|function_type| {
            match self.arena.get(*function_type) {
                Type::Function { to, .. } => Some(*to),
                _ => None,
            }
        });
        let result_type = match recorded {
            Some(result_type) => result_type,
            None => {
                log::warn!(
                    "no function type recorded for `{}`",
                    function.identifier
                );
                self.arena.new_type_variable()
            }
        };

        let function_scope = self.scope_for(function.id, ScopeId(0));
        self.gen_block(&function.body, function_scope, result_type);
    }

    fn gen_block(&mut self, block: &BlockStmt, enclosing: ScopeId, result_type: TypeId) {
        let scope = self.scope_for(block.id, enclosing);
        for stmt in block.iter() {
            self.gen_stmt(stmt, scope, result_type);
        }
    }

    fn gen_stmt(&mut self, stmt: &Stmt, scope: ScopeId, result_type: TypeId) {
        match stmt {
            Stmt::Expression(expr_stmt) => {
                self.gen_expr(&expr_stmt.expression, scope);
            }
            Stmt::VarDecl(decl) => {
                if let Some(value) = &decl.assigned_value {
                    let value_type = self.gen_expr(value, scope);
                    match self.scopes.find_symbol(scope, &decl.identifier) {
                        Some(declared_type) => self.equate(declared_type, value_type),
                        None => log::warn!(
                            "symbol definition not found: `{}`",
                            decl.identifier
                        ),
                    }
                }
            }
            Stmt::Assignment(assignment) => {
                let value_type = self.gen_expr(&assignment.value, scope);
                match self.scopes.resolve(scope, &assignment.target) {
                    Some(target_type) => self.equate(target_type, value_type),
                    None => log::warn!(
                        "assignment to undeclared identifier `{}`",
                        assignment.target
                    ),
                }
            }
            Stmt::If(if_stmt) => {
                let if_scope = self.scope_for(if_stmt.id, scope);
                let condition_type = self.gen_expr(&if_stmt.condition, if_scope);
                let bool_type = self.arena.new_concrete("bool");
                self.equate(condition_type, bool_type);

                self.gen_block(&if_stmt.then_body, if_scope, result_type);
                if let Some(else_body) = &if_stmt.else_body {
                    self.gen_stmt(else_body, if_scope, result_type);
                }
            }
            Stmt::Return(return_stmt) => {
                if let Some(value) = &return_stmt.value {
                    let value_type = self.gen_expr(value, scope);
                    self.equate(value_type, result_type);
                }
            }
            Stmt::Block(block) => self.gen_block(block, scope, result_type),
        }
    }

    fn gen_expr(&mut self, expr: &Expr, scope: ScopeId) -> TypeId {
        let ty = match expr {
            // Literals get their concrete type immediately; no equations.
            Expr::Number(_) => self.arena.new_concrete("int"),
            Expr::Bool(_) => self.arena.new_concrete("bool"),
            Expr::Char(_) => self.arena.new_concrete("char"),
            Expr::Symbol(symbol) => {
                let ty = self.arena.new_type_variable();
                match self.scopes.resolve(scope, &symbol.value) {
                    Some(bound_type) => self.equate(ty, bound_type),
                    // No equation: the reference keeps an unconstrained
                    // variable and the pass continues.
                    None => log::warn!("use of undeclared identifier `{}`", symbol.value),
                }
                ty
            }
            Expr::Grouping(grouping) => {
                let ty = self.arena.new_type_variable();
                let inner_type = self.gen_expr(&grouping.inner, scope);
                self.equate(ty, inner_type);
                ty
            }
            Expr::Prefix(prefix) => {
                // Negate and logical not only force operand and result to
                // agree; no numeric or boolean restriction is imposed.
                let ty = self.arena.new_type_variable();
                let operand_type = self.gen_expr(&prefix.right_expr, scope);
                self.equate(ty, operand_type);
                ty
            }
            Expr::Binary(binary) => {
                let ty = self.arena.new_type_variable();
                let left_type = self.gen_expr(&binary.left, scope);
                let right_type = self.gen_expr(&binary.right, scope);

                match binary.operator.kind {
                    TokenKind::Equals | TokenKind::NotEquals => {
                        let bool_type = self.arena.new_concrete("bool");
                        self.equate(left_type, right_type);
                        self.equate(ty, bool_type);
                    }
                    // mul/div and plus/minus force all three types equal
                    _ => {
                        self.equate(ty, left_type);
                        self.equate(ty, right_type);
                    }
                }
                ty
            }
            Expr::Call(call) => {
                let ty = self.arena.new_type_variable();
                let callee_type = self.gen_expr(&call.callee, scope);
                let argument_types: Vec<TypeId> = call
                    .arguments
                    .iter()
                    .map(|argument| self.gen_expr(argument, scope))
                    .collect();

                let expected_type = self.arena.new_function(argument_types, ty);
                self.equate(callee_type, expected_type);
                ty
            }
        };

        self.node_types.insert(expr.get_id(), ty);
        ty
    }
}
