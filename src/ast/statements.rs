use std::slice::Iter;

use crate::Span;

use super::ast::{Expr, Stmt};

/// The root of a parsed source file: a list of function declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub functions: Vec<FnDeclStmt>,
    pub id: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub id: i32,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub explicit_type: Option<String>,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssignmentStmt {
    pub target: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<Box<Stmt>>,
    pub id: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<(String, String)>,
    pub return_type: Option<String>,
    pub body: BlockStmt,
    pub id: i32,
    pub span: Span,
}
