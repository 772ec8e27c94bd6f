use crate::Span;

use super::{
    expressions::{
        BinaryExpr, BoolExpr, CallExpr, CharExpr, GroupingExpr, NumberExpr, PrefixExpr, SymbolExpr,
    },
    statements::{
        AssignmentStmt, BlockStmt, ExpressionStmt, IfStmt, ReturnStmt, VarDeclStmt,
    },
};

/// Expression nodes.
///
/// A closed set of variants, one per expression kind, matched exhaustively
/// by the semantic passes and the emitter.
#[derive(Debug, Clone)]
pub enum Expr {
    Number(NumberExpr),
    Bool(BoolExpr),
    Char(CharExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Grouping(GroupingExpr),
    Call(CallExpr),
}

impl Expr {
    /// Returns the parser-assigned id of the expression node.
    pub fn get_id(&self) -> i32 {
        match self {
            Expr::Number(expr) => expr.id,
            Expr::Bool(expr) => expr.id,
            Expr::Char(expr) => expr.id,
            Expr::Symbol(expr) => expr.id,
            Expr::Binary(expr) => expr.id,
            Expr::Prefix(expr) => expr.id,
            Expr::Grouping(expr) => expr.id,
            Expr::Call(expr) => expr.id,
        }
    }

    /// Returns the span of the expression.
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(expr) => &expr.span,
            Expr::Bool(expr) => &expr.span,
            Expr::Char(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
            Expr::Grouping(expr) => &expr.span,
            Expr::Call(expr) => &expr.span,
        }
    }
}

/// Statement nodes.
#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    Return(ReturnStmt),
    Block(BlockStmt),
}

impl Stmt {
    /// Returns the span of the statement.
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}
