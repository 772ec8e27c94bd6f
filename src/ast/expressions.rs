use crate::{lexer::tokens::Token, Span};

use super::ast::Expr;

// LITERALS

/// Number Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: i64,
    pub id: i32,
    pub span: Span,
}

/// Bool Expression
/// Represents a `true` or `false` literal in the AST.
#[derive(Debug, Clone)]
pub struct BoolExpr {
    pub value: bool,
    pub id: i32,
    pub span: Span,
}

/// Char Expression
/// Represents a character literal in the AST.
#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub id: i32,
    pub span: Span,
}

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub id: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub id: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: Box<Expr>,
    pub id: i32,
    pub span: Span,
}

/// Grouping Expression
/// A parenthesized expression. Kept as its own node so the constraint
/// generator can assign it a type of its own.
#[derive(Debug, Clone)]
pub struct GroupingExpr {
    pub inner: Box<Expr>,
    pub id: i32,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    pub id: i32,
    pub span: Span,
}
