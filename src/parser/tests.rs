//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Function declarations
//! - Variable declarations
//! - Expressions
//! - Control flow statements

use crate::ast::ast::{Expr, Stmt};
use crate::lexer::lexer::tokenize;

use super::parser::parse;

fn parse_source(source: &str) -> Result<crate::ast::statements::Program, crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.lang".to_string())).unwrap();
    let (_, result) = parse(tokens, std::rc::Rc::new("test.lang".to_string()));
    result
}

#[test]
fn test_parse_function_declaration() {
    let result = parse_source("fn add(a: int, b: int) -> int { return a + b; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    assert_eq!(program.functions.len(), 1);

    let function = &program.functions[0];
    assert_eq!(function.identifier, "add");
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0], ("a".to_string(), "int".to_string()));
    assert_eq!(function.parameters[1], ("b".to_string(), "int".to_string()));
    assert_eq!(function.return_type, Some("int".to_string()));
}

#[test]
fn test_parse_function_without_return_type() {
    let result = parse_source("fn noop() { }");

    assert!(result.is_ok());
    let program = result.unwrap();
    assert_eq!(program.functions[0].return_type, None);
    assert!(program.functions[0].body.body.is_empty());
}

#[test]
fn test_parse_variable_declaration() {
    let result = parse_source("fn f() { var x = 42; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.identifier, "x");
            assert!(decl.explicit_type.is_none());
            assert!(decl.assigned_value.is_some());
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration_with_type() {
    let result = parse_source("fn f() { var x: int = 42; var y: char; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => assert_eq!(decl.explicit_type, Some("int".to_string())),
        other => panic!("expected a variable declaration, got {:?}", other),
    }
    match &program.functions[0].body.body[1] {
        Stmt::VarDecl(decl) => {
            assert_eq!(decl.explicit_type, Some("char".to_string()));
            assert!(decl.assigned_value.is_none());
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_if_statement() {
    let result = parse_source("fn f(x: int) { if (x == 1) { return; } }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::If(if_stmt) => {
            assert!(matches!(if_stmt.condition, Expr::Binary(_)));
            assert!(if_stmt.else_body.is_none());
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_statement() {
    let result = parse_source("fn f(x: int) { if (x == 1) { } else { } }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::If(if_stmt) => assert!(if_stmt.else_body.is_some()),
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_else_if_chain() {
    let result = parse_source("fn f(x: int) { if (x == 1) { } else if (x == 2) { } else { } }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::If(if_stmt) => match if_stmt.else_body.as_deref() {
            Some(Stmt::If(nested)) => assert!(nested.else_body.is_some()),
            other => panic!("expected a nested if, got {:?}", other),
        },
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_statement() {
    let result = parse_source("fn f() { var x; x = 3; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[1] {
        Stmt::Assignment(assignment) => assert_eq!(assignment.target, "x"),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_binary_expression_precedence() {
    let result = parse_source("fn f() { var result = 5 + 3 * 2; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => match decl.assigned_value.as_ref().unwrap() {
            // `+` binds weaker than `*`, so it must be the root
            Expr::Binary(binary) => {
                assert_eq!(binary.operator.value, "+");
                assert!(matches!(*binary.right, Expr::Binary(_)));
            }
            other => panic!("expected a binary expression, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_grouping_expression() {
    let result = parse_source("fn f() { var result = (5 + 3) * 2; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => match decl.assigned_value.as_ref().unwrap() {
            Expr::Binary(binary) => {
                assert_eq!(binary.operator.value, "*");
                assert!(matches!(*binary.left, Expr::Grouping(_)));
            }
            other => panic!("expected a binary expression, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_prefix_expression() {
    let result = parse_source("fn f(b: bool) { var x = -1; var y = !b; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => assert!(matches!(decl.assigned_value, Some(Expr::Prefix(_)))),
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_call_expression() {
    let result = parse_source("fn f() { var x = add(1, 2); }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::VarDecl(decl) => match decl.assigned_value.as_ref().unwrap() {
            Expr::Call(call) => {
                assert!(matches!(*call.callee, Expr::Symbol(_)));
                assert_eq!(call.arguments.len(), 2);
            }
            other => panic!("expected a call expression, got {:?}", other),
        },
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_call_statement() {
    let result = parse_source("fn f() { g(); }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::Expression(stmt) => assert!(matches!(stmt.expression, Expr::Call(_))),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_block() {
    let result = parse_source("fn f() { { var inner = 1; } }");

    assert!(result.is_ok());
    let program = result.unwrap();
    assert!(matches!(program.functions[0].body.body[0], Stmt::Block(_)));
}

#[test]
fn test_parse_return_without_value() {
    let result = parse_source("fn f() { return; }");

    assert!(result.is_ok());
    let program = result.unwrap();
    match &program.functions[0].body.body[0] {
        Stmt::Return(ret) => assert!(ret.value.is_none()),
        other => panic!("expected a return statement, got {:?}", other),
    }
}

#[test]
fn test_parse_rejects_top_level_statement() {
    let result = parse_source("var x = 1;");

    assert!(result.is_err());
}

#[test]
fn test_parse_missing_semicolon() {
    let result = parse_source("fn f() { var x = 1 }");

    assert!(result.is_err());
}

#[test]
fn test_parse_node_ids_unique() {
    let program = parse_source("fn f(x: int) { var y = x + 1; }").unwrap();

    let function = &program.functions[0];
    let mut ids = vec![program.id, function.id, function.body.id];
    match &function.body.body[0] {
        Stmt::VarDecl(decl) => {
            let expr = decl.assigned_value.as_ref().unwrap();
            ids.push(expr.get_id());
            if let Expr::Binary(binary) = expr {
                ids.push(binary.left.get_id());
                ids.push(binary.right.get_id());
            }
        }
        other => panic!("expected a variable declaration, got {:?}", other),
    }

    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(ids.len(), deduped.len());
}
