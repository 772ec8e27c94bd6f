use crate::ast::{ast::Stmt, statements::IfStmt};

use super::{expr::gen_expression, transpiler::Transpiler};

pub fn gen_statement(transpiler: &mut Transpiler, statement: &Stmt) {
    match statement {
        Stmt::Expression(stmt) => {
            transpiler.push_indent();
            gen_expression(transpiler, &stmt.expression);
            transpiler.push(";\n");
        }
        Stmt::VarDecl(decl) => {
            // The declaration itself was flattened to the top of the
            // function; only the initializing assignment remains here.
            if let Some(value) = &decl.assigned_value {
                transpiler.push_indent();
                transpiler.push(&format!("{} = ", decl.identifier));
                gen_expression(transpiler, value);
                transpiler.push(";\n");
            }
        }
        Stmt::Assignment(assignment) => {
            transpiler.push_indent();
            transpiler.push(&format!("{} = ", assignment.target));
            gen_expression(transpiler, &assignment.value);
            transpiler.push(";\n");
        }
        Stmt::Return(return_stmt) => {
            transpiler.push_indent();
            transpiler.push("return");
            if let Some(value) = &return_stmt.value {
                transpiler.push(" ");
                gen_expression(transpiler, value);
            }
            transpiler.push(";\n");
        }
        Stmt::Block(block) => {
            transpiler.push_indent();
            transpiler.push("{\n");
            transpiler.indent_level += 1;
            for stmt in block.iter() {
                gen_statement(transpiler, stmt);
            }
            transpiler.indent_level -= 1;
            transpiler.push_indent();
            transpiler.push("}\n");
        }
        Stmt::If(if_stmt) => gen_if_statement(transpiler, if_stmt, true),
    }
}

fn gen_if_statement(transpiler: &mut Transpiler, if_stmt: &IfStmt, with_indent: bool) {
    if with_indent {
        transpiler.push_indent();
    }

    transpiler.push("if (");
    gen_expression(transpiler, &if_stmt.condition);
    transpiler.push(") {\n");

    transpiler.indent_level += 1;
    for stmt in if_stmt.then_body.iter() {
        gen_statement(transpiler, stmt);
    }
    transpiler.indent_level -= 1;

    transpiler.push_indent();
    transpiler.push("}");

    match if_stmt.else_body.as_deref() {
        Some(Stmt::If(nested)) => {
            transpiler.push(" else ");
            gen_if_statement(transpiler, nested, false);
        }
        Some(Stmt::Block(block)) => {
            transpiler.push(" else {\n");
            transpiler.indent_level += 1;
            for stmt in block.iter() {
                gen_statement(transpiler, stmt);
            }
            transpiler.indent_level -= 1;
            transpiler.push_indent();
            transpiler.push("}\n");
        }
        Some(other) => {
            transpiler.push(" else {\n");
            transpiler.indent_level += 1;
            gen_statement(transpiler, other);
            transpiler.indent_level -= 1;
            transpiler.push_indent();
            transpiler.push("}\n");
        }
        None => transpiler.push("\n"),
    }
}
