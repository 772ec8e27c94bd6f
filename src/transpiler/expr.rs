use crate::ast::ast::Expr;

use super::transpiler::Transpiler;

pub fn gen_expression(transpiler: &mut Transpiler, expression: &Expr) {
    match expression {
        Expr::Number(expr) => transpiler.push(&expr.value.to_string()),
        Expr::Bool(expr) => transpiler.push(if expr.value { "true" } else { "false" }),
        Expr::Char(expr) => transpiler.push(&format!("'{}'", escape_char(expr.value))),
        Expr::Symbol(expr) => transpiler.push(&expr.value),
        Expr::Binary(expr) => {
            gen_expression(transpiler, &expr.left);
            transpiler.push(&format!(" {} ", expr.operator.value));
            gen_expression(transpiler, &expr.right);
        }
        Expr::Prefix(expr) => {
            transpiler.push(&expr.operator.value);
            gen_expression(transpiler, &expr.right_expr);
        }
        Expr::Grouping(expr) => {
            transpiler.push("(");
            gen_expression(transpiler, &expr.inner);
            transpiler.push(")");
        }
        Expr::Call(expr) => {
            gen_expression(transpiler, &expr.callee);
            transpiler.push("(");
            for (index, argument) in expr.arguments.iter().enumerate() {
                gen_expression(transpiler, argument);
                if index + 1 < expr.arguments.len() {
                    transpiler.push(", ");
                }
            }
            transpiler.push(")");
        }
    }
}

fn escape_char(value: char) -> String {
    match value {
        '\n' => String::from("\\n"),
        '\t' => String::from("\\t"),
        '\r' => String::from("\\r"),
        '\0' => String::from("\\0"),
        '\\' => String::from("\\\\"),
        '\'' => String::from("\\'"),
        _ => value.to_string(),
    }
}
