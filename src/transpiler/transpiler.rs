use std::collections::VecDeque;

use crate::ast::statements::{FnDeclStmt, Program};
use crate::type_checker::{
    scope::ScopeId,
    type_checker::TypeChecker,
    types::{Type, TypeId},
};

use super::stmt::gen_statement;

pub struct Transpiler<'a> {
    pub type_checker: &'a mut TypeChecker,
    pub output: String,
    pub indent_level: usize,
}

impl<'a> Transpiler<'a> {
    pub fn push(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn push_indent(&mut self) {
        self.output.push_str(&"  ".repeat(self.indent_level));
    }
}

/// Emits the whole program as a sequence of C-shaped function definitions.
pub fn transpile(program: &Program, type_checker: &mut TypeChecker) -> String {
    let mut transpiler = Transpiler {
        type_checker,
        output: String::new(),
        indent_level: 0,
    };

    for function in &program.functions {
        gen_function(&mut transpiler, function);
    }

    transpiler.output
}

/// The C spelling of a resolved type.
///
/// A function result left as a free variable is a function that never
/// returns a value, so it renders as `void`; any other binding that does
/// not resolve to a concrete type falls back to `int` with a warning.
pub fn emission_type_name(type_checker: &mut TypeChecker, ty: TypeId, is_result: bool) -> String {
    let resolved = type_checker.resolve(ty);
    match type_checker.arena.get(resolved) {
        Type::Concrete { name } => name.clone(),
        Type::Variable { .. } if is_result => String::from("void"),
        _ => {
            log::warn!(
                "no concrete type to emit for `{}`",
                type_checker.arena.print(resolved)
            );
            String::from("int")
        }
    }
}

fn gen_function(transpiler: &mut Transpiler, function: &FnDeclStmt) {
    let result_type = transpiler
        .type_checker
        .function_types
        .get(&function.id)
        .copied()
        .and_then(
            |function_type| match transpiler.type_checker.arena.get(function_type) {
                Type::Function { to, .. } => Some(*to),
                _ => None,
            },
        );

    let return_name = match result_type {
        Some(result_type) => emission_type_name(transpiler.type_checker, result_type, true),
        None => {
            log::warn!("no function type recorded for `{}`", function.identifier);
            String::from("void")
        }
    };

    let function_scope = transpiler
        .type_checker
        .node_scopes
        .get(&function.id)
        .copied();

    transpiler.push(&format!("{} {}(", return_name, function.identifier));

    for (index, (name, _)) in function.parameters.iter().enumerate() {
        let param_type = function_scope
            .and_then(|scope| transpiler.type_checker.scopes.find_symbol(scope, name));
        let param_type_name = match param_type {
            Some(param_type) => emission_type_name(transpiler.type_checker, param_type, false),
            None => {
                log::warn!("symbol definition not found: `{}`", name);
                String::from("int")
            }
        };

        transpiler.push(&format!("{} {}", param_type_name, name));
        if index + 1 < function.parameters.len() {
            transpiler.push(", ");
        }
    }

    transpiler.push(") {\n");
    transpiler.indent_level = 1;

    // Flatten every local in the scope subtree to the top of the function.
    // The walk is breadth-first and starts below the function scope itself,
    // whose bindings are the parameters already emitted in the header.
    if let Some(function_scope) = function_scope {
        let mut queue: VecDeque<ScopeId> = transpiler
            .type_checker
            .scopes
            .get(function_scope)
            .children
            .iter()
            .copied()
            .collect();

        while let Some(scope) = queue.pop_front() {
            for (name, ty) in transpiler.type_checker.scopes.symbols_in_order(scope) {
                let type_name = emission_type_name(transpiler.type_checker, ty, false);
                let mangled = transpiler.type_checker.scopes.mangled_name(scope, &name);
                transpiler.push_indent();
                transpiler.push(&format!("{} {};\n", type_name, mangled));
            }

            queue.extend(
                transpiler
                    .type_checker
                    .scopes
                    .get(scope)
                    .children
                    .iter()
                    .copied(),
            );
        }
    }

    for stmt in function.body.iter() {
        gen_statement(transpiler, stmt);
    }

    transpiler.indent_level = 0;
    transpiler.push("}\n\n");
}
