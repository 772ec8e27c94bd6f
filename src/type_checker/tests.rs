//! Unit tests for the semantic passes.
//!
//! This module contains tests for the type arena, the scope tree, the
//! unifier, the resolver, and the full inference pipeline over small
//! programs.

use crate::ast::statements::Program;
use crate::errors::errors::Error;
use crate::lexer::lexer::tokenize;
use crate::parser::parser::parse;

use super::constraints::TypeEquation;
use super::scope::{ScopeArena, ScopeKind};
use super::type_checker::{type_check, TypeChecker};
use super::types::{Type, TypeArena};
use super::unify::{apply_unifier, unify_equations, Substitution};

fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.lang".to_string())).unwrap();
    let (_, result) = parse(tokens, std::rc::Rc::new("test.lang".to_string()));
    result.unwrap()
}

fn check_source(source: &str) -> (Program, TypeChecker, Option<Error>) {
    let program = parse_source(source);
    let (type_checker, error) = type_check(&program);
    (program, type_checker, error)
}

// ---- type arena ----

#[test]
fn test_concrete_equality_is_structural() {
    let mut arena = TypeArena::new();
    let a = arena.new_concrete("int");
    let b = arena.new_concrete("int");
    let c = arena.new_concrete("bool");

    assert!(arena.equal(a, b));
    assert!(!arena.equal(a, c));
}

#[test]
fn test_type_variables_equal_only_by_id() {
    let mut arena = TypeArena::new();
    let a = arena.new_type_variable();
    let b = arena.new_type_variable();

    assert!(arena.equal(a, a));
    assert!(!arena.equal(a, b));
}

#[test]
fn test_function_equality_deep() {
    let mut arena = TypeArena::new();
    let int_a = arena.new_concrete("int");
    let int_b = arena.new_concrete("int");
    let bool_a = arena.new_concrete("bool");
    let bool_b = arena.new_concrete("bool");

    let f = arena.new_function(vec![int_a], bool_a);
    let g = arena.new_function(vec![int_b], bool_b);
    let h = arena.new_function(vec![int_a, int_b], bool_a);

    assert!(arena.equal(f, g));
    // arity differs
    assert!(!arena.equal(f, h));
}

#[test]
fn test_function_not_equal_to_concrete() {
    let mut arena = TypeArena::new();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![], int);

    assert!(!arena.equal(f, int));
}

#[test]
fn test_print_forms() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![int], var);

    assert_eq!(arena.print(var), "Var (id: 0)");
    assert_eq!(arena.print(int), "Concrete int");
    assert_eq!(arena.print(f), "Func (Concrete int, ) -> Var (id: 0)");
}

// ---- scope tree ----

#[test]
fn test_scope_resolve_walks_to_ancestors() {
    let mut arena = TypeArena::new();
    let mut scopes = ScopeArena::new();

    let root = scopes.new_scope(ScopeKind::Root, None);
    let inner = scopes.new_scope(ScopeKind::Block, Some(root));

    let int = arena.new_concrete("int");
    assert!(scopes.add_symbol(root, "x", int));

    assert_eq!(scopes.resolve(inner, "x"), Some(int));
    assert_eq!(scopes.find_symbol(inner, "x"), None);
}

#[test]
fn test_scope_shadowing() {
    let mut arena = TypeArena::new();
    let mut scopes = ScopeArena::new();

    let root = scopes.new_scope(ScopeKind::Root, None);
    let inner = scopes.new_scope(ScopeKind::Block, Some(root));

    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");
    scopes.add_symbol(root, "x", int);
    scopes.add_symbol(inner, "x", bool_ty);

    assert_eq!(scopes.resolve(inner, "x"), Some(bool_ty));
    assert_eq!(scopes.resolve(root, "x"), Some(int));
}

#[test]
fn test_scope_collision_keeps_first_binding() {
    let mut arena = TypeArena::new();
    let mut scopes = ScopeArena::new();

    let root = scopes.new_scope(ScopeKind::Root, None);
    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");

    assert!(scopes.add_symbol(root, "x", int));
    assert!(!scopes.add_symbol(root, "x", bool_ty));
    assert_eq!(scopes.resolve(root, "x"), Some(int));
}

#[test]
fn test_scope_resolve_missing() {
    let mut scopes = ScopeArena::new();
    let root = scopes.new_scope(ScopeKind::Root, None);

    assert_eq!(scopes.resolve(root, "missing"), None);
}

#[test]
fn test_mangled_names_are_deterministic() {
    let mut scopes = ScopeArena::new();
    let root = scopes.new_scope(ScopeKind::Root, None);
    let block = scopes.new_scope(ScopeKind::Block, Some(root));

    assert_eq!(scopes.mangled_name(block, "y"), "y_1");
}

// ---- unifier ----

#[test]
fn test_unify_variable_with_concrete() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");

    let subst = unify_equations(&[TypeEquation { left: var, right: int }], &arena).unwrap();
    let resolved = apply_unifier(var, &subst, &mut arena);
    assert_eq!(arena.print(resolved), "Concrete int");
}

#[test]
fn test_unify_concrete_mismatch() {
    let mut arena = TypeArena::new();
    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");

    let result = unify_equations(&[TypeEquation { left: int, right: bool_ty }], &arena);
    assert_eq!(result.err().unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_unify_bound_variable_conflict() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");

    let equations = [
        TypeEquation { left: var, right: int },
        TypeEquation { left: var, right: bool_ty },
    ];
    let result = unify_equations(&equations, &arena);
    assert_eq!(result.err().unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_unify_function_types_threading() {
    let mut arena = TypeArena::new();
    let var_a = arena.new_type_variable();
    let var_b = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");

    let f = arena.new_function(vec![var_a], var_b);
    let g = arena.new_function(vec![int], bool_ty);

    let subst = unify_equations(&[TypeEquation { left: f, right: g }], &arena).unwrap();
    let resolved_a = apply_unifier(var_a, &subst, &mut arena);
    assert_eq!(arena.print(resolved_a), "Concrete int");
    let resolved_b = apply_unifier(var_b, &subst, &mut arena);
    assert_eq!(arena.print(resolved_b), "Concrete bool");
}

#[test]
fn test_unify_arity_mismatch() {
    let mut arena = TypeArena::new();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![int], int);
    let g = arena.new_function(vec![int, int], int);

    let result = unify_equations(&[TypeEquation { left: f, right: g }], &arena);
    assert_eq!(result.err().unwrap().get_error_name(), "ArityMismatch");
}

#[test]
fn test_occurs_check_direct() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![var], int);

    let result = unify_equations(&[TypeEquation { left: var, right: f }], &arena);
    assert_eq!(result.err().unwrap().get_error_name(), "InfiniteType");
}

#[test]
fn test_occurs_check_through_substitution() {
    let mut arena = TypeArena::new();
    let var_a = arena.new_type_variable();
    let var_b = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![var_a], int);

    // var_a is bound to var_b first, so the cycle is only visible by
    // chasing the substitution
    let equations = [
        TypeEquation { left: var_a, right: var_b },
        TypeEquation { left: var_b, right: f },
    ];
    let result = unify_equations(&equations, &arena);
    assert_eq!(result.err().unwrap().get_error_name(), "InfiniteType");
}

#[test]
fn test_failure_rejects_whole_equation_set() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let bool_ty = arena.new_concrete("bool");

    // The first equation is unsolvable; the second alone would bind var
    let equations = [
        TypeEquation { left: int, right: bool_ty },
        TypeEquation { left: var, right: int },
    ];
    assert!(unify_equations(&equations, &arena).is_err());
}

// ---- resolver ----

#[test]
fn test_resolution_is_idempotent() {
    let mut arena = TypeArena::new();
    let var_a = arena.new_type_variable();
    let var_b = arena.new_type_variable();
    let int = arena.new_concrete("int");

    let equations = [
        TypeEquation { left: var_a, right: var_b },
        TypeEquation { left: var_b, right: int },
    ];
    let subst = unify_equations(&equations, &arena).unwrap();

    let once = apply_unifier(var_a, &subst, &mut arena);
    let twice = apply_unifier(once, &subst, &mut arena);
    assert!(arena.equal(once, twice));
}

#[test]
fn test_unbound_variable_resolves_to_itself() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let other = arena.new_type_variable();
    let int = arena.new_concrete("int");

    let subst = unify_equations(&[TypeEquation { left: other, right: int }], &arena).unwrap();

    let resolved = apply_unifier(var, &subst, &mut arena);
    assert!(arena.equal(resolved, var));
}

#[test]
fn test_resolution_rebuilds_function_types() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();
    let int = arena.new_concrete("int");
    let f = arena.new_function(vec![var], var);

    let subst = unify_equations(&[TypeEquation { left: var, right: int }], &arena).unwrap();

    let resolved = apply_unifier(f, &subst, &mut arena);
    assert_eq!(arena.print(resolved), "Func (Concrete int, ) -> Concrete int");
}

#[test]
fn test_unification_order_independence_on_success() {
    let mut arena = TypeArena::new();
    let var_a = arena.new_type_variable();
    let var_b = arena.new_type_variable();
    let var_c = arena.new_type_variable();
    let int = arena.new_concrete("int");

    let equations = vec![
        TypeEquation { left: var_a, right: var_b },
        TypeEquation { left: var_b, right: var_c },
        TypeEquation { left: var_c, right: int },
    ];

    // Every permutation of a solvable set resolves the variables to the
    // same concrete answer
    let permutations: Vec<Vec<TypeEquation>> = vec![
        vec![equations[0], equations[1], equations[2]],
        vec![equations[0], equations[2], equations[1]],
        vec![equations[1], equations[0], equations[2]],
        vec![equations[1], equations[2], equations[0]],
        vec![equations[2], equations[0], equations[1]],
        vec![equations[2], equations[1], equations[0]],
    ];

    for permutation in permutations {
        let subst = unify_equations(&permutation, &arena).unwrap();
        for var in [var_a, var_b, var_c] {
            let resolved = apply_unifier(var, &subst, &mut arena);
            assert_eq!(arena.print(resolved), "Concrete int");
        }
    }
}

#[test]
fn test_empty_substitution_resolution_is_identity() {
    let mut arena = TypeArena::new();
    let var = arena.new_type_variable();

    let subst = Substitution::new();
    let resolved = apply_unifier(var, &subst, &mut arena);
    assert_eq!(resolved, var);
}

// ---- pipeline scenarios ----

#[test]
fn test_scenario_identity_function() {
    let (_, mut type_checker, error) =
        check_source("fn id(x: int) -> int { return x; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("id: Func (Concrete int, ) -> Concrete int"));
    assert!(report.contains("x: Concrete int"));
}

#[test]
fn test_scenario_inferred_locals() {
    let (_, mut type_checker, error) =
        check_source("fn f() { var y = 3; var z = y + 1; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("y: Concrete int"));
    assert!(report.contains("z: Concrete int"));
}

#[test]
fn test_scenario_condition_pins_free_variable() {
    let (_, mut type_checker, error) =
        check_source("fn f() { var y; if (y == 1) { } }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("y: Concrete int"));
}

#[test]
fn test_scenario_undeclared_call_does_not_crash() {
    let (program, mut type_checker, error) = check_source("fn f() { g(); }");
    assert!(error.is_none());

    // The call's type stays an unconstrained variable
    let call_id = match &program.functions[0].body.body[0] {
        crate::ast::ast::Stmt::Expression(stmt) => stmt.expression.get_id(),
        other => panic!("expected an expression statement, got {:?}", other),
    };
    let call_type = type_checker.node_types[&call_id];
    let resolved = type_checker.resolve(call_type);
    assert!(matches!(type_checker.arena.get(resolved), Type::Variable { .. }));
}

#[test]
fn test_scenario_recursive_call_with_wrong_arity() {
    let source = "
        fn count() -> int { return count(); }
        fn main() { var x = count(1); }
    ";
    let (_, _, error) = check_source(source);
    assert_eq!(error.unwrap().get_error_name(), "ArityMismatch");
}

#[test]
fn test_recursion_resolves_through_enclosing_scope() {
    let source = "fn fact(n: int) -> int { if (n == 0) { return 1; } return n * fact(n - 1); }";
    let (_, mut type_checker, error) = check_source(source);
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("fact: Func (Concrete int, ) -> Concrete int"));
}

#[test]
fn test_return_type_mismatch_fails() {
    let (_, _, error) = check_source("fn f() -> int { return true; }");
    assert_eq!(error.unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_parameter_flows_through_operators() {
    let (_, mut type_checker, error) =
        check_source("fn f(c: char) { var d = c; var e = -d; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("d: Concrete char"));
    assert!(report.contains("e: Concrete char"));
}

#[test]
fn test_function_without_return_keeps_free_result() {
    let (_, mut type_checker, error) = check_source("fn f(x: int) { }");
    assert!(error.is_none());

    let report = type_checker.report();
    // The result variable is never constrained, so it reports as free
    assert!(report.contains("f: Func (Concrete int, ) -> Var (id:"));
}

#[test]
fn test_duplicate_declaration_keeps_first() {
    let (_, mut type_checker, error) =
        check_source("fn f() { var x: int; var x: bool; x = 1; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("x: Concrete int"));
    assert!(!report.contains("x: Concrete bool"));
}

#[test]
fn test_inner_scope_shadows_outer() {
    let source = "fn f() { var x = 1; { var x = true; var y = x; } }";
    let (_, mut type_checker, error) = check_source(source);
    assert!(error.is_none());

    let report = type_checker.report();
    // y sees the inner, bool-typed x
    assert!(report.contains("y: Concrete bool"));
}

#[test]
fn test_assignment_constrains_target() {
    let (_, mut type_checker, error) = check_source("fn f() { var x; x = 'a'; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("x: Concrete char"));
}

#[test]
fn test_grouping_propagates_type() {
    let (_, mut type_checker, error) =
        check_source("fn f() { var x = (1 + 2) * 3; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("x: Concrete int"));
}

#[test]
fn test_equality_produces_bool() {
    let (_, mut type_checker, error) =
        check_source("fn f(a: int, b: int) { var same = a == b; }");
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("same: Concrete bool"));
}

#[test]
fn test_condition_must_be_bool() {
    let (_, _, error) = check_source("fn f() { if (1) { } }");
    assert_eq!(error.unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_call_argument_pins_parameter_flow() {
    let source = "
        fn twice(x: int) -> int { return x + x; }
        fn main() { var r = twice(21); }
    ";
    let (_, mut type_checker, error) = check_source(source);
    assert!(error.is_none());

    let report = type_checker.report();
    assert!(report.contains("r: Concrete int"));
}

#[test]
fn test_call_argument_type_mismatch_fails() {
    let source = "
        fn twice(x: int) -> int { return x + x; }
        fn main() { var r = twice(true); }
    ";
    let (_, _, error) = check_source(source);
    assert_eq!(error.unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_report_is_deterministic() {
    let source = "fn f(a: int, b: char) { var x = a; var y = b; } fn g() { var z = 1; }";

    let (_, mut first, error) = check_source(source);
    assert!(error.is_none());
    let (_, mut second, error) = check_source(source);
    assert!(error.is_none());

    assert_eq!(first.report(), second.report());
}

#[test]
fn test_no_partial_report_on_failure() {
    let (_, type_checker, error) = check_source("fn f() -> int { return true; }");
    assert!(error.is_some());
    assert!(type_checker.subst.is_empty());
}
