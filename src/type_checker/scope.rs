//! The lexical scope tree and the pass that builds it.
//!
//! Scopes live in a vector-backed arena and refer to each other by slot
//! index, so the slot number doubles as a stable, deterministic scope
//! identifier (the emitter uses it to mangle flattened locals). The scope
//! pass is a single top-down walk over the AST that binds every declared
//! name and attaches a scope to every node that introduces one (program
//! root, function, block, if statement).

use std::collections::HashMap;

use crate::ast::ast::Stmt;
use crate::ast::statements::{BlockStmt, FnDeclStmt, Program};

use super::types::{TypeArena, TypeId};

/// A lightweight handle to a scope stored in a [`ScopeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Root,
    /// Reserved for a future module system; never constructed today.
    Module,
    Function,
    Block,
}

/// A node in the scope tree: the names bound in one lexical region.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    symbols: HashMap<String, TypeId>,
    declaration_order: Vec<String>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
}

#[derive(Debug, Default)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena { scopes: vec![] }
    }

    /// Creates a scope and links it under its parent.
    pub fn new_scope(&mut self, kind: ScopeKind, parent: Option<ScopeId>) -> ScopeId {
        self.scopes.push(Scope {
            kind,
            symbols: HashMap::new(),
            declaration_order: vec![],
            parent,
            children: vec![],
        });
        let id = ScopeId((self.scopes.len() - 1) as u32);

        if let Some(parent) = parent {
            self.scopes[parent.0 as usize].children.push(id);
        }

        id
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Binds a name in the given scope.
    ///
    /// Returns false if the name is already bound in that same scope; the
    /// first binding is kept and the new one dropped (duplicate
    /// declarations are tolerated, not rejected).
    pub fn add_symbol(&mut self, scope: ScopeId, name: &str, ty: TypeId) -> bool {
        let scope = &mut self.scopes[scope.0 as usize];
        if scope.symbols.contains_key(name) {
            return false;
        }
        scope.symbols.insert(String::from(name), ty);
        scope.declaration_order.push(String::from(name));
        true
    }

    /// Looks a name up in this scope only, never in ancestors.
    pub fn find_symbol(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        self.get(scope).symbols.get(name).copied()
    }

    /// Looks a name up lexically: this scope first, then each ancestor up
    /// to the root. Inner bindings shadow outer ones.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<TypeId> {
        let mut current = Some(scope);
        while let Some(scope) = current {
            if let Some(ty) = self.find_symbol(scope, name) {
                return Some(ty);
            }
            current = self.get(scope).parent;
        }
        None
    }

    /// The bindings of a scope in declaration order.
    pub fn symbols_in_order(&self, scope: ScopeId) -> Vec<(String, TypeId)> {
        let scope = self.get(scope);
        scope
            .declaration_order
            .iter()
            .map(|name| (name.clone(), scope.symbols[name]))
            .collect()
    }

    /// The name a binding receives when its scope is flattened away: the
    /// source name suffixed with the owning scope's slot number.
    pub fn mangled_name(&self, scope: ScopeId, name: &str) -> String {
        format!("{}_{}", name, scope.0)
    }
}

/// Result of the scope pass: the scope tree plus the node side tables the
/// later passes navigate by.
#[derive(Debug)]
pub struct ScopePass {
    pub scopes: ScopeArena,
    /// Scope attached to each scope-introducing node, keyed by node id.
    pub node_scopes: HashMap<i32, ScopeId>,
    /// The function type allocated for each `fn` declaration, keyed by
    /// the declaration's node id.
    pub function_types: HashMap<i32, TypeId>,
}

/// Builds the scope tree for a program.
///
/// One top-down walk: the program root opens the root scope, every
/// function opens a function scope holding its parameters, and every
/// block or if statement opens a block scope. Declarations bind into the
/// scope current at their site.
pub fn build_scopes(program: &Program, arena: &mut TypeArena) -> ScopePass {
    let mut pass = ScopePass {
        scopes: ScopeArena::new(),
        node_scopes: HashMap::new(),
        function_types: HashMap::new(),
    };

    let root = pass.scopes.new_scope(ScopeKind::Root, None);
    pass.node_scopes.insert(program.id, root);

    for function in &program.functions {
        build_function(function, root, arena, &mut pass);
    }

    pass
}

fn build_function(
    function: &FnDeclStmt,
    enclosing: ScopeId,
    arena: &mut TypeArena,
    pass: &mut ScopePass,
) {
    // Parameters are always explicitly typed, so their types exist before
    // the function type itself is assembled. The result is concrete when
    // annotated, otherwise a fresh variable pinned down only by `return`
    // equations.
    let param_types: Vec<TypeId> = function
        .parameters
        .iter()
        .map(|(_, type_name)| arena.new_concrete(type_name))
        .collect();

    let result_type = match &function.return_type {
        Some(type_name) => arena.new_concrete(type_name),
        None => arena.new_type_variable(),
    };

    let function_type = arena.new_function(param_types.clone(), result_type);
    pass.function_types.insert(function.id, function_type);

    // Bound in the enclosing scope so recursive calls resolve.
    if !pass
        .scopes
        .add_symbol(enclosing, &function.identifier, function_type)
    {
        log::warn!("function decl collision: `{}`", function.identifier);
    }

    let function_scope = pass.scopes.new_scope(ScopeKind::Function, Some(enclosing));
    pass.node_scopes.insert(function.id, function_scope);

    for ((name, _), param_type) in function.parameters.iter().zip(param_types) {
        if !pass.scopes.add_symbol(function_scope, name, param_type) {
            log::warn!("param decl collision: `{}`", name);
        }
    }

    build_block(&function.body, function_scope, arena, pass);
}

fn build_block(block: &BlockStmt, enclosing: ScopeId, arena: &mut TypeArena, pass: &mut ScopePass) {
    let scope = pass.scopes.new_scope(ScopeKind::Block, Some(enclosing));
    pass.node_scopes.insert(block.id, scope);

    for stmt in block.iter() {
        build_stmt(stmt, scope, arena, pass);
    }
}

fn build_stmt(stmt: &Stmt, current: ScopeId, arena: &mut TypeArena, pass: &mut ScopePass) {
    match stmt {
        Stmt::VarDecl(decl) => {
            let ty = match &decl.explicit_type {
                Some(type_name) => arena.new_concrete(type_name),
                None => arena.new_type_variable(),
            };

            if !pass.scopes.add_symbol(current, &decl.identifier, ty) {
                log::warn!("var decl collision: `{}`", decl.identifier);
            }
        }
        Stmt::If(if_stmt) => {
            // The if statement itself opens a scope; each branch block
            // then opens its own nested scope inside it.
            let scope = pass.scopes.new_scope(ScopeKind::Block, Some(current));
            pass.node_scopes.insert(if_stmt.id, scope);

            build_block(&if_stmt.then_body, scope, arena, pass);
            if let Some(else_body) = &if_stmt.else_body {
                build_stmt(else_body, scope, arena, pass);
            }
        }
        Stmt::Block(block) => build_block(block, current, arena, pass),
        // Assignments, returns and expression statements declare nothing.
        Stmt::Assignment(_) | Stmt::Return(_) | Stmt::Expression(_) => {}
    }
}
