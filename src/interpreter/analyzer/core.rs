use std::collections::HashMap;

use crate::{
    ast::{Expr, FunctionDecl, ParamKind, Program, Stmt},
    error::SemanticError,
    interpreter::{
        analyzer::scope::{
            LabelInfo, LabelTable, ScopeArena, Symbol, SymbolKind, GLOBAL_SCOPE,
            IDENTIFIER_LEN_MAX,
        },
        evaluator::builtin::builtin_arity,
    },
};

/// Facts the analyzer derives for the evaluator.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Name of the first variable or array declared at global scope.
    ///
    /// This is the program's designated result binding; its value after
    /// evaluation is what `check` reports as the target.
    pub result_binding: Option<String>,
}

/// Signature of a user-defined function, collected before the main walk.
struct FuncSig {
    param_count: usize,
    scope: usize,
}

/// Validates a parsed program.
///
/// Runs three passes: top-level function signatures (functions are hoisted,
/// so calls may precede declarations), program-wide label collection, and a
/// document-order walk resolving every variable, array, call and `goto`.
/// The first failing check aborts analysis.
///
/// # Errors
/// The first [`SemanticError`] encountered, in pass order.
pub fn analyze(program: &Program) -> Result<Analysis, SemanticError> {
    let mut analyzer = Analyzer {
        arena: ScopeArena::new(),
        labels: LabelTable::default(),
        functions: HashMap::new(),
        result_binding: None,
    };

    analyzer.collect_functions(program)?;
    analyzer.collect_labels(&program.statements, GLOBAL_SCOPE)?;
    analyzer.check_statements(&program.statements, GLOBAL_SCOPE)?;

    Ok(Analysis {
        result_binding: analyzer.result_binding,
    })
}

struct Analyzer {
    arena: ScopeArena,
    labels: LabelTable,
    functions: HashMap<String, FuncSig>,
    result_binding: Option<String>,
}

impl Analyzer {
    /// Collects every top-level function signature and opens its scope.
    fn collect_functions(&mut self, program: &Program) -> Result<(), SemanticError> {
        for stmt in &program.statements {
            let Stmt::FunctionDeclare(decl) = stmt else {
                continue;
            };
            if decl.name.chars().count() > IDENTIFIER_LEN_MAX {
                return Err(SemanticError::FuncNameTooLong {
                    name: decl.name.clone(),
                    line: decl.line,
                });
            }
            if self.functions.contains_key(&decl.name) {
                return Err(SemanticError::FuncDuplicated {
                    name: decl.name.clone(),
                    line: decl.line,
                });
            }
            let scope = self.arena.push_scope(GLOBAL_SCOPE);
            self.functions.insert(
                decl.name.clone(),
                FuncSig {
                    param_count: decl.params.len(),
                    scope,
                },
            );
        }
        Ok(())
    }

    /// Collects every label in the program with its owning scope.
    ///
    /// Labels are unique program-wide; the scope is recorded so `goto`
    /// checks can tell a missing label from one behind a function boundary.
    fn collect_labels(&mut self, statements: &[Stmt], scope: usize) -> Result<(), SemanticError> {
        for stmt in statements {
            match stmt {
                Stmt::Label { name, line } => {
                    if name.chars().count() > IDENTIFIER_LEN_MAX {
                        return Err(SemanticError::LabelNameTooLong {
                            name: name.clone(),
                            line: *line,
                        });
                    }
                    if self.labels.find(name).is_some() {
                        return Err(SemanticError::LabelDuplicated {
                            name: name.clone(),
                            line: *line,
                        });
                    }
                    self.labels.declare(name, LabelInfo { scope, line: *line });
                },
                Stmt::FunctionDeclare(decl) => {
                    let func_scope = self.functions[&decl.name].scope;
                    self.collect_labels(&decl.statements, func_scope)?;
                },
                Stmt::If {
                    then,
                    elseifs,
                    else_arm,
                    ..
                } => {
                    self.collect_labels(then, scope)?;
                    for arm in elseifs {
                        self.collect_labels(&arm.statements, scope)?;
                    }
                    if let Some(arm) = else_arm {
                        self.collect_labels(&arm.statements, scope)?;
                    }
                },
                Stmt::While { statements, .. }
                | Stmt::DoWhile { statements, .. }
                | Stmt::For { statements, .. } => {
                    self.collect_labels(statements, scope)?;
                },
                _ => {},
            }
        }
        Ok(())
    }

    /// Walks a statement list in document order, validating every reference.
    fn check_statements(&mut self, statements: &[Stmt], scope: usize) -> Result<(), SemanticError> {
        for stmt in statements {
            match stmt {
                Stmt::FunctionDeclare(decl) => self.check_function(decl)?,
                Stmt::If {
                    condition,
                    then,
                    elseifs,
                    else_arm,
                    ..
                } => {
                    self.check_expr(condition, scope)?;
                    self.check_statements(then, scope)?;
                    for arm in elseifs {
                        self.check_expr(&arm.condition, scope)?;
                        self.check_statements(&arm.statements, scope)?;
                    }
                    if let Some(arm) = else_arm {
                        self.check_statements(&arm.statements, scope)?;
                    }
                },
                Stmt::IfGoto {
                    condition,
                    label,
                    line,
                } => {
                    self.check_goto(label, scope, *line)?;
                    self.check_expr(condition, scope)?;
                },
                Stmt::While {
                    condition,
                    statements,
                    ..
                } => {
                    self.check_expr(condition, scope)?;
                    self.check_statements(statements, scope)?;
                },
                Stmt::DoWhile {
                    statements,
                    condition,
                    ..
                } => {
                    self.check_statements(statements, scope)?;
                    self.check_expr(condition, scope)?;
                },
                Stmt::For {
                    variable,
                    range_from,
                    range_to,
                    step,
                    statements,
                    line,
                    ..
                } => {
                    let symbol = self.arena.resolve(scope, variable).ok_or_else(|| {
                        SemanticError::VarNotFound {
                            name: variable.clone(),
                            line: *line,
                        }
                    })?;
                    if symbol.kind != SymbolKind::Scalar {
                        return Err(SemanticError::VarIsNotPrimitive {
                            name: variable.clone(),
                            line: *line,
                        });
                    }
                    self.check_expr(range_from, scope)?;
                    self.check_expr(range_to, scope)?;
                    self.check_statements(statements, scope)?;
                    if let Some(step) = step {
                        self.check_expr(step, scope)?;
                    }
                },
                Stmt::Break { .. } | Stmt::Continue { .. } | Stmt::Label { .. } => {},
                Stmt::Exit { value, .. } | Stmt::Return { value, .. } => {
                    if let Some(value) = value {
                        self.check_expr(value, scope)?;
                    }
                },
                Stmt::Goto { label, line } => self.check_goto(label, scope, *line)?,
                Stmt::Dim {
                    variable,
                    initializer,
                    line,
                } => {
                    self.declare_variable(variable, SymbolKind::Scalar, scope, *line)?;
                    if let Some(initializer) = initializer {
                        self.check_expr(initializer, scope)?;
                    }
                },
                Stmt::DimArray {
                    variable,
                    dimension,
                    line,
                } => {
                    self.declare_variable(variable, SymbolKind::Array, scope, *line)?;
                    self.check_expr(dimension, scope)?;
                },
                Stmt::Redim {
                    variable,
                    dimension,
                    line,
                } => {
                    let symbol = self.arena.resolve(scope, variable).ok_or_else(|| {
                        SemanticError::VarNotFound {
                            name: variable.clone(),
                            line: *line,
                        }
                    })?;
                    if symbol.kind != SymbolKind::Array {
                        return Err(SemanticError::VarIsNotArray {
                            name: variable.clone(),
                            line: *line,
                        });
                    }
                    self.check_expr(dimension, scope)?;
                },
                Stmt::Assign {
                    variable,
                    value,
                    line,
                } => {
                    let symbol = self.arena.resolve(scope, variable).ok_or_else(|| {
                        SemanticError::VarNotFound {
                            name: variable.clone(),
                            line: *line,
                        }
                    })?;
                    if symbol.kind != SymbolKind::Scalar {
                        return Err(SemanticError::VarIsNotPrimitive {
                            name: variable.clone(),
                            line: *line,
                        });
                    }
                    self.check_expr(value, scope)?;
                },
                Stmt::AssignArray {
                    variable,
                    subscript,
                    value,
                    line,
                } => {
                    let symbol = self.arena.resolve(scope, variable).ok_or_else(|| {
                        SemanticError::VarNotFound {
                            name: variable.clone(),
                            line: *line,
                        }
                    })?;
                    if symbol.kind != SymbolKind::Array {
                        return Err(SemanticError::VarIsNotArray {
                            name: variable.clone(),
                            line: *line,
                        });
                    }
                    self.check_expr(subscript, scope)?;
                    self.check_expr(value, scope)?;
                },
                Stmt::Expression { expr, .. } => self.check_expr(expr, scope)?,
            }
        }
        Ok(())
    }

    /// Registers a function's parameters and walks its body in its scope.
    fn check_function(&mut self, decl: &FunctionDecl) -> Result<(), SemanticError> {
        let scope = self.functions[&decl.name].scope;
        for param in &decl.params {
            if param.name.chars().count() > IDENTIFIER_LEN_MAX {
                return Err(SemanticError::VarNameTooLong {
                    name: param.name.clone(),
                    line: decl.line,
                });
            }
            if self.arena.lookup_local(scope, &param.name).is_some() {
                return Err(SemanticError::VarDuplicated {
                    name: param.name.clone(),
                    line: decl.line,
                });
            }
            let kind = match param.kind {
                ParamKind::Primitive => SymbolKind::Scalar,
                ParamKind::Array => SymbolKind::Array,
            };
            self.arena.declare(
                scope,
                &param.name,
                Symbol {
                    kind,
                    line: decl.line,
                },
            );
        }
        self.check_statements(&decl.statements, scope)
    }

    /// Registers a `dim` declaration, name checks first.
    ///
    /// The name is visible to its own initializer: registration happens
    /// before the initializer expression is walked.
    fn declare_variable(
        &mut self,
        name: &str,
        kind: SymbolKind,
        scope: usize,
        line: usize,
    ) -> Result<(), SemanticError> {
        if name.chars().count() > IDENTIFIER_LEN_MAX {
            return Err(SemanticError::VarNameTooLong {
                name: name.to_string(),
                line,
            });
        }
        if self.arena.lookup_local(scope, name).is_some() {
            return Err(SemanticError::VarDuplicated {
                name: name.to_string(),
                line,
            });
        }
        self.arena.declare(scope, name, Symbol { kind, line });
        if scope == GLOBAL_SCOPE && self.result_binding.is_none() {
            self.result_binding = Some(name.to_string());
        }
        Ok(())
    }

    /// Validates a `goto` against the completed label table.
    fn check_goto(&self, label: &str, scope: usize, line: usize) -> Result<(), SemanticError> {
        match self.labels.find(label) {
            None => Err(SemanticError::GotoLabelNotFound {
                name: label.to_string(),
                line,
            }),
            Some(info) if info.scope != scope => Err(SemanticError::GotoLabelScopeMismatch {
                name: label.to_string(),
                line,
            }),
            Some(_) => Ok(()),
        }
    }

    /// Walks an expression, resolving names and arities.
    fn check_expr(&self, expr: &Expr, scope: usize) -> Result<(), SemanticError> {
        match expr {
            Expr::LiteralNumeric { .. } | Expr::LiteralString { .. } => Ok(()),
            Expr::Variable { name, line } => {
                if self.arena.resolve(scope, name).is_none() {
                    return Err(SemanticError::VarNotFound {
                        name: name.clone(),
                        line: *line,
                    });
                }
                Ok(())
            },
            Expr::ArrayAccess {
                name,
                subscript,
                line,
            } => {
                let symbol =
                    self.arena
                        .resolve(scope, name)
                        .ok_or_else(|| SemanticError::VarNotFound {
                            name: name.clone(),
                            line: *line,
                        })?;
                if symbol.kind != SymbolKind::Array {
                    return Err(SemanticError::VarIsNotArray {
                        name: name.clone(),
                        line: *line,
                    });
                }
                self.check_expr(subscript, scope)
            },
            Expr::FunctionCall {
                name,
                arguments,
                line,
            } => {
                // user functions first, so they shadow builtins
                let arity = match self.functions.get(name) {
                    Some(sig) => sig.param_count,
                    None => builtin_arity(name).ok_or_else(|| SemanticError::FuncNotFound {
                        name: name.clone(),
                        line: *line,
                    })?,
                };
                if arguments.len() != arity {
                    return Err(SemanticError::FuncArgListMismatch {
                        name: name.clone(),
                        line: *line,
                    });
                }
                for argument in arguments {
                    self.check_expr(argument, scope)?;
                }
                Ok(())
            },
            Expr::UnaryOp { operand, .. } => self.check_expr(operand, scope),
            Expr::BinaryOp { left, right, .. } => {
                self.check_expr(left, scope)?;
                self.check_expr(right, scope)
            },
        }
    }
}
