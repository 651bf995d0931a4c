use std::collections::HashMap;

use crate::{
    ast::{ElseIfArm, Expr, FunctionDecl, ParamKind, Program, Stmt},
    error::RuntimeError,
    interpreter::{
        analyzer::Analysis,
        evaluator::{binary::apply_binary, unary::apply_unary},
        value::Value,
    },
};

/// A non-local event that unwinds evaluation.
///
/// Runtime errors and `exit` both abandon the statement machinery and are
/// threaded through `?`; [`Interpreter::run`] separates the two at the top.
#[derive(Debug)]
pub enum EvalInterrupt {
    /// A runtime error aborting the whole evaluation.
    Error(RuntimeError),
    /// An `exit` statement stopping the program, with its optional value.
    Exit(Option<Value>),
}

impl From<RuntimeError> for EvalInterrupt {
    fn from(e: RuntimeError) -> Self {
        Self::Error(e)
    }
}

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvalInterrupt>;

/// How a statement finished, as seen by the enclosing block.
enum Flow {
    /// Continue with the next statement.
    Normal,
    /// Unwind to the innermost loop and leave it.
    Break,
    /// Unwind to the innermost loop and start its next iteration.
    Continue,
    /// Unwind to the current function call with its result.
    Return(Value),
    /// A `goto` is pending; blocks unwind until one contains the label.
    Goto,
}

/// One activation frame's bindings.
#[derive(Default)]
struct Frame {
    vars: HashMap<String, Value>,
}

/// The current name environment: the global frame plus, inside a call, the
/// activation frame of that call.
///
/// Reads and writes resolve against the local frame first and fall back to
/// the global frame, mirroring the analyzer's resolution rule. Local frames
/// are pre-populated with every name the function declares, so a write can
/// tell a local apart from a global even when the declaring `dim` has not
/// executed on this path.
struct Env<'g> {
    globals: &'g mut Frame,
    locals: Option<Frame>,
}

impl Env<'_> {
    fn read(&self, name: &str) -> Value {
        if let Some(locals) = &self.locals {
            if let Some(value) = locals.vars.get(name) {
                return value.clone();
            }
        }
        // declared but not yet assigned reads as number 0
        self.globals
            .vars
            .get(name)
            .cloned()
            .unwrap_or(Value::Number(0.0))
    }

    /// Binds a declaration in the current frame.
    fn declare(&mut self, name: &str, value: Value) {
        match &mut self.locals {
            Some(locals) => locals.vars.insert(name.to_string(), value),
            None => self.globals.vars.insert(name.to_string(), value),
        };
    }

    /// Assigns to an existing binding, local first.
    fn write(&mut self, name: &str, value: Value) {
        if let Some(locals) = &mut self.locals {
            if locals.vars.contains_key(name) {
                locals.vars.insert(name.to_string(), value);
                return;
            }
        }
        self.globals.vars.insert(name.to_string(), value);
    }
}

/// The outcome of a successful evaluation.
#[derive(Debug)]
pub struct Evaluation {
    /// The value of the program's designated result binding.
    pub result: Value,
    /// Lines recorded by the `p` builtin, in emission order.
    pub printed: Vec<String>,
}

/// Tree-walking interpreter over a validated program.
///
/// One interpreter instance evaluates one program once; nothing persists
/// across runs. Function bodies execute on the native call stack, one
/// activation frame per call.
pub struct Interpreter<'a> {
    functions: HashMap<&'a str, &'a FunctionDecl>,
    local_names: HashMap<&'a str, Vec<&'a str>>,
    pending_goto: Option<String>,
    pub(crate) printed: Vec<String>,
    pub(crate) rand_state: u64,
}

impl<'a> Interpreter<'a> {
    /// Prepares an interpreter for `program`, hoisting its functions.
    #[must_use]
    pub fn new(program: &'a Program) -> Self {
        let mut functions = HashMap::new();
        let mut local_names = HashMap::new();
        for stmt in &program.statements {
            if let Stmt::FunctionDeclare(decl) = stmt {
                functions.insert(decl.name.as_str(), decl);
                let mut names = Vec::new();
                collect_declared_names(&decl.statements, &mut names);
                local_names.insert(decl.name.as_str(), names);
            }
        }
        Self {
            functions,
            local_names,
            pending_goto: None,
            printed: Vec::new(),
            rand_state: 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Executes the program and reports its result binding.
    ///
    /// # Parameters
    /// - `program`: The validated program; must be the one passed to `new`.
    /// - `analysis`: The analyzer's facts, naming the result binding.
    ///
    /// # Errors
    /// The first runtime error raised during execution. An `exit` is a
    /// normal termination, not an error.
    pub fn run(mut self, program: &'a Program, analysis: &Analysis) -> Result<Evaluation, RuntimeError> {
        let mut globals = Frame::default();

        let outcome = {
            let mut env = Env {
                globals: &mut globals,
                locals: None,
            };
            self.exec_block(&program.statements, &mut env)
        };
        match outcome {
            Ok(_) | Err(EvalInterrupt::Exit(_)) => {},
            Err(EvalInterrupt::Error(e)) => return Err(e),
        }

        let result = analysis
            .result_binding
            .as_ref()
            .and_then(|name| globals.vars.get(name).cloned())
            .unwrap_or(Value::Number(0.0));

        Ok(Evaluation {
            result,
            printed: self.printed,
        })
    }

    /// Executes a statement list, dispatching pending `goto`s.
    ///
    /// When a `goto` is pending, the list is searched for the statement that
    /// holds the label (directly or nested); execution resumes there. A list
    /// that does not contain the label unwinds further.
    fn exec_block(&mut self, stmts: &'a [Stmt], env: &mut Env<'_>) -> EvalResult<Flow> {
        let mut i = 0;
        while i < stmts.len() {
            if let Some(label) = self.pending_goto.clone() {
                let Some(target) = find_label_target(stmts, &label) else {
                    return Ok(Flow::Goto);
                };
                if matches!(&stmts[target], Stmt::Label { .. }) {
                    self.pending_goto = None;
                }
                i = target;
            }
            match self.exec_stmt(&stmts[i], env)? {
                Flow::Normal => i += 1,
                // re-enter the dispatch above with the pending label
                Flow::Goto => {},
                other => return Ok(other),
            }
        }
        if self.pending_goto.is_some() {
            return Ok(Flow::Goto);
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &'a Stmt, env: &mut Env<'_>) -> EvalResult<Flow> {
        match stmt {
            Stmt::FunctionDeclare(_) | Stmt::Label { .. } => Ok(Flow::Normal),
            Stmt::Dim {
                variable,
                initializer,
                ..
            } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Number(0.0),
                };
                env.declare(variable, value);
                Ok(Flow::Normal)
            },
            Stmt::DimArray {
                variable,
                dimension,
                line,
            } => {
                let size = self.eval_array_size(dimension, *line, env)?;
                env.declare(variable, Value::new_array(size));
                Ok(Flow::Normal)
            },
            Stmt::Redim {
                variable,
                dimension,
                line,
            } => {
                let array = env.read(variable).as_array(*line)?;
                let size = self.eval_array_size(dimension, *line, env)?;
                *array.borrow_mut() = vec![Value::Number(0.0); size];
                Ok(Flow::Normal)
            },
            Stmt::Assign {
                variable, value, ..
            } => {
                let value = self.eval_expr(value, env)?;
                env.write(variable, value);
                Ok(Flow::Normal)
            },
            Stmt::AssignArray {
                variable,
                subscript,
                value,
                line,
            } => {
                let array = env.read(variable).as_array(*line)?;
                let index = self.eval_expr(subscript, env)?.as_number(*line)? as i64;
                let value = self.eval_expr(value, env)?;
                let mut elements = array.borrow_mut();
                if index < 0 || index as usize >= elements.len() {
                    return Err(RuntimeError::ArrayOutOfBounds { line: *line }.into());
                }
                elements[index as usize] = value;
                Ok(Flow::Normal)
            },
            Stmt::Expression { expr, .. } => {
                self.eval_expr(expr, env)?;
                Ok(Flow::Normal)
            },
            Stmt::If {
                condition,
                then,
                elseifs,
                else_arm,
                line,
                ..
            } => self.exec_if(condition, then, elseifs, else_arm.as_ref(), *line, env),
            Stmt::IfGoto {
                condition,
                label,
                line,
            } => {
                if self.eval_expr(condition, env)?.is_truthy(*line)? {
                    self.pending_goto = Some(label.clone());
                    return Ok(Flow::Goto);
                }
                Ok(Flow::Normal)
            },
            Stmt::While {
                condition,
                statements,
                line,
                ..
            } => self.exec_while(condition, statements, *line, env),
            Stmt::DoWhile {
                statements,
                condition,
                line,
                ..
            } => self.exec_do_while(statements, condition, *line, env),
            Stmt::For {
                variable,
                range_from,
                range_to,
                step,
                statements,
                line,
                ..
            } => self.exec_for(
                variable,
                range_from,
                range_to,
                step.as_ref(),
                statements,
                *line,
                env,
            ),
            Stmt::Break { .. } => Ok(Flow::Break),
            Stmt::Continue { .. } => Ok(Flow::Continue),
            Stmt::Goto { label, .. } => {
                self.pending_goto = Some(label.clone());
                Ok(Flow::Goto)
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Number(0.0),
                };
                Ok(Flow::Return(value))
            },
            Stmt::Exit { value, .. } => {
                let value = match value {
                    Some(expr) => Some(self.eval_expr(expr, env)?),
                    None => None,
                };
                Err(EvalInterrupt::Exit(value))
            },
        }
    }

    fn exec_if(
        &mut self,
        condition: &'a Expr,
        then: &'a [Stmt],
        elseifs: &'a [ElseIfArm],
        else_arm: Option<&'a crate::ast::ElseArm>,
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Flow> {
        // a pending goto enters the arm holding its label without testing
        // any condition, as if control had flowed there
        if let Some(label) = self.pending_goto.clone() {
            if block_contains_label(then, &label) {
                return self.exec_block(then, env);
            }
            for arm in elseifs {
                if block_contains_label(&arm.statements, &label) {
                    return self.exec_block(&arm.statements, env);
                }
            }
            if let Some(arm) = else_arm {
                if block_contains_label(&arm.statements, &label) {
                    return self.exec_block(&arm.statements, env);
                }
            }
        }

        if self.eval_expr(condition, env)?.is_truthy(line)? {
            return self.exec_block(then, env);
        }
        for arm in elseifs {
            if self.eval_expr(&arm.condition, env)?.is_truthy(arm.line)? {
                return self.exec_block(&arm.statements, env);
            }
        }
        if let Some(arm) = else_arm {
            return self.exec_block(&arm.statements, env);
        }
        Ok(Flow::Normal)
    }

    fn exec_while(
        &mut self,
        condition: &'a Expr,
        body: &'a [Stmt],
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Flow> {
        loop {
            let entered_by_goto = self
                .pending_goto
                .as_deref()
                .is_some_and(|label| block_contains_label(body, label));
            if !entered_by_goto && !self.eval_expr(condition, env)?.is_truthy(line)? {
                break;
            }
            match self.exec_block(body, env)? {
                Flow::Normal | Flow::Continue => {},
                Flow::Break => break,
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_do_while(
        &mut self,
        body: &'a [Stmt],
        condition: &'a Expr,
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Flow> {
        loop {
            match self.exec_block(body, env)? {
                Flow::Normal | Flow::Continue => {},
                Flow::Break => break,
                other => return Ok(other),
            }
            if !self.eval_expr(condition, env)?.is_truthy(line)? {
                break;
            }
        }
        Ok(Flow::Normal)
    }

    #[allow(clippy::too_many_arguments)]
    fn exec_for(
        &mut self,
        variable: &'a str,
        range_from: &'a Expr,
        range_to: &'a Expr,
        step: Option<&'a Expr>,
        body: &'a [Stmt],
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Flow> {
        let entered_by_goto = self
            .pending_goto
            .as_deref()
            .is_some_and(|label| block_contains_label(body, label));
        if !entered_by_goto {
            let start = self.eval_expr(range_from, env)?;
            env.write(variable, start);
        }

        loop {
            let step_value = match step {
                Some(expr) => self.eval_expr(expr, env)?.as_number(line)?,
                None => 1.0,
            };

            let entered_by_goto = self
                .pending_goto
                .as_deref()
                .is_some_and(|label| block_contains_label(body, label));
            if !entered_by_goto {
                let bound = self.eval_expr(range_to, env)?.as_number(line)?;
                let current = env.read(variable).as_number(line)?;
                let continues = if step_value < 0.0 {
                    current >= bound
                } else {
                    current <= bound
                };
                if !continues {
                    break;
                }
            }

            match self.exec_block(body, env)? {
                Flow::Normal | Flow::Continue => {},
                Flow::Break => break,
                other => return Ok(other),
            }

            let current = env.read(variable).as_number(line)?;
            env.write(variable, Value::Number(current + step_value));
        }
        Ok(Flow::Normal)
    }

    fn eval_array_size(
        &mut self,
        dimension: &'a Expr,
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<usize> {
        let size = self.eval_expr(dimension, env)?.as_number(line)? as i64;
        if size < 0 {
            return Err(RuntimeError::ArrayInvalidSize { line }.into());
        }
        Ok(size as usize)
    }

    /// Evaluates an expression to a value.
    ///
    /// Strict left-to-right, eager evaluation; only `&&` and `||`
    /// short-circuit.
    fn eval_expr(&mut self, expr: &'a Expr, env: &mut Env<'_>) -> EvalResult<Value> {
        match expr {
            Expr::LiteralNumeric { value, .. } => Ok(Value::Number(*value)),
            Expr::LiteralString { value, .. } => Ok(Value::Str(value.clone())),
            Expr::Variable { name, .. } => Ok(env.read(name)),
            Expr::ArrayAccess {
                name,
                subscript,
                line,
            } => {
                let array = env.read(name).as_array(*line)?;
                let index = self.eval_expr(subscript, env)?.as_number(*line)? as i64;
                let elements = array.borrow();
                if index < 0 || index as usize >= elements.len() {
                    return Err(RuntimeError::ArrayOutOfBounds { line: *line }.into());
                }
                Ok(elements[index as usize].clone())
            },
            Expr::FunctionCall {
                name,
                arguments,
                line,
            } => self.call_function(name, arguments, *line, env),
            Expr::UnaryOp { op, operand, line } => {
                let value = self.eval_expr(operand, env)?;
                apply_unary(*op, &value, *line)
            },
            Expr::BinaryOp {
                op: crate::ast::BinaryOperator::And,
                left,
                right,
                line,
            } => {
                if !self.eval_expr(left, env)?.is_truthy(*line)? {
                    return Ok(Value::from(false));
                }
                let right = self.eval_expr(right, env)?.is_truthy(*line)?;
                Ok(Value::from(right))
            },
            Expr::BinaryOp {
                op: crate::ast::BinaryOperator::Or,
                left,
                right,
                line,
            } => {
                if self.eval_expr(left, env)?.is_truthy(*line)? {
                    return Ok(Value::from(true));
                }
                let right = self.eval_expr(right, env)?.is_truthy(*line)?;
                Ok(Value::from(right))
            },
            Expr::BinaryOp {
                op,
                left,
                right,
                line,
            } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                apply_binary(*op, &left, &right, *line)
            },
        }
    }

    /// Evaluates a call, dispatching to a user function or a builtin.
    ///
    /// Arguments are evaluated left to right in the caller's environment.
    /// User functions shadow builtins of the same name.
    fn call_function(
        &mut self,
        name: &str,
        arguments: &'a [Expr],
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Value> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_expr(argument, env)?);
        }

        match self.functions.get(name).copied() {
            Some(decl) => self.call_user_function(decl, values, line, env),
            None => self.call_builtin(name, values, line),
        }
    }

    /// Invokes a user-defined function with already-evaluated arguments.
    ///
    /// The declared parameter kind must match the argument's dynamic kind;
    /// this is necessarily a call-time check. Primitive parameters copy the
    /// argument, array parameters share the caller's array.
    fn call_user_function(
        &mut self,
        decl: &'a FunctionDecl,
        values: Vec<Value>,
        line: usize,
        env: &mut Env<'_>,
    ) -> EvalResult<Value> {
        let mut frame = Frame::default();
        for (param, value) in decl.params.iter().zip(values) {
            let kind_matches = match param.kind {
                ParamKind::Array => value.is_array(),
                ParamKind::Primitive => !value.is_array(),
            };
            if !kind_matches {
                return Err(RuntimeError::NotArray { line }.into());
            }
            frame.vars.insert(param.name.clone(), value);
        }
        if let Some(names) = self.local_names.get(decl.name.as_str()) {
            for local in names {
                frame
                    .vars
                    .entry((*local).to_string())
                    .or_insert(Value::Number(0.0));
            }
        }

        let mut child = Env {
            globals: &mut *env.globals,
            locals: Some(frame),
        };
        match self.exec_block(&decl.statements, &mut child)? {
            Flow::Return(value) => Ok(value),
            // falling off the end yields the unit-equivalent empty string
            _ => Ok(Value::Str(String::new())),
        }
    }
}

/// Collects every name a statement list declares, nested blocks included.
///
/// Used to pre-populate activation frames so writes resolve to the function
/// even on paths where the declaring `dim` did not execute.
fn collect_declared_names<'a>(statements: &'a [Stmt], names: &mut Vec<&'a str>) {
    for stmt in statements {
        match stmt {
            Stmt::Dim { variable, .. }
            | Stmt::DimArray { variable, .. } => names.push(variable.as_str()),
            Stmt::If {
                then,
                elseifs,
                else_arm,
                ..
            } => {
                collect_declared_names(then, names);
                for arm in elseifs {
                    collect_declared_names(&arm.statements, names);
                }
                if let Some(arm) = else_arm {
                    collect_declared_names(&arm.statements, names);
                }
            },
            Stmt::While { statements, .. }
            | Stmt::DoWhile { statements, .. }
            | Stmt::For { statements, .. } => collect_declared_names(statements, names),
            _ => {},
        }
    }
}

/// Finds the statement a pending `goto` should resume at, if any.
fn find_label_target(statements: &[Stmt], label: &str) -> Option<usize> {
    statements.iter().position(|stmt| stmt_contains_label(stmt, label))
}

fn stmt_contains_label(stmt: &Stmt, label: &str) -> bool {
    match stmt {
        Stmt::Label { name, .. } => name == label,
        Stmt::If {
            then,
            elseifs,
            else_arm,
            ..
        } => {
            block_contains_label(then, label)
                || elseifs
                    .iter()
                    .any(|arm| block_contains_label(&arm.statements, label))
                || else_arm
                    .as_ref()
                    .is_some_and(|arm| block_contains_label(&arm.statements, label))
        },
        Stmt::While { statements, .. }
        | Stmt::DoWhile { statements, .. }
        | Stmt::For { statements, .. } => block_contains_label(statements, label),
        _ => false,
    }
}

fn block_contains_label(statements: &[Stmt], label: &str) -> bool {
    statements
        .iter()
        .any(|stmt| stmt_contains_label(stmt, label))
}
