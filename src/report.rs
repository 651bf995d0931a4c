use serde::Serialize;
use serde_json::{json, Value as Json};

use crate::{
    ast::{Expr, ParamKind, Program, Stmt},
    error::EngineError,
    interpreter::value::Value,
    util::num::number_to_string,
};

/// The JSON document produced by the `check` operation.
///
/// Exactly one of `error_id` and `target` is populated; the other serializes
/// as an explicit `null`. The error id is the first error along the pipeline,
/// so a syntax error masks semantic ones and a semantic error masks runtime
/// ones.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    /// Whether the pipeline failed at any stage.
    pub error: bool,
    /// The stable code of the first error, when `error` is true.
    #[serde(rename = "errorId")]
    pub error_id: Option<String>,
    /// The program's result value, when `error` is false.
    pub target: Option<ResultTarget>,
}

/// The externally observable result value of a program.
#[derive(Debug, Serialize)]
pub struct ResultTarget {
    /// `"number"` or `"string"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The canonical textual form of the value.
    pub stringified: String,
}

impl CheckReport {
    /// Builds the success report for a result value.
    #[must_use]
    pub fn success(value: &Value) -> Self {
        let target = match value {
            Value::Number(n) => ResultTarget {
                kind: "number",
                stringified: number_to_string(*n),
            },
            // arrays have no tag of their own; they render as text
            Value::Str(_) | Value::Array(_) => ResultTarget {
                kind: "string",
                stringified: value.to_string(),
            },
        };
        Self {
            error: false,
            error_id: None,
            target: Some(target),
        }
    }

    /// Builds the failure report for a pipeline error.
    #[must_use]
    pub fn failure(error: &EngineError) -> Self {
        Self {
            error: true,
            error_id: Some(error.code().to_string()),
            target: None,
        }
    }
}

/// Serializes a parsed program for the `ast` operation.
///
/// The shapes follow the engine's dump contract: statement nodes carry
/// `lineNumber`, control-bearing nodes also carry `controlId`, expression
/// nodes carry neither, an absent `else`/`initializer`/`value` is an explicit
/// `null`, and an absent `for` step is omitted entirely.
#[must_use]
pub fn ast_to_json(program: &Program) -> Json {
    json!({
        "astType": "Program",
        "numOfControl": program.num_controls,
        "statements": statements_to_json(&program.statements),
    })
}

fn statements_to_json(statements: &[Stmt]) -> Json {
    Json::Array(statements.iter().map(stmt_to_json).collect())
}

fn stmt_to_json(stmt: &Stmt) -> Json {
    match stmt {
        Stmt::FunctionDeclare(decl) => {
            let parameters: Vec<Json> = decl
                .params
                .iter()
                .map(|param| {
                    json!({
                        "name": param.name,
                        "type": match param.kind {
                            ParamKind::Array => "ARRAY",
                            ParamKind::Primitive => "PRIMITIVE",
                        },
                    })
                })
                .collect();
            json!({
                "astType": "FunctionDeclare",
                "lineNumber": decl.line,
                "controlId": decl.control_id,
                "name": decl.name,
                "parameters": parameters,
                "statements": statements_to_json(&decl.statements),
            })
        },
        Stmt::If {
            condition,
            then,
            elseifs,
            else_arm,
            line,
            control_id,
        } => {
            let elseif_arms: Vec<Json> = elseifs
                .iter()
                .map(|arm| {
                    json!({
                        "astType": "ElseIf",
                        "lineNumber": arm.line,
                        "condition": expr_to_json(&arm.condition),
                        "statements": statements_to_json(&arm.statements),
                    })
                })
                .collect();
            let else_json = match else_arm {
                Some(arm) => json!({
                    "astType": "Else",
                    "lineNumber": arm.line,
                    "statements": statements_to_json(&arm.statements),
                }),
                None => Json::Null,
            };
            json!({
                "astType": "If",
                "lineNumber": line,
                "controlId": control_id,
                "condition": expr_to_json(condition),
                "then": { "astType": "Then", "statements": statements_to_json(then) },
                "elseif": elseif_arms,
                "else": else_json,
            })
        },
        Stmt::IfGoto {
            condition,
            label,
            line,
        } => json!({
            "astType": "IfGoto",
            "lineNumber": line,
            "condition": expr_to_json(condition),
            "label": label,
        }),
        Stmt::While {
            condition,
            statements,
            line,
            control_id,
        } => json!({
            "astType": "While",
            "lineNumber": line,
            "controlId": control_id,
            "condition": expr_to_json(condition),
            "statements": statements_to_json(statements),
        }),
        Stmt::DoWhile {
            statements,
            condition,
            line,
            control_id,
        } => json!({
            "astType": "DoWhile",
            "lineNumber": line,
            "controlId": control_id,
            "statements": statements_to_json(statements),
            "condition": expr_to_json(condition),
        }),
        Stmt::For {
            variable,
            range_from,
            range_to,
            step,
            statements,
            line,
            control_id,
        } => {
            let mut object = json!({
                "astType": "For",
                "lineNumber": line,
                "controlId": control_id,
                "variable": variable,
                "rangeFrom": expr_to_json(range_from),
                "rangeTo": expr_to_json(range_to),
                "statements": statements_to_json(statements),
            });
            if let (Some(step), Some(map)) = (step, object.as_object_mut()) {
                map.insert("step".to_string(), expr_to_json(step));
            }
            object
        },
        Stmt::Break { line } => json!({ "astType": "Break", "lineNumber": line }),
        Stmt::Continue { line } => json!({ "astType": "Continue", "lineNumber": line }),
        Stmt::Exit { value, line } => json!({
            "astType": "Exit",
            "lineNumber": line,
            "value": value.as_ref().map(expr_to_json),
        }),
        Stmt::Return { value, line } => json!({
            "astType": "Return",
            "lineNumber": line,
            "value": value.as_ref().map(expr_to_json),
        }),
        Stmt::Goto { label, line } => json!({
            "astType": "Goto",
            "lineNumber": line,
            "label": label,
        }),
        Stmt::Label { name, line } => json!({
            "astType": "LabelDeclare",
            "lineNumber": line,
            "name": name,
        }),
        Stmt::Dim {
            variable,
            initializer,
            line,
        } => json!({
            "astType": "Dim",
            "lineNumber": line,
            "variable": variable,
            "initializer": initializer.as_ref().map(expr_to_json),
        }),
        Stmt::DimArray {
            variable,
            dimension,
            line,
        } => json!({
            "astType": "DimArray",
            "lineNumber": line,
            "variable": variable,
            "dimension": expr_to_json(dimension),
        }),
        Stmt::Redim {
            variable,
            dimension,
            line,
        } => json!({
            "astType": "Redim",
            "lineNumber": line,
            "variable": variable,
            "dimension": expr_to_json(dimension),
        }),
        Stmt::Assign {
            variable,
            value,
            line,
        } => json!({
            "astType": "Assign",
            "lineNumber": line,
            "variable": variable,
            "value": expr_to_json(value),
        }),
        Stmt::AssignArray {
            variable,
            subscript,
            value,
            line,
        } => json!({
            "astType": "AssignArray",
            "lineNumber": line,
            "variable": variable,
            "subscript": expr_to_json(subscript),
            "value": expr_to_json(value),
        }),
        Stmt::Expression { expr, line } => {
            // a statement-position expression is the expression's own object
            // with the line number added
            let mut object = expr_to_json(expr);
            if let Some(map) = object.as_object_mut() {
                map.insert("lineNumber".to_string(), json!(line));
            }
            object
        },
    }
}

fn expr_to_json(expr: &Expr) -> Json {
    match expr {
        Expr::LiteralNumeric { value, .. } => json!({
            "astType": "LiteralNumeric",
            "value": numeric_to_json(*value),
        }),
        Expr::LiteralString { value, .. } => json!({
            "astType": "LiteralString",
            "value": value,
        }),
        Expr::Variable { name, .. } => json!({
            "astType": "Variable",
            "variable": name,
        }),
        Expr::ArrayAccess {
            name, subscript, ..
        } => json!({
            "astType": "ArrayAccess",
            "variable": name,
            "subscript": expr_to_json(subscript),
        }),
        Expr::FunctionCall {
            name, arguments, ..
        } => json!({
            "astType": "FunctionCall",
            "name": name,
            "arguments": arguments.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
        Expr::UnaryOp { op, operand, .. } => json!({
            "astType": "UnaryOperator",
            "operator": op.to_string(),
            "operand": expr_to_json(operand),
        }),
        Expr::BinaryOp {
            op, left, right, ..
        } => json!({
            "astType": "BinaryOperator",
            "operator": op.to_string(),
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
    }
}

/// Integer-valued literals serialize as JSON integers, not floats.
fn numeric_to_json(value: f64) -> Json {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return json!(value as i64);
    }
    json!(value)
}
