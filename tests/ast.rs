use kbasic::dump_ast;
use serde_json::{json, Value};

fn dump(source: &str) -> Value {
    dump_ast(source).expect("source parses cleanly")
}

#[test]
fn empty_if_block() {
    assert_eq!(
        dump("if 1\nend if"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "If",
                    "lineNumber": 1,
                    "controlId": 1,
                    "condition": { "astType": "LiteralNumeric", "value": 1 },
                    "then": { "astType": "Then", "statements": [] },
                    "elseif": [],
                    "else": null
                }
            ]
        })
    );
}

#[test]
fn if_with_elseif() {
    assert_eq!(
        dump("if 0\nelseif 1\nend if"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "If",
                    "lineNumber": 1,
                    "controlId": 1,
                    "condition": { "astType": "LiteralNumeric", "value": 0 },
                    "then": { "astType": "Then", "statements": [] },
                    "elseif": [
                        {
                            "astType": "ElseIf",
                            "lineNumber": 2,
                            "condition": { "astType": "LiteralNumeric", "value": 1 },
                            "statements": []
                        }
                    ],
                    "else": null
                }
            ]
        })
    );
}

#[test]
fn if_with_else() {
    assert_eq!(
        dump("if 0\nelse\nend if"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "If",
                    "lineNumber": 1,
                    "controlId": 1,
                    "condition": { "astType": "LiteralNumeric", "value": 0 },
                    "then": { "astType": "Then", "statements": [] },
                    "elseif": [],
                    "else": {
                        "astType": "Else",
                        "lineNumber": 2,
                        "statements": []
                    }
                }
            ]
        })
    );
}

#[test]
fn if_with_elseif_chain_and_else() {
    assert_eq!(
        dump("if 0\nelseif 1\nelseif 2\nelse\nend if"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "If",
                    "lineNumber": 1,
                    "controlId": 1,
                    "condition": { "astType": "LiteralNumeric", "value": 0 },
                    "then": { "astType": "Then", "statements": [] },
                    "elseif": [
                        {
                            "astType": "ElseIf",
                            "lineNumber": 2,
                            "condition": { "astType": "LiteralNumeric", "value": 1 },
                            "statements": []
                        },
                        {
                            "astType": "ElseIf",
                            "lineNumber": 3,
                            "condition": { "astType": "LiteralNumeric", "value": 2 },
                            "statements": []
                        }
                    ],
                    "else": {
                        "astType": "Else",
                        "lineNumber": 4,
                        "statements": []
                    }
                }
            ]
        })
    );
}

#[test]
fn while_loop() {
    assert_eq!(
        dump("while 1\nend while"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "While",
                    "lineNumber": 1,
                    "controlId": 1,
                    "condition": { "astType": "LiteralNumeric", "value": 1 },
                    "statements": []
                }
            ]
        })
    );
}

#[test]
fn do_while_loop() {
    assert_eq!(
        dump("do\nwhile 1"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "DoWhile",
                    "lineNumber": 1,
                    "controlId": 1,
                    "statements": [],
                    "condition": { "astType": "LiteralNumeric", "value": 1 }
                }
            ]
        })
    );
}

#[test]
fn for_loop_without_step_omits_the_field() {
    assert_eq!(
        dump("for i=1 to 10\nnext i"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "For",
                    "lineNumber": 1,
                    "controlId": 1,
                    "variable": "i",
                    "rangeFrom": { "astType": "LiteralNumeric", "value": 1 },
                    "rangeTo": { "astType": "LiteralNumeric", "value": 10 },
                    "statements": []
                }
            ]
        })
    );
}

#[test]
fn function_declaration_with_parameter_kinds() {
    assert_eq!(
        dump("func declare(a[],b,c)\n  dim e = 0\n  p(e)\nend func"),
        json!({
            "astType": "Program",
            "numOfControl": 1,
            "statements": [
                {
                    "astType": "FunctionDeclare",
                    "lineNumber": 1,
                    "controlId": 1,
                    "name": "declare",
                    "parameters": [
                        { "name": "a", "type": "ARRAY" },
                        { "name": "b", "type": "PRIMITIVE" },
                        { "name": "c", "type": "PRIMITIVE" }
                    ],
                    "statements": [
                        {
                            "astType": "Dim",
                            "lineNumber": 2,
                            "variable": "e",
                            "initializer": { "astType": "LiteralNumeric", "value": 0 }
                        },
                        {
                            "astType": "FunctionCall",
                            "lineNumber": 3,
                            "name": "p",
                            "arguments": [
                                { "astType": "Variable", "variable": "e" }
                            ]
                        }
                    ]
                }
            ]
        })
    );
}

#[test]
fn conditional_goto_takes_no_control_id() {
    assert_eq!(
        dump("dim a\nif a goto done\na = 1\ndone:\nexit"),
        json!({
            "astType": "Program",
            "numOfControl": 0,
            "statements": [
                {
                    "astType": "Dim",
                    "lineNumber": 1,
                    "variable": "a",
                    "initializer": null
                },
                {
                    "astType": "IfGoto",
                    "lineNumber": 2,
                    "condition": { "astType": "Variable", "variable": "a" },
                    "label": "done"
                },
                {
                    "astType": "Assign",
                    "lineNumber": 3,
                    "variable": "a",
                    "value": { "astType": "LiteralNumeric", "value": 1 }
                },
                {
                    "astType": "LabelDeclare",
                    "lineNumber": 4,
                    "name": "done"
                },
                {
                    "astType": "Exit",
                    "lineNumber": 5,
                    "value": null
                }
            ]
        })
    );
}

#[test]
fn control_ids_count_depth_first_across_the_program() {
    let tree = dump(
        "while 1\n\
         \x20 if 2\n\
         \x20 end if\n\
         end while\n\
         func f()\n\
         \x20 do\n\
         \x20 while 0\n\
         end func",
    );
    assert_eq!(tree["numOfControl"], json!(4));
    assert_eq!(tree["statements"][0]["controlId"], json!(1));
    assert_eq!(tree["statements"][0]["statements"][0]["controlId"], json!(2));
    assert_eq!(tree["statements"][1]["controlId"], json!(3));
    assert_eq!(tree["statements"][1]["statements"][0]["controlId"], json!(4));
}

#[test]
fn syntax_errors_surface_from_the_dump() {
    let error = dump_ast("func (").unwrap_err();
    assert_eq!(error.code(), "SYN_FUNC_MISSING_NAME");
}
