use kbasic::check;

fn error_code(source: &str) -> String {
    let report = check(source);
    assert!(report.error, "expected an error for: {source}");
    report.error_id.expect("error report carries a code")
}

fn assert_error(source: &str, expected: &str) {
    assert_eq!(error_code(source), expected, "source: {source}");
}

fn target(source: &str) -> (String, String) {
    let report = check(source);
    assert!(
        !report.error,
        "unexpected error {:?} for: {source}",
        report.error_id
    );
    let target = report.target.expect("successful report carries a target");
    (target.kind.to_string(), target.stringified)
}

fn assert_number(source: &str, expected: &str) {
    assert_eq!(target(source), ("number".to_string(), expected.to_string()));
}

fn assert_string(source: &str, expected: &str) {
    assert_eq!(target(source), ("string".to_string(), expected.to_string()));
}

#[test]
fn function_declaration_syntax_errors() {
    assert_error("func outside()\n  func nested()", "SYN_FUNC_NESTED");
    assert_error("func (", "SYN_FUNC_MISSING_NAME");
    assert_error("func missingParen", "SYN_FUNC_MISSING_LEFT_PAREN");
    assert_error("func missingParameter(", "SYN_FUNC_INVALID_PARAMETERS");
    assert_error("func invalidList(+", "SYN_FUNC_INVALID_PARAMETERS");
    assert_error("func invalidList(a,+)", "SYN_FUNC_INVALID_PARAMETERS");
    assert_error("func invalidList(a,b[)", "SYN_FUNC_INVALID_PARAMETERS");
    assert_error("func invalidList(a,b),", "SYN_EXPECT_LINE_END");
}

#[test]
fn conditional_syntax_errors() {
    assert_error("if", "SYN_EXPR_INVALID");
    assert_error("if cond goto", "SYN_IF_GOTO_MISSING_LABEL");
    assert_error("if cond goto myLabel notEnd", "SYN_EXPECT_LINE_END");
    assert_error("if cond notEnd", "SYN_EXPECT_LINE_END");
    assert_error("func funcDecl()\n  elseif", "SYN_ELSEIF_NOT_MATCH");
    assert_error("if 1 = 1\nelseif", "SYN_EXPR_INVALID");
    assert_error("if 1 = 2\nelseif 1 = 1 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("func funcDecl()\n  else", "SYN_ELSE_NOT_MATCH");
    assert_error("if 1 = 1\nelse notEnd", "SYN_EXPECT_LINE_END");
}

#[test]
fn loop_syntax_errors() {
    assert_error("while", "SYN_EXPR_INVALID");
    assert_error("while 1 = 1 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("do\nwhile", "SYN_EXPR_INVALID");
    assert_error("do\nwhile 1 = 1 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("do notEnd", "SYN_EXPECT_LINE_END");
    assert_error("for 1 to 100", "SYN_FOR_MISSING_VARIABLE");
    assert_error("for i 1 to 100", "SYN_FOR_MISSING_EQUAL");
    assert_error("for i = to 100", "SYN_EXPR_INVALID");
    assert_error("for i = 1 100", "SYN_FOR_MISSING_TO");
    assert_error("for i = 1 to", "SYN_EXPR_INVALID");
    assert_error("for i = 1 to 100 step /", "SYN_EXPR_INVALID");
    assert_error("for i = 1 to 100 step 1 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("if 1 = 1\nnext i", "SYN_NEXT_NOT_MATCH");
    assert_error("for i=0 to 10\nnext j", "SYN_FOR_VAR_MISMATCH");
    assert_error("for i=0 to 10\nnext /", "SYN_EXPECT_LINE_END");
    assert_error("for i=0 to 10\nnext i /", "SYN_EXPECT_LINE_END");
}

#[test]
fn jump_syntax_errors() {
    assert_error("if 1 = 1\nbreak", "SYN_BREAK_OUTSIDE_LOOP");
    assert_error("while 1 = 1\nbreak notEnd", "SYN_EXPECT_LINE_END");
    assert_error("if 1 = 1\ncontinue", "SYN_CONTINUE_OUTSIDE_LOOP");
    assert_error("while 1 = 1\ncontinue notEnd", "SYN_EXPECT_LINE_END");
    assert_error("exit 1=", "SYN_EXPR_INVALID");
    assert_error("exit 1 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("if 1=1\n  return", "SYN_RETURN_OUTSIDE_FUNC");
    assert_error("func testReturn()\n  return 1=", "SYN_EXPR_INVALID");
    assert_error("func testReturn()\n  return 2 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("goto/", "SYN_GOTO_MISSING_LABEL");
    assert_error("goto label/", "SYN_EXPECT_LINE_END");
}

#[test]
fn block_end_syntax_errors() {
    assert_error("while 1 = 1\nend if", "SYN_END_KEYWORD_NOT_MATCH");
    assert_error("if 1 = 1\nelse\nend while", "SYN_END_KEYWORD_NOT_MATCH");
    assert_error("func funcDecl()\nend if", "SYN_END_KEYWORD_NOT_MATCH");
    assert_error("while 1 = 1\nend while /", "SYN_EXPECT_LINE_END");
    assert_error("end for", "SYN_END_KEYWORD_INVALID");
    assert_error("func unclosed()\n  dim a", "SYN_UNTERMINATED_FUNC_OR_CTRL");
    assert_error("while 1", "SYN_UNTERMINATED_FUNC_OR_CTRL");
}

#[test]
fn declaration_syntax_errors() {
    assert_error("dim 3", "SYN_DIM_MISSING_VARIABLE");
    assert_error("dim a 2", "SYN_DIM_INVALID");
    assert_error("dim a=", "SYN_EXPR_INVALID");
    assert_error("dim a=1+", "SYN_EXPR_INVALID");
    assert_error("dim a=1+2 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("dim a[", "SYN_EXPR_INVALID");
    assert_error("dim a[10", "SYN_DIM_ARRAY_MISSING_BRACKET_R");
    assert_error("dim a[10]+", "SYN_EXPECT_LINE_END");
    assert_error("redim [", "SYN_REDIM_MISSING_VARIABLE");
    assert_error("redim a", "SYN_REDIM_MISSING_BRACKET_L");
    assert_error("redim a[1+", "SYN_EXPR_INVALID");
    assert_error("redim a[1+2", "SYN_REDIM_MISSING_BRACKET_R");
    assert_error("redim a[1+2]+", "SYN_EXPECT_LINE_END");
}

#[test]
fn assignment_and_expression_syntax_errors() {
    assert_error("labelName:/", "SYN_EXPECT_LINE_END");
    assert_error("var =", "SYN_EXPR_INVALID");
    assert_error("var = 1 + 2 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("arr[1] =", "SYN_EXPR_INVALID");
    assert_error("arr[1] = 2 notEnd", "SYN_EXPECT_LINE_END");
    assert_error("call(1+2 2", "SYN_EXPR_INVALID");
    assert_error("arr[1", "SYN_EXPR_INVALID");
    assert_error("1 ! 2", "SYN_EXPR_INVALID");
    assert_error("1 +", "SYN_EXPR_INVALID");
    assert_error("(1", "SYN_EXPR_INVALID");
    assert_error("/", "SYN_EXPR_INVALID");
    assert_error(")", "SYN_EXPR_INVALID");
}

#[test]
fn unresolved_reference_semantic_errors() {
    assert_error("1=a", "SEM_VAR_NOT_FOUND");
    assert_error("1=arr[0]", "SEM_VAR_NOT_FOUND");
    assert_error("p_(1)", "SEM_FUNC_NOT_FOUND");
    assert_error("goto undefinedLabel", "SEM_GOTO_LABEL_NOT_FOUND");
    assert_error("a = 0", "SEM_VAR_NOT_FOUND");
    assert_error("a[1] = 0", "SEM_VAR_NOT_FOUND");
    assert_error("redim nf[100]", "SEM_VAR_NOT_FOUND");
    assert_error("for i=0 to 10\nnext i", "SEM_VAR_NOT_FOUND");
}

#[test]
fn kind_mismatch_semantic_errors() {
    assert_error("dim a = 0\na[1]=2", "SEM_VAR_IS_NOT_ARRAY");
    assert_error("dim a\na[1] = 0", "SEM_VAR_IS_NOT_ARRAY");
    assert_error("dim a = 0;redim a[100]", "SEM_VAR_IS_NOT_ARRAY");
    assert_error("dim a[10]\na = 0", "SEM_VAR_IS_NOT_PRIMITIVE");
    assert_error("dim arr[10]\nfor arr=0 to 10\nnext arr", "SEM_VAR_IS_NOT_PRIMITIVE");
}

#[test]
fn call_semantic_errors() {
    assert_error("p(1,2,3,4)", "SEM_FUNC_ARG_LIST_MISMATCH");
    assert_error(
        "func callMe(arg1, arg2)\nend func\ncallMe(2)",
        "SEM_FUNC_ARG_LIST_MISMATCH",
    );
}

#[test]
fn naming_semantic_errors() {
    assert_error("func _(_1234567890abcde)\nend func", "SEM_VAR_NAME_TOO_LONG");
    assert_error("func _(a1,a1)\nend func", "SEM_VAR_DUPLICATED");
    assert_error("dim _1234567890abcde", "SEM_VAR_NAME_TOO_LONG");
    assert_error("dim a1\ndim a1", "SEM_VAR_DUPLICATED");
    assert_error("dim _1234567890abcde[10]", "SEM_VAR_NAME_TOO_LONG");
    assert_error("dim a1\ndim a1[10]", "SEM_VAR_DUPLICATED");
    assert_error("_1234567890abcde:", "SEM_LABEL_NAME_TOO_LONG");
    assert_error("a:\na:", "SEM_LABEL_DUPLICATED");
    assert_error("func _1234567890abcde()\nend func", "SEM_FUNC_NAME_TOO_LONG");
    assert_error(
        "func dup()\nend func\nfunc dup()\nend func",
        "SEM_FUNC_DUPLICATED",
    );
}

#[test]
fn goto_scope_locality() {
    // the label exists and is spelled correctly, but lives in another scope
    assert_error(
        "goto insideFunc\nfunc _()\n  insideFunc:\nend func",
        "SEM_GOTO_LABEL_SCOPE_MISMATCH",
    );
    assert_error(
        "func _()\n  goto outside\nend func\noutside:",
        "SEM_GOTO_LABEL_SCOPE_MISMATCH",
    );
}

#[test]
fn runtime_type_errors() {
    assert_error("1+\"2\"", "RUNTIME_TYPE_MISMATCH");
    assert_error("len(1)", "RUNTIME_TYPE_MISMATCH");
    assert_error("val(1)", "RUNTIME_TYPE_MISMATCH");
    assert_error("asc(0)", "RUNTIME_TYPE_MISMATCH");
    assert_error("chr(\"A\")", "RUNTIME_TYPE_MISMATCH");
}

#[test]
fn runtime_division_errors() {
    assert_error("1/0", "RUNTIME_DIVISION_BY_ZERO");
    assert_error("1\\0", "RUNTIME_DIVISION_BY_ZERO");
    assert_error("dim a = 5 % 0", "RUNTIME_DIVISION_BY_ZERO");
}

#[test]
fn runtime_array_errors() {
    assert_error("dim a[-1]", "RUNTIME_ARRAY_INVALID_SIZE");
    assert_error("dim a[5]\nredim a[-1]", "RUNTIME_ARRAY_INVALID_SIZE");
    assert_error("dim a[5]\na[10]=0", "RUNTIME_ARRAY_OUT_OF_BOUNDS");
    assert_error("dim a[5]\na[-1]", "RUNTIME_ARRAY_OUT_OF_BOUNDS");
}

#[test]
fn runtime_parameter_kind_errors() {
    assert_error(
        "func assignArrEl(a[])\n  a[0]=1\nend func\nassignArrEl(0)",
        "RUNTIME_NOT_ARRAY",
    );
    assert_error(
        "func accessArrEl(a[])\n  p(a[0])\nend func\naccessArrEl(0)",
        "RUNTIME_NOT_ARRAY",
    );
    assert_error(
        "dim arr[2]\nfunc wantsScalar(a)\nend func\nwantsScalar(arr)",
        "RUNTIME_NOT_ARRAY",
    );
}

#[test]
fn float_relative_equality() {
    assert_number(
        "dim result = floatRelEqual()\n\
         func floatRelEqual()\n\
         \x20 dim a = 1.0000001\n\
         \x20 dim b = 1.0000002\n\
         \x20 return a ~= b\n\
         end func",
        "1",
    );
    assert_number("dim result = 1 ~= 1", "1");
    assert_number("dim result = 1 ~= 2", "0");
}

#[test]
fn factorial() {
    assert_number(
        "dim result = factorial(5)\n\
         func factorial(n)\n\
         \x20 if n = 0\n\
         \x20   return 1\n\
         \x20 else\n\
         \x20   return n * factorial(n-1)\n\
         \x20 end if\n\
         end func",
        "120",
    );
}

#[test]
fn fibonacci() {
    assert_number(
        "dim result = fib(10)\n\
         func fib(n)\n\
         \x20 if n <= 0\n\
         \x20   return 0\n\
         \x20 elseif n = 1\n\
         \x20   return 1\n\
         \x20 else\n\
         \x20   return fib(n - 1) + fib(n - 2)\n\
         \x20 end if\n\
         end func",
        "55",
    );
}

#[test]
fn greatest_common_divisor() {
    assert_number(
        "dim result = gcd(28463, 79867)\n\
         func gcd(a, b)\n\
         \x20 dim temp = 0\n\
         \x20 while b <> 0\n\
         \x20   temp = b\n\
         \x20   b = a % b\n\
         \x20   a = temp\n\
         \x20 end while\n\
         \x20 return a\n\
         end func",
        "1",
    );
}

#[test]
fn fast_exponentiation() {
    assert_number(
        "dim result = fastPow(2,10)\n\
         func fastPow(x, n)\n\
         \x20 dim half\n\
         \x20 if n = 0\n\
         \x20   return 1\n\
         \x20 elseif n % 2 = 0\n\
         \x20   half = fastPow(x, n / 2)\n\
         \x20   return half * half\n\
         \x20 else\n\
         \x20   return x * fastPow(x, n - 1)\n\
         \x20 end if\n\
         end func",
        "1024",
    );
}

#[test]
fn towers_of_hanoi() {
    assert_string(
        "dim actions = hanoi(3, \"A\", \"C\", \"B\")\n\
         func hanoi(n, s, t, a)\n\
         \x20 if n > 0\n\
         \x20   dim move = s & \"->\" & t & \";\"\n\
         \x20   return hanoi(n - 1, s, a, t) & move & hanoi(n - 1, a, t, s)\n\
         \x20 end if\n\
         \x20 return \"\"\n\
         end func",
        "A->C;A->B;C->B;A->C;B->A;B->C;A->C;",
    );
}

#[test]
fn string_builtins() {
    assert_number(
        "dim checkResult = checkLen() && checkVal() && checkAsc()\n\
         func checkLen()\n\
         \x20 return len(\"hello world\") ~= 11\n\
         end func\n\
         func checkVal()\n\
         \x20 return val(\"123.456\") ~= 123.456\n\
         end func\n\
         func checkAsc()\n\
         \x20 return asc(\"ASCII\") ~= 65\n\
         end func",
        "1",
    );
}

const BUBBLE_SORT: &str = "dim result = \"\"\n\
                           func bubbleSort(a[])\n\
                           \x20 dim changeFlag\n\
                           \x20 dim i\n\
                           \x20 dim size = len(a)\n\
                           \x20 do\n\
                           \x20   changeFlag = 0\n\
                           \x20   for i = 0 to size - 2\n\
                           \x20     if a[i] < a[i + 1]\n\
                           \x20       dim temp = a[i]\n\
                           \x20       a[i] = a[i + 1]\n\
                           \x20       a[i + 1] = temp\n\
                           \x20       changeFlag = 1\n\
                           \x20     end if\n\
                           \x20   next i\n\
                           \x20 while changeFlag\n\
                           end func\n\
                           dim array[5]\n\
                           dim i\n\
                           for i = 0 to len(array) - 1\n\
                           \x20 array[i] = (i + 1) * 10;\n\
                           next i\n\
                           bubbleSort(array)\n\
                           for i = 0 to len(array) - 1\n\
                           \x20 result = result & array[i]\n\
                           next i";

#[test]
fn bubble_sort_descending() {
    assert_string(BUBBLE_SORT, "5040302010");
}

#[test]
fn evaluation_is_deterministic() {
    let first = check(BUBBLE_SORT);
    let second = check(BUBBLE_SORT);
    assert_eq!(
        first.target.map(|t| t.stringified),
        second.target.map(|t| t.stringified)
    );
}

#[test]
fn array_parameters_alias_the_callers_array() {
    assert_number(
        "dim result = 0\n\
         dim arr[3]\n\
         fill(arr)\n\
         result = arr[0] + arr[1] + arr[2]\n\
         func fill(a[])\n\
         \x20 a[0] = 1\n\
         \x20 a[1] = 2\n\
         \x20 a[2] = 3\n\
         end func",
        "6",
    );
}

#[test]
fn goto_jumps_backward_and_forward() {
    assert_number(
        "dim result = 0\n\
         dim i = 0\n\
         top:\n\
         i = i + 1\n\
         result = result + i\n\
         if i < 3 goto top",
        "6",
    );
    assert_number(
        "dim result = 1\n\
         goto skip\n\
         result = 2\n\
         skip:",
        "1",
    );
}

#[test]
fn goto_enters_a_nested_block() {
    assert_number(
        "dim result = 0\n\
         goto inside\n\
         while 0\n\
         inside:\n\
         result = 5\n\
         end while",
        "5",
    );
}

#[test]
fn exit_stops_the_program() {
    assert_number("dim result = 1\nexit\nresult = 2", "1");
    assert_number("dim result = 1\nexit 7\nresult = 2", "1");
}

#[test]
fn loop_control_statements() {
    assert_number(
        "dim result = 0\n\
         dim i\n\
         for i = 1 to 10\n\
         \x20 if i = 4\n\
         \x20   break\n\
         \x20 end if\n\
         \x20 if i % 2 = 0\n\
         \x20   continue\n\
         \x20 end if\n\
         \x20 result = result + i\n\
         next i",
        "4",
    );
}

#[test]
fn for_loop_respects_negative_steps() {
    assert_string(
        "dim result = \"\"\n\
         dim i\n\
         for i = 3 to 1 step -1\n\
         \x20 result = result & i\n\
         next i",
        "321",
    );
}

#[test]
fn empty_source_reports_a_default_result() {
    let report = check("# Comment Only");
    assert!(!report.error);
}

#[test]
fn statement_separators_share_a_line() {
    assert_number("dim result = 0;result = 3", "3");
}
