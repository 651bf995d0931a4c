use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::num::parse_leading_number,
};

/// The built-in function table: name and declared argument count.
///
/// The analyzer checks call arity against this table; the evaluator
/// dispatches on the name. User-defined functions shadow builtins, so the
/// table is only consulted after the user function lookup misses.
pub(crate) const BUILT_IN_FUNCTIONS: &[(&str, usize)] = &[
    ("p", 1),
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("sqrt", 1),
    ("exp", 1),
    ("abs", 1),
    ("log", 1),
    ("floor", 1),
    ("ceil", 1),
    ("rand", 0),
    ("len", 1),
    ("val", 1),
    ("chr", 1),
    ("asc", 1),
];

/// Looks up the declared argument count of a builtin.
pub(crate) fn builtin_arity(name: &str) -> Option<usize> {
    BUILT_IN_FUNCTIONS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, arity)| *arity)
}

impl Interpreter<'_> {
    /// Invokes a builtin with already-evaluated arguments.
    ///
    /// Argument counts were validated by the analyzer; argument types are
    /// checked here, at call time.
    pub(crate) fn call_builtin(
        &mut self,
        name: &str,
        mut args: Vec<Value>,
        line: usize,
    ) -> EvalResult<Value> {
        let arg = args.pop().unwrap_or(Value::Number(0.0));
        match name {
            "p" => {
                self.printed.push(arg.to_string());
                Ok(Value::Number(0.0))
            },
            "sin" => Ok(Value::Number(arg.as_number(line)?.sin())),
            "cos" => Ok(Value::Number(arg.as_number(line)?.cos())),
            "tan" => Ok(Value::Number(arg.as_number(line)?.tan())),
            "sqrt" => Ok(Value::Number(arg.as_number(line)?.sqrt())),
            "exp" => Ok(Value::Number(arg.as_number(line)?.exp())),
            "abs" => Ok(Value::Number(arg.as_number(line)?.abs())),
            "log" => Ok(Value::Number(arg.as_number(line)?.ln())),
            "floor" => Ok(Value::Number(arg.as_number(line)?.floor())),
            "ceil" => Ok(Value::Number(arg.as_number(line)?.ceil())),
            "rand" => Ok(Value::Number(self.next_rand())),
            "len" => match &arg {
                Value::Str(s) => Ok(Value::Number(s.chars().count() as f64)),
                Value::Array(elements) => Ok(Value::Number(elements.borrow().len() as f64)),
                Value::Number(_) => Err(RuntimeError::TypeMismatch { line }.into()),
            },
            "val" => Ok(Value::Number(parse_leading_number(arg.as_str(line)?))),
            "chr" => {
                let code = arg.as_number(line)? as u32;
                let text = char::from_u32(code).map(String::from).unwrap_or_default();
                Ok(Value::Str(text))
            },
            "asc" => {
                let text = arg.as_str(line)?;
                Ok(Value::Number(
                    text.chars().next().map_or(0.0, |c| f64::from(c as u32)),
                ))
            },
            _ => unreachable!("the analyzer rejects unknown function names"),
        }
    }

    /// Produces the next value of the deterministic `rand` sequence.
    ///
    /// A fixed-seed xorshift keeps repeated evaluations of the same source
    /// identical, which the engine's determinism contract requires.
    fn next_rand(&mut self) -> f64 {
        let mut x = self.rand_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rand_state = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}
