//! Arithmetic built-ins: `add`, `sub`, `mul`, `div`

use crate::error::{Error, Result};
use crate::runtime::value::{format_stored, parse_number};
use crate::tools::{register as register_builtin, Builtin, FunctionTable, ToolContext};
use crate::tools::{ATTR_ID, ATTR_OPERAND1, ATTR_OPERAND2};

/// Register arithmetic built-ins
pub fn register(table: &mut FunctionTable) {
    register_builtin(table, Builtin::Add);
    register_builtin(table, Builtin::Sub);
    register_builtin(table, Builtin::Mul);
    register_builtin(table, Builtin::Div);
}

/// Apply `op` to `operand1` and `operand2` and assign the result to `id`
///
/// Division by zero is not an error; it yields an infinity or NaN like any
/// other float division.
pub fn binary(ctx: &mut ToolContext<'_>, op: fn(f64, f64) -> f64) -> Result<()> {
    let id = ctx.required(ATTR_ID)?;
    let left = ctx.required(ATTR_OPERAND1)?;
    let right = ctx.required(ATTR_OPERAND2)?;

    let left = operand(ctx, ATTR_OPERAND1, &left)?;
    let right = operand(ctx, ATTR_OPERAND2, &right)?;

    ctx.env.set_var(ctx.frame, &id, format_stored(op(left, right)));
    Ok(())
}

fn operand(ctx: &ToolContext<'_>, argument: &str, value: &str) -> Result<f64> {
    parse_number(value).ok_or_else(|| Error::NumericConversion {
        function: ctx.tool.name().to_string(),
        argument: argument.to_string(),
        value: value.to_string(),
    })
}
