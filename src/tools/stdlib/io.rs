//! Output built-ins: `print`

use crate::error::Result;
use crate::runtime::value::{format_printed, parse_number};
use crate::tools::{register as register_builtin, Builtin, FunctionTable, ToolContext, ATTR_VALUE};

/// Register output built-ins
pub fn register(table: &mut FunctionTable) {
    register_builtin(table, Builtin::Print);
}

/// `print(value)`
///
/// Numeric values are written with exactly 4 decimals, anything else verbatim.
pub fn print(ctx: &mut ToolContext<'_>) -> Result<()> {
    let value = ctx.required(ATTR_VALUE)?;
    match parse_number(&value) {
        Some(number) => writeln!(ctx.out, "{}", format_printed(number))?,
        None => writeln!(ctx.out, "{}", value)?,
    }
    Ok(())
}
