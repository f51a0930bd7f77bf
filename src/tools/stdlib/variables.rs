//! Variable built-ins: `create`, `update`, `delete`

use crate::error::{Error, Result};
use crate::tools::{register as register_builtin, Builtin, FunctionTable, ToolContext};
use crate::tools::{ATTR_ID, ATTR_VALUE};

/// Register variable built-ins
pub fn register(table: &mut FunctionTable) {
    register_builtin(table, Builtin::Create);
    register_builtin(table, Builtin::Delete);
    register_builtin(table, Builtin::Update);
}

/// `create(id, value)`
///
/// Overwrites the nearest existing binding of `id`, or creates it at the root.
pub fn create(ctx: &mut ToolContext<'_>) -> Result<()> {
    let id = ctx.required(ATTR_ID)?;
    let value = ctx.required(ATTR_VALUE)?;
    ctx.env.set_var(ctx.frame, &id, value);
    Ok(())
}

/// `update(id, value)`
pub fn update(ctx: &mut ToolContext<'_>) -> Result<()> {
    let id = ctx.required(ATTR_ID)?;
    let value = ctx.required(ATTR_VALUE)?;
    if ctx.env.update_var(ctx.frame, &id, value) {
        Ok(())
    } else {
        Err(undefined(ctx, "update", id))
    }
}

/// `delete(id)`
pub fn delete(ctx: &mut ToolContext<'_>) -> Result<()> {
    let id = ctx.required(ATTR_ID)?;
    if ctx.env.delete_var(ctx.frame, &id) {
        Ok(())
    } else {
        Err(undefined(ctx, "delete", id))
    }
}

fn undefined(ctx: &ToolContext<'_>, operation: &str, name: String) -> Error {
    Error::UndefinedVariable {
        function: ctx.tool.name().to_string(),
        operation: operation.to_string(),
        name,
    }
}
