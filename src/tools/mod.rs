//! Built-in functions for FSL
//!
//! Built-ins form a closed set. Each one reads its attributes from the frame
//! its calling command just built, never from ancestors.

pub mod stdlib;

use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::{Environment, FrameId, Function, Lookup};

/// Attribute naming the variable a built-in writes or removes
pub const ATTR_ID: &str = "id";
/// Attribute carrying a value
pub const ATTR_VALUE: &str = "value";
/// First arithmetic operand
pub const ATTR_OPERAND1: &str = "operand1";
/// Second arithmetic operand
pub const ATTR_OPERAND2: &str = "operand2";

/// Function table keyed by name
pub type FunctionTable = HashMap<String, Rc<Function>>;

/// Built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `create(id, value)`: assign a variable
    Create,
    /// `delete(id)`: remove an existing variable
    Delete,
    /// `update(id, value)`: overwrite an existing variable
    Update,
    /// `print(value)`: write a value to the output
    Print,
    /// `add(id, operand1, operand2)`
    Add,
    /// `sub(id, operand1, operand2)`
    Sub,
    /// `mul(id, operand1, operand2)`
    Mul,
    /// `div(id, operand1, operand2)`
    Div,
}

impl Builtin {
    /// Every built-in, in registration order
    pub const ALL: [Builtin; 8] = [
        Builtin::Create,
        Builtin::Delete,
        Builtin::Update,
        Builtin::Print,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
    ];

    /// Name scripts call the built-in by
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Create => "create",
            Builtin::Delete => "delete",
            Builtin::Update => "update",
            Builtin::Print => "print",
            Builtin::Add => "add",
            Builtin::Sub => "sub",
            Builtin::Mul => "mul",
            Builtin::Div => "div",
        }
    }

    /// Execute the built-in in `frame`
    pub fn execute(self, env: &mut Environment, frame: FrameId, out: &mut dyn Write) -> Result<()> {
        let mut ctx = ToolContext {
            tool: self,
            env,
            frame,
            out,
        };
        match self {
            Builtin::Create => stdlib::variables::create(&mut ctx),
            Builtin::Delete => stdlib::variables::delete(&mut ctx),
            Builtin::Update => stdlib::variables::update(&mut ctx),
            Builtin::Print => stdlib::io::print(&mut ctx),
            Builtin::Add => stdlib::math::binary(&mut ctx, |a, b| a + b),
            Builtin::Sub => stdlib::math::binary(&mut ctx, |a, b| a - b),
            Builtin::Mul => stdlib::math::binary(&mut ctx, |a, b| a * b),
            Builtin::Div => stdlib::math::binary(&mut ctx, |a, b| a / b),
        }
    }
}

/// Frame a built-in runs in, plus the output sink
pub struct ToolContext<'a> {
    /// Built-in being executed
    pub tool: Builtin,
    /// Environment holding the frame
    pub env: &'a mut Environment,
    /// Frame built by the calling command
    pub frame: FrameId,
    /// Output sink for `print`
    pub out: &'a mut dyn Write,
}

impl ToolContext<'_> {
    /// Get a required attribute from the built-in's own frame
    pub fn required(&self, attribute: &str) -> Result<String> {
        self.env
            .get_var(self.frame, attribute, Lookup::Local)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingArgument {
                function: self.tool.name().to_string(),
                argument: attribute.to_string(),
            })
    }
}

/// Table pre-seeded with every built-in
pub fn builtins() -> FunctionTable {
    let mut table = FunctionTable::new();
    stdlib::register_all(&mut table);
    table
}

/// Register one built-in into a table
pub fn register(table: &mut FunctionTable, builtin: Builtin) {
    table.insert(
        builtin.name().to_string(),
        Rc::new(Function::Builtin(builtin)),
    );
}
