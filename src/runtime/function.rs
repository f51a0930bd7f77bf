use crate::runtime::Command;
use crate::tools::Builtin;

/// A user-defined function: an ordered list of commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite {
    /// Function name, used to annotate errors
    pub name: String,
    /// Commands in declaration order
    pub commands: Vec<Command>,
}

/// Anything a command can call
///
/// The set of variants is closed: user-defined composites and the fixed
/// built-ins from [`crate::tools`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Function {
    /// User-defined function
    Composite(Composite),
    /// Built-in function
    Builtin(Builtin),
}

impl Function {
    /// Creates a composite function
    pub fn composite(name: impl Into<String>, commands: Vec<Command>) -> Self {
        Function::Composite(Composite {
            name: name.into(),
            commands,
        })
    }

    /// Function name
    pub fn name(&self) -> &str {
        match self {
            Function::Composite(composite) => &composite.name,
            Function::Builtin(builtin) => builtin.name(),
        }
    }

    /// True for built-in functions
    pub fn is_builtin(&self) -> bool {
        matches!(self, Function::Builtin(_))
    }
}
