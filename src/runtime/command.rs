use crate::runtime::argument::{Argument, REF_SIGIL};

/// One invocation: a target function plus its named arguments
///
/// Argument order carries no meaning; each argument is bound by name into the
/// callee's frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Target function name, without a leading `#`
    pub target: String,
    /// Arguments bound into the callee's frame
    pub arguments: Vec<Argument>,
}

impl Command {
    /// Creates a command, stripping one leading `#` from the target name
    pub fn new(target: &str, arguments: Vec<Argument>) -> Self {
        let target = target.strip_prefix(REF_SIGIL).unwrap_or(target);
        Command {
            target: target.to_string(),
            arguments,
        }
    }
}
