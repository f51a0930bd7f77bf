//! Command arguments and their resolution against a caller frame

use crate::runtime::value::UNDEFINED;
use crate::runtime::{Environment, FrameId, Lookup};

/// Sigil marking a parameter reference, resolved in the caller's own frame
pub const PARAM_SIGIL: char = '$';

/// Sigil marking a variable reference, resolved through the caller's chain
pub const REF_SIGIL: char = '#';

/// How an argument obtains its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// Raw value, no indirection
    Literal(String),
    /// `$name`: must be bound in the caller's frame
    Param(String),
    /// `#name`: searched from the caller's frame up to the root
    Ref(String),
}

/// One named argument of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Parameter name the callee sees
    pub name: String,
    /// Value source
    pub value: ArgumentValue,
}

impl Argument {
    /// Classify `raw` by its first character
    ///
    /// The sigil is stripped from the referenced name. Anything not starting
    /// with a sigil is kept verbatim as a literal.
    pub fn parse(name: impl Into<String>, raw: &str) -> Self {
        let value = if let Some(rest) = raw.strip_prefix(PARAM_SIGIL) {
            ArgumentValue::Param(rest.to_string())
        } else if let Some(rest) = raw.strip_prefix(REF_SIGIL) {
            ArgumentValue::Ref(rest.to_string())
        } else {
            ArgumentValue::Literal(raw.to_string())
        };

        Argument {
            name: name.into(),
            value,
        }
    }

    /// Value of this argument as seen from `caller`
    ///
    /// Unbound references resolve to [`UNDEFINED`] rather than failing.
    pub fn resolve(&self, env: &Environment, caller: FrameId) -> String {
        let found = match &self.value {
            ArgumentValue::Literal(value) => return value.clone(),
            ArgumentValue::Param(name) => env.get_var(caller, name, Lookup::Local),
            ArgumentValue::Ref(name) => env.get_var(caller, name, Lookup::Chain),
        };
        found.unwrap_or(UNDEFINED).to_string()
    }
}
