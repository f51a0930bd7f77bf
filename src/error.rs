//! Error types for the FSL engine

use thiserror::Error;

/// FSL engine errors
///
/// Leaf variants describe what went wrong. [`Error::InFunction`] and
/// [`Error::InScript`] wrap a lower-level error with the name of the layer it
/// crossed; they never change its [`ErrorKind`].
#[derive(Error, Debug)]
pub enum Error {
    // Input errors
    /// Script file could not be opened or read
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// Script file is not a well-formed JSON document
    ///
    /// **Triggered by:** trailing commas, unbalanced braces, non-object top level
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        column: usize,
        /// Error description
        message: String,
    },

    // Script structure errors
    /// Script declares no `init` function
    #[error("\"init\" function not found")]
    MissingInit,

    /// Function body entry is not a well-formed command
    ///
    /// **Example:** `{"init": [42]}`, `{"init": [{"id": "x"}]}` (no `cmd`)
    #[error("cannot parse function {function:?}: {reason}")]
    InvalidCommand {
        /// Function the entry belongs to
        function: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// Command argument value is not a scalar
    #[error("cannot parse arg {argument:?} of command {command:?}: {reason}")]
    InvalidArgument {
        /// Target function of the command
        command: String,
        /// Parameter name
        argument: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Top-level variable literal is not a floating-point number
    ///
    /// **Example:** `{"x": "abc"}`
    #[error("variable {name:?} = {value:?} is not a floating-point number")]
    NotANumber {
        /// Variable name
        name: String,
        /// Offending literal
        value: String,
    },

    // Runtime errors
    /// Command names a function not visible from the calling frame
    #[error("failed to evaluate command: function {name:?} is not defined")]
    UndefinedFunction {
        /// Function name
        name: String,
    },

    /// Built-in function was called without a required attribute
    #[error("failed to evaluate function {function:?}: missing {argument:?} argument")]
    MissingArgument {
        /// Built-in function name
        function: String,
        /// Attribute name
        argument: String,
    },

    /// Arithmetic operand is not a floating-point number
    #[error("failed to evaluate function {function:?}: cannot convert {argument:?} = {value:?} to float")]
    NumericConversion {
        /// Built-in function name
        function: String,
        /// Attribute name
        argument: String,
        /// Offending value
        value: String,
    },

    /// `update` or `delete` targeted a variable bound nowhere in the chain
    #[error("failed to evaluate function {function:?}: {operation} failed, variable {name:?} is undefined")]
    UndefinedVariable {
        /// Built-in function name
        function: String,
        /// Operation that failed (`update` or `delete`)
        operation: String,
        /// Variable name
        name: String,
    },

    // Context
    /// Error raised while executing a composite function
    #[error("failed to execute function {name:?}")]
    InFunction {
        /// Composite function name
        name: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// Error raised while running a script file
    #[error("failed to run script {path:?}")]
    InScript {
        /// Script file path as given on the command line
        path: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },
}

/// Error kind classification
///
/// Context wrappers are transparent to classification: a missing argument
/// three functions deep is still [`ErrorKind::MissingArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File open or read failure
    IoError,
    /// Malformed JSON document
    SyntaxError,
    /// Missing `init`, malformed command entry, non-numeric variable literal
    ScriptStructureError,
    /// Command target not visible via chain search
    UndefinedFunction,
    /// Required built-in attribute absent from its frame
    MissingArgument,
    /// Operand not parseable as a float
    NumericConversionError,
    /// `update`/`delete` target absent from the whole chain
    UndefinedVariableOperation,
}

impl Error {
    /// Wrap an error with the name of the composite function it escaped from
    pub fn in_function(name: impl Into<String>, source: Error) -> Self {
        Error::InFunction {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an error with the path of the script file it escaped from
    pub fn in_script(path: impl Into<String>, source: Error) -> Self {
        Error::InScript {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InFunction { source, .. } | Error::InScript { source, .. } => source.kind(),
            Error::Io(_) => ErrorKind::IoError,
            Error::Syntax { .. } => ErrorKind::SyntaxError,
            Error::MissingInit
            | Error::InvalidCommand { .. }
            | Error::InvalidArgument { .. }
            | Error::NotANumber { .. } => ErrorKind::ScriptStructureError,
            Error::UndefinedFunction { .. } => ErrorKind::UndefinedFunction,
            Error::MissingArgument { .. } => ErrorKind::MissingArgument,
            Error::NumericConversion { .. } => ErrorKind::NumericConversionError,
            Error::UndefinedVariable { .. } => ErrorKind::UndefinedVariableOperation,
        }
    }

    /// Full causal chain on one line, outermost layer first
    pub fn chain_message(&self) -> String {
        let mut message = self.to_string();
        let mut current: &dyn std::error::Error = self;
        while let Some(next) = current.source() {
            message.push_str(": ");
            message.push_str(&next.to_string());
            current = next;
        }
        message
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::Io(err.into());
        }
        Error::Syntax {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result type for FSL operations
pub type Result<T> = std::result::Result<T, Error>;
