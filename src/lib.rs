//! # FSL - a JSON function scripting language
//!
//! FSL scripts are JSON documents declaring numeric variables and functions.
//! A function is a list of commands; a command names the function it calls
//! and binds named arguments. Execution starts at the mandatory `init`
//! function.
//!
//! ```json
//! {
//!   "var1": 1,
//!   "init": [
//!     {"cmd": "#setup"},
//!     {"cmd": "print", "value": "#var1"}
//!   ],
//!   "setup": [
//!     {"cmd": "add", "id": "var1", "operand1": "#var1", "operand2": 2}
//!   ]
//! }
//! ```
//!
//! ## Arguments
//!
//! - `"literal"` - passed as is
//! - `"$name"` - variable `name` of the calling frame only
//! - `"#name"` - variable `name` searched from the calling frame up to the root
//!
//! Unbound references resolve to the text `undefined`.
//!
//! ## Built-in Functions
//!
//! - `create(id, value)`, `update(id, value)`, `delete(id)`
//! - `print(value)` - numbers are printed with 4 decimals
//! - `add`, `sub`, `mul`, `div` `(id, operand1, operand2)` - the result is
//!   stored with 6 decimals
//!
//! ## Basic Usage
//!
//! ```rust
//! use fsl::{Evaluator, Lookup, Script};
//!
//! # fn main() -> fsl::Result<()> {
//! let script: Script = r#"{
//!     "init": [{"cmd": "add", "id": "y", "operand1": 3, "operand2": 4}]
//! }"#.parse()?;
//!
//! let mut evaluator = Evaluator::with_output(Vec::new());
//! evaluator.eval_script(script)?;
//!
//! let env = evaluator.env();
//! assert_eq!(env.get_var(env.root(), "y", Lookup::Local), Some("7.000000"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! JSON file → Script (parser) → Evaluator ─┬→ Composite → Command → child frame → ...
//!                                           └→ Builtin (tools)
//! ```
//!
//! - [`Environment`] - arena of frames linked to their parents
//! - [`Argument`] - literal, `$param` or `#ref` argument
//! - [`Function`] - composite or built-in
//! - [`Evaluator`] - owns the shared root environment and dispatches commands
//! - [`engine`] - runs several script files against one evaluator

pub mod engine;
pub mod error;
pub mod parser;
pub mod runtime;
pub mod tools;

// Re-export main types
pub use error::{Error, ErrorKind, Result};
pub use parser::Script;
pub use runtime::{
    Argument, ArgumentValue, Command, Composite, Environment, Evaluator, FrameId, Function, Lookup,
};
pub use tools::Builtin;
