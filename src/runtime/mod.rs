//! Runtime execution for FSL scripts: environment, arguments, dispatch

mod argument;
mod command;
mod environment;
mod evaluator;
mod function;
pub mod value;

pub use argument::{Argument, ArgumentValue, PARAM_SIGIL, REF_SIGIL};
pub use command::Command;
pub use environment::{Environment, FrameId, Lookup};
pub use evaluator::Evaluator;
pub use function::{Composite, Function};
