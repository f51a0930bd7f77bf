use std::io::{self, Stdout, Write};

use crate::error::{Error, Result};
use crate::parser::{Script, INIT};
use crate::runtime::{Command, Composite, Environment, FrameId, Function, Lookup};

/// FSL evaluator
///
/// Owns the root [`Environment`] shared by every script it evaluates, and the
/// sink `print` writes to. Evaluation is a plain recursive call tree: each
/// command pushes one child frame and pops it when its callee returns.
pub struct Evaluator<W: Write = Stdout> {
    /// Variable and function environment
    env: Environment,
    /// Output sink for `print`
    out: W,
}

impl Evaluator<Stdout> {
    /// Creates an evaluator printing to stdout
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Evaluator<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Evaluator<W> {
    /// Creates an evaluator printing to `out`
    pub fn with_output(out: W) -> Self {
        Evaluator {
            env: Environment::new(),
            out,
        }
    }

    /// The shared environment
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The shared environment, mutably
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The output sink
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Flushes the output sink
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Merge a script into the root frame and run its `init`
    ///
    /// Every function and variable of the script overwrites any binding of the
    /// same name left by earlier scripts, built-ins included.
    pub fn eval_script(&mut self, script: Script) -> Result<()> {
        let root = self.env.root();
        tracing::debug!(
            functions = script.functions.len(),
            variables = script.variables.len(),
            "merging script into root frame"
        );

        for (name, function) in script.functions {
            self.env.define_func(root, name, function);
        }
        for (name, value) in script.variables {
            self.env.define_var(root, name, value);
        }

        let init = self
            .env
            .get_func(root, INIT, Lookup::Local)
            .ok_or(Error::MissingInit)?;
        self.eval_function(&init, root)
    }

    /// Evaluate a function with `frame` as its execution context
    pub fn eval_function(&mut self, function: &Function, frame: FrameId) -> Result<()> {
        match function {
            Function::Composite(composite) => self.eval_composite(composite, frame),
            Function::Builtin(builtin) => builtin.execute(&mut self.env, frame, &mut self.out),
        }
    }

    /// Run each command in order, stopping at the first failure
    fn eval_composite(&mut self, composite: &Composite, frame: FrameId) -> Result<()> {
        for command in &composite.commands {
            self.eval_command(command, frame)
                .map_err(|err| Error::in_function(&composite.name, err))?;
        }
        Ok(())
    }

    /// Evaluate one command called from `caller`
    ///
    /// Arguments are resolved against `caller` before the callee's frame
    /// exists, then bound into that fresh frame by name.
    pub fn eval_command(&mut self, command: &Command, caller: FrameId) -> Result<()> {
        let function = self
            .env
            .get_func(caller, &command.target, Lookup::Chain)
            .ok_or_else(|| Error::UndefinedFunction {
                name: command.target.clone(),
            })?;

        let bindings: Vec<(String, String)> = command
            .arguments
            .iter()
            .map(|arg| (arg.name.clone(), arg.resolve(&self.env, caller)))
            .collect();

        let frame = self.env.push_frame(caller);
        tracing::debug!(
            function = %command.target,
            depth = self.env.depth(),
            builtin = function.is_builtin(),
            "dispatching command"
        );
        for (name, value) in bindings {
            tracing::trace!(name = %name, value = %value, "binding argument");
            self.env.define_var(frame, name, value);
        }

        let result = self.eval_function(&function, frame);
        self.env.pop_frame(frame);
        result
    }
}
