//! Multi-file runner
//!
//! Scripts run strictly left to right against one evaluator, so later files
//! see, and may override, whatever earlier files declared or computed.

use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::parser::Script;
use crate::runtime::Evaluator;

/// Parse and evaluate each file in order, stopping at the first failure
///
/// Each file is opened, parsed and closed before its `init` runs. The failure
/// is wrapped with the offending file's path.
pub fn run_files<W, P>(evaluator: &mut Evaluator<W>, paths: &[P]) -> Result<()>
where
    W: Write,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "running script");

        Script::from_path(path)
            .and_then(|script| evaluator.eval_script(script))
            .map_err(|err| Error::in_script(path.display().to_string(), err))?;
    }
    Ok(())
}

/// Run `paths` against a fresh evaluator printing to buffered stdout
///
/// Output produced before a failure is flushed either way.
pub fn run<P: AsRef<Path>>(paths: &[P]) -> Result<()> {
    let mut evaluator = Evaluator::with_output(BufWriter::new(io::stdout().lock()));
    let result = run_files(&mut evaluator, paths);
    let flushed = evaluator.flush();
    result.and(flushed)
}
