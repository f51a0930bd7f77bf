//! Standard library built-ins for FSL

pub mod io;
pub mod math;
pub mod variables;

use crate::tools::FunctionTable;

/// Register all standard library built-ins
pub fn register_all(table: &mut FunctionTable) {
    variables::register(table);
    io::register(table);
    math::register(table);
}
