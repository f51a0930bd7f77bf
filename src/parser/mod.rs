//! FSL Parser Module
//!
//! Turns a JSON script document into a [`Script`]: composite functions,
//! numeric variables and the pre-seeded built-ins.

mod script;

pub use script::{Script, INIT};
