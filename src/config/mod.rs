//! Configuration for kiln.

mod settings;

pub use settings::*;
