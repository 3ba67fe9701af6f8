//! Route graph model and loader.
//!
//! The graph is produced by an upstream parser and handed to the generator as
//! plain data. `load_graph` accepts the serialized form (YAML or JSON).

mod load;
mod types;

pub use load::*;
pub use types::*;
