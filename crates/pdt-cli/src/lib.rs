//! Library side of the `pdt` command-line tool.

pub mod logging;
pub mod pipeline;
pub mod types;
