pub mod format;
mod io;

pub use format::{format_distance, format_execution_time};
pub use io::{Args, enumerate_input_files};
pub use clap::Parser;
