//! Helpers shared by the binaries.
//!
//! - **`cli`**: arguments common to the sweep runners (sizes, working directory,
//!   driver path).
//! - **`grid_io`**: the whitespace-separated text format the solver programs
//!   write (`output.txt`, `output2.txt`).
//! - **`process`**: blocking invocation of those programs with timing.
//! - **`perf`**: peak resident set size on Linux.

pub mod cli;
pub mod grid_io;
pub mod perf;
pub mod process;
