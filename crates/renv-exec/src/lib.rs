//! Hand the current process over to another program.
//!
//! On unix this is a real `execvp`: same pid, same open descriptors, no
//! parent left behind. Elsewhere the command runs as a child and its exit
//! code is forwarded, which is observably different (new pid, signals are
//! not forwarded).

mod error;
pub use error::{ExecError, ExecResult};

mod util;
pub use util::{cmd_program, flush_std_streams};

mod replace;
pub use replace::replace_process;
