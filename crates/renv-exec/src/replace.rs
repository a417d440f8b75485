use std::{convert::Infallible, ffi::OsString, process::Command};

use tracing::debug;

use renv_core::Environment;

use crate::{
    error::{ExecError, ExecResult},
    util::{cmd_program, flush_std_streams},
};

/// Replace the current process with `cmd`, running under exactly `env`.
///
/// Only returns on failure.
pub fn replace_process(cmd: &[OsString], env: Environment) -> ExecResult<Infallible> {
    let (program, args) = cmd.split_first().ok_or(ExecError::MissingProgram)?;
    let name = program.to_string_lossy().into_owned();

    debug!(target: "renv.exec", program = %name, ?args, vars = env.len(), "exec");
    let command = cmd_program(program, args, env);
    flush_std_streams();

    hand_over(command, name)
}

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        fn hand_over(mut command: Command, name: String) -> ExecResult<Infallible> {
            use std::os::unix::process::CommandExt as _;
            let err = command.exec();
            Err(ExecError::from_io(name, err))
        }
    } else {
        fn hand_over(mut command: Command, name: String) -> ExecResult<Infallible> {
            let status = command
                .status()
                .map_err(|e| ExecError::from_io(name.as_str(), e))?;
            debug!(target: "renv.exec", program = %name, ?status, "child exited");
            flush_std_streams();
            std::process::exit(status.code().unwrap_or(1))
        }
    }
}
