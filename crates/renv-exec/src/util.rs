use std::{
    ffi::OsString,
    io::{self, Write},
    process::{Command, Stdio},
};

use renv_core::Environment;

/// Build a command whose environment is exactly `env`.
///
/// `program` doubles as `argv[0]` and is looked up in `env`'s `PATH`.
pub fn cmd_program(program: &OsString, args: &[OsString], env: Environment) -> Command {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.env_clear();
    cmd.envs(env.into_vars());
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    cmd
}

/// Push out anything buffered before the process image goes away.
pub fn flush_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}
