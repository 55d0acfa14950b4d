use anyhow::{Context, Result, bail};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs an external program as the text generator: the prompt goes to its
/// stdin, the answer is read from its stdout.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandGenerator {
    /// Splits `command` on whitespace into a program and its arguments.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().context("model_command is empty")?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Runs the program once with `prompt` on stdin.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        debug!(program = %self.program, args = ?self.args, "running model command");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("starting `{}`", self.program))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(prompt.as_bytes()) {
                // The program may answer without reading the prompt.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                other => other.with_context(|| format!("writing prompt to `{}`", self.program))?,
            }
        }

        let output = child
            .wait_with_output()
            .with_context(|| format!("waiting for `{}`", self.program))?;
        if !output.status.success() {
            bail!("`{}` exited with status {}", self.program, output.status);
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("`{}` wrote invalid UTF-8", self.program))
    }
}
