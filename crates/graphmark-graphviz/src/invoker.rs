//! External renderer invocation.
//!
//! Spawns a graphviz program as `<program> <args...> -T <format>`, feeds it
//! the graph source on stdin and collects the raw image bytes from stdout.
//! Diagnostics arrive on stderr and a nonzero exit status signals failure.

use std::io::{self, Write};
use std::process::{Child, Command, Stdio};

/// One render invocation: program, extra arguments, graph source, `-T` token.
///
/// Created per matched block and consumed immediately.
#[derive(Debug)]
pub struct RenderRequest<'a> {
    /// Program name resolved via `PATH` (e.g. `dot`, `neato`).
    pub program: &'a str,
    /// Extra command-line arguments inserted before `-T <format>`.
    pub args: &'a [String],
    /// Graph description written to the program's stdin as UTF-8.
    pub source: &'a str,
    /// Output format token passed as `-T <format>`.
    pub format: &'a str,
}

/// Error from a render invocation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The child process could not be created.
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// Unexpected I/O failure while feeding or draining the child.
    #[error("i/o error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The program exited nonzero; `stderr` carries its diagnostics.
    #[error("{program} exited with error:\n[stderr]\n{stderr}")]
    Render { program: String, stderr: String },
}

/// Runs an external rendering program and returns its raw output bytes.
///
/// The trait seam exists so rule tests can substitute a stub instead of
/// spawning real processes.
pub trait ProcessInvoker {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, RenderError>;
}

/// Outcome of writing the graph source to the child's stdin.
///
/// Graphviz may close its end of the pipe before reading everything (it does
/// so on syntax errors); that is not fatal — the diagnostics we want are on
/// stderr. Both branches are explicit so tests can exercise each.
enum StdinOutcome {
    /// The full source was delivered.
    Delivered,
    /// The child closed stdin early; fall back to draining its output.
    PipeClosed,
}

/// [`ProcessInvoker`] backed by [`std::process::Command`].
///
/// Spawns exactly one child per call and blocks until it exits, draining
/// stdout and stderr completely. No process or pipe outlives the call.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandInvoker;

impl CommandInvoker {
    /// Create a new invoker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProcessInvoker for CommandInvoker {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, RenderError> {
        let mut command = Command::new(request.program);
        command
            .args(request.args)
            .arg("-T")
            .arg(request.format)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Graphviz on Windows would otherwise flash a console window.
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        tracing::debug!(program = %request.program, format = %request.format, "spawning renderer");
        let mut child = command.spawn().map_err(|source| RenderError::Spawn {
            program: request.program.to_owned(),
            source,
        })?;

        match feed_stdin(&mut child, request.source) {
            Ok(StdinOutcome::Delivered) => {}
            Ok(StdinOutcome::PipeClosed) => {
                tracing::debug!(
                    program = %request.program,
                    "renderer closed stdin early, draining its output"
                );
            }
            Err(source) => {
                // Reap the child so no process outlives the call.
                let _ = child.kill();
                let _ = child.wait();
                return Err(RenderError::Io {
                    program: request.program.to_owned(),
                    source,
                });
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| RenderError::Io {
                program: request.program.to_owned(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(RenderError::Render {
                program: request.program.to_owned(),
                stderr,
            });
        }

        Ok(output.stdout)
    }
}

/// Write the graph source to the child's stdin, tolerating an early close.
///
/// The stdin handle is dropped on every path, closing the pipe before the
/// caller waits on the child.
fn feed_stdin(child: &mut Child, source: &str) -> io::Result<StdinOutcome> {
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(StdinOutcome::Delivered);
    };
    match stdin.write_all(source.as_bytes()) {
        Ok(()) => Ok(StdinOutcome::Delivered),
        Err(e) if matches!(e.kind(), io::ErrorKind::BrokenPipe | io::ErrorKind::InvalidInput) => {
            Ok(StdinOutcome::PipeClosed)
        }
        Err(e) => Err(e),
    }
}
