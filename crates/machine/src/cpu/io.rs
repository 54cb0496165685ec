//! Machine I/O port.
//!
//! The extended and RS sets expose prompt-style input and text output. The
//! port is a trait seam so the CPU never talks to a console directly: the
//! default implementation uses stdin/stdout, embedding hosts supply their
//! own, and tests script the exchange.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::common::{ExecError, ExecErrorKind};

/// The machine's I/O port.
pub trait MachineIo {
    /// Prompts for one line of input and returns it without the trailing
    /// newline.
    fn input(&mut self, prompt: &str) -> Result<String, ExecError>;

    /// Writes a piece of output text.
    fn output(&mut self, text: &str);
}

/// Standard-stream I/O port: prompts on stdout, reads lines from stdin.
#[derive(Debug, Default)]
pub struct StdIo;

impl MachineIo for StdIo {
    fn input(&mut self, prompt: &str) -> Result<String, ExecError> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|err| ExecError::new(ExecErrorKind::Io { reason: err.to_string() }))?;
        if read == 0 {
            return Err(ExecError::new(ExecErrorKind::Io {
                reason: "input stream closed".to_string(),
            }));
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    fn output(&mut self, text: &str) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Scripted I/O port for tests and non-interactive drivers: input lines are
/// consumed from a queue, output is captured.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    /// Captured output fragments, in emission order.
    pub output: Vec<String>,
}

impl ScriptedIo {
    /// Creates a scripted port with the given queued input lines.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// All captured output joined into one string.
    pub fn captured(&self) -> String {
        self.output.concat()
    }
}

impl MachineIo for ScriptedIo {
    fn input(&mut self, _prompt: &str) -> Result<String, ExecError> {
        self.inputs.pop_front().ok_or_else(|| {
            ExecError::new(ExecErrorKind::Io {
                reason: "script ran out of input lines".to_string(),
            })
        })
    }

    fn output(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

// A shared handle lets the driver keep reading captured output while the
// machine owns its half of the port.
impl MachineIo for std::rc::Rc<std::cell::RefCell<ScriptedIo>> {
    fn input(&mut self, prompt: &str) -> Result<String, ExecError> {
        self.borrow_mut().input(prompt)
    }

    fn output(&mut self, text: &str) {
        self.borrow_mut().output(text);
    }
}
