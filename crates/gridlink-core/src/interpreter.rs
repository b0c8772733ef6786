//! Turns `(source, target, command)` instructions into deferred actions.
//!
//! Building an action only parses and validates; no worksheet is read or
//! written until [`Action::invoke`]. Any failure is reported through the
//! [`Notifier`] and no action is produced.

use crate::commands::CommandRegistry;
use crate::error::{GridlinkError, Result};
use crate::notify::Notifier;
use crate::sheet::WorksheetRegistry;
use gridlink_engine::engine::{Arguments, Command, Reference, interpret_command, interpret_reference};
use std::fmt;

/// One data-movement request, in `[source, target, command]` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub source: String,
    pub target: String,
    pub command: String,
}

impl Instruction {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Instruction {
            source: source.into(),
            target: target.into(),
            command: command.into(),
        }
    }
}

impl<S: Into<String>, T: Into<String>, C: Into<String>> From<(S, T, C)> for Instruction {
    fn from((source, target, command): (S, T, C)) -> Self {
        Instruction::new(source, target, command)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} : {}", self.source, self.target, self.command)
    }
}

pub struct Interpreter<'r> {
    registry: &'r CommandRegistry,
    notifier: &'r dyn Notifier,
}

impl<'r> Interpreter<'r> {
    pub fn new(registry: &'r CommandRegistry, notifier: &'r dyn Notifier) -> Self {
        Interpreter { registry, notifier }
    }

    pub fn registry(&self) -> &'r CommandRegistry {
        self.registry
    }

    /// Parse the command, then the source, then the target. The first failure
    /// is reported and returned.
    pub fn interpret(&self, instruction: &Instruction) -> Result<Action<'r>> {
        self.build(instruction).inspect_err(|err| {
            self.notifier.report(&err.to_string());
        })
    }

    fn build(&self, instruction: &Instruction) -> Result<Action<'r>> {
        let Command { name, args } = interpret_command(&instruction.command)?;
        if !self.registry.contains(&name) {
            return Err(unknown_command(&instruction.command, &name));
        }
        let source = interpret_reference(&instruction.source)?;
        let target = interpret_reference(&instruction.target)?;

        Ok(Action {
            registry: self.registry,
            name,
            source,
            target,
            args,
        })
    }
}

/// A validated instruction waiting to run.
#[derive(Debug, Clone)]
pub struct Action<'r> {
    registry: &'r CommandRegistry,
    name: String,
    source: Reference,
    target: Reference,
    args: Arguments,
}

impl Action<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &Reference {
        &self.source
    }

    pub fn target(&self) -> &Reference {
        &self.target
    }

    pub fn args(&self) -> &Arguments {
        &self.args
    }

    /// Look the command up and run it against `sheets`.
    pub fn invoke(&self, sheets: &mut dyn WorksheetRegistry) -> Result<()> {
        let behavior = self
            .registry
            .get(&self.name)
            .ok_or_else(|| unknown_command(&self.name, &self.name))?;
        tracing::debug!(
            command = %self.name,
            source = %self.source,
            target = %self.target,
            "invoking action"
        );
        behavior.execute(sheets, &self.source, &self.target, &self.args)
    }
}

fn unknown_command(input: &str, name: &str) -> GridlinkError {
    GridlinkError::Semantic {
        input: input.to_string(),
        message: format!("unknown command {}", name),
    }
}
