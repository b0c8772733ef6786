//! Ordered batches of instructions.
//!
//! A batch is all-or-nothing at construction: every instruction is
//! interpreted before any runs, and one bad instruction abandons the batch.
//! Execution then runs actions one at a time and stops at the first error.

use crate::error::Result;
use crate::interpreter::{Action, Instruction, Interpreter};
use crate::sheet::WorksheetRegistry;

#[derive(Debug, Clone, Default)]
pub struct CallStack {
    instructions: Vec<Instruction>,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: impl Into<Instruction>) {
        self.instructions.push(instruction.into());
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Interpret every instruction without touching any worksheet.
    pub fn prepare<'r>(&self, interpreter: &Interpreter<'r>) -> Result<Vec<Action<'r>>> {
        self.instructions
            .iter()
            .map(|instruction| interpreter.interpret(instruction))
            .collect()
    }

    /// Prepare the batch, then invoke each action in order.
    /// Returns the number of actions executed.
    pub fn run_all(
        &self,
        interpreter: &Interpreter<'_>,
        sheets: &mut dyn WorksheetRegistry,
    ) -> Result<usize> {
        let actions = self.prepare(interpreter)?;
        for (index, action) in actions.iter().enumerate() {
            if let Err(err) = action.invoke(sheets) {
                tracing::warn!(
                    index,
                    command = action.name(),
                    error = %err,
                    "call stack stopped"
                );
                return Err(err);
            }
        }
        tracing::debug!(executed = actions.len(), "call stack finished");
        Ok(actions.len())
    }
}

impl FromIterator<Instruction> for CallStack {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        CallStack {
            instructions: iter.into_iter().collect(),
        }
    }
}
