//! gridlink-core - worksheets, links and the command runtime.

pub mod callstack;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod notify;
pub mod sheet;
pub mod storage;
pub mod workbook;

pub use callstack::CallStack;
pub use commands::{CommandBehavior, CommandRegistry};
pub use config::{Config, Limits, LogConfig};
pub use error::{ErrorKind, GridlinkError, Result};
pub use interpreter::{Action, Instruction, Interpreter};
pub use notify::{CollectingNotifier, LogNotifier, Notifier};
pub use sheet::{DataStore, Sheet, WorksheetRegistry};
pub use storage::SheetFile;
pub use workbook::{LinkAttributes, LinkGraph, LinkSet, Workbook, Worksheet};

pub use gridlink_engine::engine::{Arguments, CellRef, Command, Reference};

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> Workbook {
        let mut wb = Workbook::default();
        let raw = wb.add_worksheet("raw", "Raw").unwrap();
        raw.sheet
            .put_at(CellRef::new(2, 2), Some("foofoo".into()), false);
        raw.sheet.put_at(CellRef::new(3, 3), Some("ok".into()), false);
        wb.add_worksheet("report", "Report").unwrap();
        wb
    }

    #[test]
    fn test_link_then_copy_between_worksheets() {
        let mut wb = budget();
        let notifier = CollectingNotifier::new();
        let registry = CommandRegistry::with_builtins();
        wb.link("raw", "report", &notifier).unwrap();

        let interpreter = Interpreter::new(&registry, &notifier);
        let action = interpreter
            .interpret(&Instruction::new("raw!C3:D4", "report!A1", "replace(foo:bar)"))
            .unwrap();
        action.invoke(&mut wb).unwrap();

        let report = &wb.worksheet("report").unwrap().sheet;
        assert_eq!(report.get_at(CellRef::new(0, 0)).as_deref(), Some("barbar"));
        assert_eq!(report.get_at(CellRef::new(1, 1)).as_deref(), Some("ok"));
        assert_eq!(report.get_at(CellRef::new(1, 0)), None);
        assert_eq!(report.render_count(), 1);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_call_stack_on_workbook() {
        let mut wb = budget();
        let notifier = CollectingNotifier::new();
        let registry = CommandRegistry::with_builtins();
        let interpreter = Interpreter::new(&registry, &notifier);

        let mut stack = CallStack::new();
        stack.push(("raw!C3", "report!A1", "copy()"));
        stack.push(("report!A1", "report!A2", "replace(foo:x)"));

        assert_eq!(stack.run_all(&interpreter, &mut wb).unwrap(), 2);
        let report = &wb.worksheet("report").unwrap().sheet;
        assert_eq!(report.get_at(CellRef::new(0, 1)).as_deref(), Some("xx"));
    }

    #[test]
    fn test_failures_are_reported_and_classified() {
        let mut wb = budget();
        let notifier = CollectingNotifier::new();
        let registry = CommandRegistry::with_builtins();
        let interpreter = Interpreter::new(&registry, &notifier);

        let err = interpreter
            .interpret(&Instruction::new("raw!c3", "report!A1", "copy()"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);

        let action = interpreter
            .interpret(&Instruction::new("raw!C3", "gone!A1", "copy()"))
            .unwrap();
        let err = action.invoke(&mut wb).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingEndpoint);

        assert_eq!(notifier.messages().len(), 1);
        assert!(wb.worksheet("report").unwrap().sheet.is_empty());
    }
}
