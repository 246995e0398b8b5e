use hydra::{driver::memory::ResultSet, Command, Cursor, Result};
use std::{cell::RefCell, fmt, rc::Rc};

/// Records every command a test executes, by label.
#[derive(Clone, Default)]
pub struct ExecLog {
    commands: Rc<RefCell<Vec<String>>>,
}

/// A labelled in-memory command that records each execution.
pub struct LoggedCommand {
    label: String,
    rows: ResultSet,
    log: ExecLog,
}

impl ExecLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&self, label: impl Into<String>, rows: ResultSet) -> LoggedCommand {
        LoggedCommand {
            label: label.into(),
            rows,
            log: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }

    /// Number of executions whose label starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|label| label.starts_with(prefix))
            .count()
    }

    /// Remove and return the first label in the log
    #[track_caller]
    pub fn pop(&self) -> String {
        let mut commands = self.commands.borrow_mut();
        if commands.is_empty() {
            panic!("no commands in log");
        }
        commands.remove(0)
    }
}

impl fmt::Debug for ExecLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecLog")
            .field("commands", &*self.commands.borrow())
            .finish()
    }
}

impl Command for LoggedCommand {
    fn execute(&mut self) -> Result<Box<dyn Cursor + '_>> {
        self.log.commands.borrow_mut().push(self.label.clone());
        self.rows.execute()
    }
}
