use crate::error::RuleError;

/// The external command interpreter on the federation server.
///
/// Implementations own the transport (remote shell, local process, test double) and
/// return the command's standard output. A failing command is reported as
/// `RuleError::Command` carrying whatever the interpreter wrote to its error stream.
pub trait CommandExecutor {
    fn execute(&self, command: &str) -> Result<String, RuleError>;
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn execute(&self, command: &str) -> Result<String, RuleError> {
        (**self).execute(command)
    }
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for Box<T> {
    fn execute(&self, command: &str) -> Result<String, RuleError> {
        (**self).execute(command)
    }
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for std::sync::Arc<T> {
    fn execute(&self, command: &str) -> Result<String, RuleError> {
        (**self).execute(command)
    }
}
