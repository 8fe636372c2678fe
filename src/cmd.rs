pub mod add;
pub mod edit;
pub mod filters;
pub mod list;
pub mod make;
pub mod new;
pub mod remove;
pub mod scenes;
pub mod templates;
pub mod transfer;
pub mod tree;

use colored::Colorize;
use projman::Error;

/// Prints `err` with a hint where there is one, and exits with a code
/// matching its kind.
pub fn exit_with(err: Error) -> ! {
    eprintln!("{}", err.to_string().red());
    let code = match &err {
        Error::NotFound { .. } => {
            eprintln!(
                "{} {}{}",
                "You can list existing templates with".dimmed(),
                "projman templates".yellow(),
                ".".dimmed()
            );
            exitcode::USAGE
        }
        Error::InvalidPath { .. } | Error::InvalidNode { .. } => exitcode::USAGE,
        Error::InvalidMarker { .. } => {
            eprintln!(
                "{}",
                "Fix or delete the .luxproject file, then try again.".dimmed()
            );
            exitcode::DATAERR
        }
        Error::Malformed { .. } => exitcode::DATAERR,
        Error::Io { .. } => exitcode::IOERR,
    };
    std::process::exit(code)
}

pub trait OrExit<T> {
    fn or_exit(self) -> T;
}

impl<T> OrExit<T> for projman::Result<T> {
    fn or_exit(self) -> T {
        self.unwrap_or_else(|err| exit_with(err))
    }
}
