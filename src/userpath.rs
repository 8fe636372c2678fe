use colored::Colorize;
use shellexpand::LookupError;
use std::{env::VarError, io, path::PathBuf, str::FromStr};

/// An existing directory given on the command line, with `~` and
/// environment variables expanded and the path canonicalized.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDir {
    pub path_buf: PathBuf,
}

#[derive(Debug)]
pub enum UserPathErr {
    ShellExpandError(LookupError<VarError>),
    CanonicalizeError(io::Error),
    NotDirectory,
}

impl From<LookupError<VarError>> for UserPathErr {
    fn from(err: LookupError<VarError>) -> Self {
        Self::ShellExpandError(err)
    }
}

impl From<io::Error> for UserPathErr {
    fn from(err: io::Error) -> Self {
        Self::CanonicalizeError(err)
    }
}

impl std::fmt::Debug for UserDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.path_buf.fmt(f)
    }
}

impl FromStr for UserDir {
    type Err = UserPathErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path_buf = expand(s)?.canonicalize()?;
        if !path_buf.is_dir() {
            return Err(UserPathErr::NotDirectory);
        }
        Ok(UserDir { path_buf })
    }
}

impl std::fmt::Display for UserDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_buf.to_string_lossy())
    }
}

/// Expands `~` and environment variables and makes the result absolute
/// against the current directory. The path does not need to exist.
pub fn expand(path: &str) -> Result<PathBuf, UserPathErr> {
    let expanded = PathBuf::from(shellexpand::full(path)?.as_ref());
    if expanded.is_absolute() {
        return Ok(expanded);
    }
    Ok(std::env::current_dir()?.join(expanded))
}

/// Tries to convert a given user path (as a string slice) to a `UserDir`.
/// If it fails, returns an error message.
pub fn to_user_path(path: &str) -> Result<UserDir, String> {
    UserDir::from_str(path).map_err(|e| describe(path, e))
}

/// Like `to_user_path`, for paths that may not exist yet.
pub fn to_new_path(path: &str) -> Result<PathBuf, String> {
    expand(path).map_err(|e| describe(path, e))
}

fn describe(path: &str, err: UserPathErr) -> String {
    match err {
        UserPathErr::ShellExpandError(e) => {
            format!(
                "{}\n{}",
                "Error resolving the given path:".red(),
                e.to_string().red()
            )
        }
        UserPathErr::CanonicalizeError(e) => match e.kind() {
            io::ErrorKind::NotFound => format!("{} does not exist.", path),
            io::ErrorKind::PermissionDenied => format!("Permission denied for {}", path),
            _ => format!("{}", e),
        },
        UserPathErr::NotDirectory => {
            format!("{} is not a directory.", path)
        }
    }
}
