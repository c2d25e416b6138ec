use colored::Colorize;
use shellexpand::LookupError;
use std::{env::VarError, io, path::PathBuf, str::FromStr};

/// A path as typed by the user, with `~` and environment variables
/// expanded. The path need not exist.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPath {
    pub path_buf: PathBuf,
}

/// An existing, canonicalized directory given by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct UserDir {
    pub path_buf: PathBuf,
}

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

impl std::fmt::Debug for UserPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.path_buf, f)
    }
}

impl std::fmt::Debug for UserDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.path_buf, f)
    }
}

impl FromStr for UserPath {
    type Err = UserPathErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expanded = shellexpand::full(s)?;
        Ok(UserPath {
            path_buf: PathBuf::from(expanded.into_owned()),
        })
    }
}

impl FromStr for UserDir {
    type Err = UserPathErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path_buf = UserPath::from_str(s)?.path_buf.canonicalize()?;
        if !path_buf.is_dir() {
            return Err(UserPathErr::NotDirectory);
        }
        Ok(UserDir { path_buf })
    }
}

fn describe(path: &str, e: UserPathErr) -> String {
    match e {
        UserPathErr::ShellExpandError(e) => {
            format!(
                "{}\n{}",
                "Error resolving the given path:".red(),
                e.to_string().red()
            )
        }
        UserPathErr::CanonicalizeError(e) => match e.kind() {
            std::io::ErrorKind::NotFound => format!("{} does not exist.", path),
            std::io::ErrorKind::PermissionDenied => format!("Permission denied for {}", path),
            _ => format!("{}", e),
        },
        UserPathErr::NotDirectory => {
            format!("{} is not a directory.", path)
        }
    }
}

/// Tries to convert a given user path (as a string slice) to a `UserPath`.
/// If it fails, returns an error message.
pub fn to_user_path(path: &str) -> Result<UserPath, String> {
    UserPath::from_str(path).map_err(|e| describe(path, e))
}

/// Tries to convert a given user path (as a string slice) to an existing
/// `UserDir`. If it fails, returns an error message.
pub fn to_user_dir(path: &str) -> Result<UserDir, String> {
    UserDir::from_str(path).map_err(|e| describe(path, e))
}
