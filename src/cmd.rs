use crate::store::StoreError;
use colored::Colorize;

pub mod add;
pub mod copy;
pub mod delete;
pub mod list;
pub mod update;

/// The process exit code reporting `err`.
pub fn exit_code(err: &StoreError) -> i32 {
    match err {
        StoreError::InvalidName(_)
        | StoreError::NotFound(_)
        | StoreError::AlreadyExists(_)
        | StoreError::SourceMissing(_)
        | StoreError::DestinationExists(_)
        | StoreError::CopyIntoTemplate(_, _)
        | StoreError::EmptyDescription => exitcode::USAGE,
        StoreError::RootMissing(_) => exitcode::CONFIG,
        StoreError::Io(_, _) => exitcode::IOERR,
        StoreError::Descriptions(_, _) => exitcode::DATAERR,
    }
}

/// Reports `err` to the user and exits.
pub fn fail(err: StoreError) -> ! {
    eprintln!("{}", err.to_string().red());
    match &err {
        StoreError::NotFound(_) => eprintln!(
            "{}{}{}",
            "Call ".dimmed(),
            "tpl --list".yellow(),
            " to list existing templates.".dimmed()
        ),
        StoreError::AlreadyExists(_) | StoreError::DestinationExists(_) => eprintln!(
            "{}{}{}",
            "Pass ".dimmed(),
            "--overwrite".yellow(),
            " to replace it.".dimmed()
        ),
        _ => {}
    }
    std::process::exit(exit_code(&err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn user_mistakes_are_usage_errors() {
        assert_eq!(exit_code(&StoreError::NotFound("x".into())), exitcode::USAGE);
        assert_eq!(exit_code(&StoreError::EmptyDescription), exitcode::USAGE);
        assert_eq!(
            exit_code(&StoreError::DestinationExists(PathBuf::from("x"))),
            exitcode::USAGE
        );
    }

    #[test]
    fn filesystem_failures_are_io_errors() {
        let err = StoreError::Io(io::Error::new(io::ErrorKind::Other, "boom"), PathBuf::new());
        assert_eq!(exit_code(&err), exitcode::IOERR);
    }
}
