use log::debug;
use std::{fs, io, path::Path};
use walkdir::WalkDir;

fn copy_from_to(from: &Path, to: &Path, is_dir: bool) -> io::Result<()> {
    if is_dir {
        if to.exists() && !to.is_dir() {
            fs::remove_file(to)?;
        }
        if !to.exists() {
            fs::create_dir(to)?;
        }
    } else {
        if to.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("'{}' is a directory", to.to_string_lossy()),
            ));
        }
        fs::copy(from, to)?;
    }
    Ok(())
}

/// Copies the file or directory at `from` to `to`.
///
/// Directories are copied recursively, merging into `to` if it already
/// exists: files of the same name are replaced, other files are left
/// alone. A file standing where a directory goes is replaced, but a
/// directory is never replaced by a file; that is an error. Missing
/// parents of `to` are created.
pub fn copy_path(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    if !from.is_dir() {
        debug!("Copying file {} to {}", from.display(), to.display());
        return copy_from_to(from, to, false);
    }

    // Entries come out parents-first, so each directory exists before
    // anything is copied into it. Symlinks are copied by content.
    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = to.join(relative);
        debug!("Copying {} to {}", entry.path().display(), target.display());
        copy_from_to(entry.path(), &target, entry.file_type().is_dir())?;
    }
    Ok(())
}

/// Removes the file or directory tree at `path`.
pub fn remove_path(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copies_a_single_file() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a.txt");
        fs::write(&from, "hello").unwrap();

        let to = tmp.path().join("nested").join("b.txt");
        copy_path(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(&to).unwrap(), "hello");
    }

    #[test]
    fn copies_a_tree_including_empty_dirs() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("src");
        fs::create_dir_all(from.join("sub").join("deeper")).unwrap();
        fs::create_dir(from.join("empty")).unwrap();
        fs::write(from.join("top.txt"), "top").unwrap();
        fs::write(from.join("sub").join("deeper").join("leaf.txt"), "leaf").unwrap();

        let to = tmp.path().join("dst");
        copy_path(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(to.join("sub").join("deeper").join("leaf.txt")).unwrap(),
            "leaf"
        );
        assert!(to.join("empty").is_dir());
    }

    #[test]
    fn merges_into_existing_directory() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("src");
        fs::create_dir(&from).unwrap();
        fs::write(from.join("shared.txt"), "new").unwrap();

        let to = tmp.path().join("dst");
        fs::create_dir(&to).unwrap();
        fs::write(to.join("shared.txt"), "old").unwrap();
        fs::write(to.join("mine.txt"), "keep").unwrap();

        copy_path(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("shared.txt")).unwrap(), "new");
        assert_eq!(fs::read_to_string(to.join("mine.txt")).unwrap(), "keep");
    }

    #[test]
    fn file_never_replaces_directory() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("a.txt");
        fs::write(&from, "file").unwrap();
        let to = tmp.path().join("dst");
        fs::create_dir(&to).unwrap();
        fs::write(to.join("inner"), "x").unwrap();

        let err = copy_path(&from, &to).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(to.is_dir());
        assert_eq!(fs::read_to_string(to.join("inner")).unwrap(), "x");
    }

    #[test]
    fn directory_replaces_file() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("src");
        fs::create_dir(&from).unwrap();
        fs::write(from.join("a"), "a").unwrap();
        let to = tmp.path().join("dst");
        fs::write(&to, "plain file").unwrap();

        copy_path(&from, &to).unwrap();

        assert_eq!(fs::read_to_string(to.join("a")).unwrap(), "a");
    }

    #[test]
    fn removes_files_and_trees() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f");
        fs::write(&file, "").unwrap();
        let dir = tmp.path().join("d");
        fs::create_dir_all(dir.join("x")).unwrap();

        remove_path(&file).unwrap();
        remove_path(&dir).unwrap();

        assert!(!file.exists());
        assert!(!dir.exists());
        assert!(remove_path(&file).is_err());
    }
}
