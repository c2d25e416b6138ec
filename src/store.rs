use crate::{
    config::Config,
    copy,
    descriptions::Descriptions,
    template::{self, Template},
};
use log::{debug, info};
use std::{
    fmt::Display,
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum StoreError {
    InvalidName(String),
    NotFound(String),
    AlreadyExists(String),
    SourceMissing(PathBuf),
    DestinationExists(PathBuf),
    CopyIntoTemplate(String, PathBuf),
    EmptyDescription,
    RootMissing(PathBuf),
    Io(io::Error, PathBuf),
    Descriptions(serde_json::Error, PathBuf),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidName(name) => write!(
                f,
                "\"{}\" is not a valid template name.\n\
                Template names are a single file or directory name.",
                name
            ),
            StoreError::NotFound(name) => write!(f, "Template \"{}\" does not exist", name),
            StoreError::AlreadyExists(name) => {
                write!(f, "Template \"{}\" already exists", name)
            }
            StoreError::SourceMissing(path) => {
                write!(f, "File \"{}\" does not exist", path.to_string_lossy())
            }
            StoreError::DestinationExists(path) => {
                write!(f, "\"{}\" already exists", path.to_string_lossy())
            }
            StoreError::CopyIntoTemplate(name, path) => write!(
                f,
                "Cannot copy template \"{}\" onto itself ('{}')",
                name,
                path.to_string_lossy()
            ),
            StoreError::EmptyDescription => write!(f, "Please provide a description"),
            StoreError::RootMissing(path) => write!(
                f,
                "The template directory ('{}') does not exist",
                path.to_string_lossy()
            ),
            StoreError::Io(e, path) => write!(f, "Error accessing '{}': {}", path.to_string_lossy(), e),
            StoreError::Descriptions(e, path) => write!(
                f,
                "Error reading or writing the description file: {}\n\
                You can attempt to fix the file manually, or delete it \
                (you will lose all template descriptions).\n\
                The description file can be found in '{}'",
                e,
                path.to_string_lossy()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e, _) => Some(e),
            StoreError::Descriptions(e, _) => Some(e),
            _ => None,
        }
    }
}

/// The template root, with one template per top-level entry, and its
/// description file.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(config: &Config) -> Self {
        TemplateStore {
            root: config.template_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path at which the template `name` is (or would be) stored.
    pub fn path_of(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !template::is_valid_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name)
            .map_or(false, |p| fs::symlink_metadata(p).is_ok())
    }

    /// Path of an existing template.
    fn existing(&self, name: &str) -> Result<PathBuf, StoreError> {
        let path = self.path_of(name)?;
        if !self.exists(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(path)
    }

    /// Lists the templates in the root, sorted by name.
    pub fn list(&self) -> Result<Vec<Template>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::RootMissing(self.root.clone()));
        }
        let items = fs::read_dir(&self.root).map_err(|e| StoreError::Io(e, self.root.clone()))?;
        let mut names = Vec::new();
        for item in items {
            let item = item.map_err(|e| StoreError::Io(e, self.root.clone()))?;
            let name = item.file_name().to_string_lossy().to_string();
            if !template::is_ignored(&name) {
                names.push(name);
            }
        }
        names.sort();

        let descriptions = Descriptions::load(&self.root)?;
        Ok(names
            .into_iter()
            .map(|name| Template {
                description: descriptions.get(&name).map(str::to_string),
                name,
            })
            .collect())
    }

    /// Copies `src` into the store as `name`. With `overwrite`, an
    /// existing template of that name is replaced entirely.
    pub fn add(
        &self,
        src: &Path,
        name: &str,
        description: &str,
        overwrite: bool,
    ) -> Result<(), StoreError> {
        let destination = self.path_of(name)?;
        if !src.exists() {
            return Err(StoreError::SourceMissing(src.to_path_buf()));
        }
        if self.exists(name) {
            // Re-adding a template onto itself would delete it before copying.
            if !overwrite || src.canonicalize().ok() == destination.canonicalize().ok() {
                return Err(StoreError::AlreadyExists(name.to_string()));
            }
            debug!("Replacing existing template {}", name);
            copy::remove_path(&destination).map_err(|e| StoreError::Io(e, destination.clone()))?;
        }

        copy::copy_path(src, &destination).map_err(|e| StoreError::Io(e, destination.clone()))?;
        info!("Added {} as template {}", src.display(), name);

        if !description.is_empty() {
            self.update_description(name, description)?;
        }
        Ok(())
    }

    pub fn update_description(&self, name: &str, description: &str) -> Result<(), StoreError> {
        self.existing(name)?;
        if description.trim().is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        let mut descriptions = Descriptions::load(&self.root)?;
        descriptions.set(name, description);
        descriptions.save()?;
        debug!("Description of {} set to {:?}", name, description);
        Ok(())
    }

    /// Removes the template `name` and its description, if it has one.
    pub fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.existing(name)?;
        // The template goes first: a description without its template
        // must never be left behind.
        copy::remove_path(&path).map_err(|e| StoreError::Io(e, path.clone()))?;
        info!("Deleted template {}", name);
        let mut descriptions = Descriptions::load(&self.root)?;
        if descriptions.remove(name) {
            descriptions.save()?;
            debug!("Removed description of {}", name);
        }
        Ok(())
    }

    /// Copies the template `name` to `destination`.
    ///
    /// A file template copied onto an existing directory lands inside
    /// it, under the template's name.
    pub fn copy(&self, name: &str, destination: &Path, overwrite: bool) -> Result<(), StoreError> {
        let src = self.existing(name)?;
        if destination.exists() && !overwrite {
            return Err(StoreError::DestinationExists(destination.to_path_buf()));
        }

        let target = if src.is_file() && destination.is_dir() {
            let inner = destination.join(name);
            if inner.is_dir() || (inner.exists() && !overwrite) {
                return Err(StoreError::DestinationExists(inner));
            }
            inner
        } else {
            destination.to_path_buf()
        };

        let resolved_src = resolve(&src);
        if resolve(&target).starts_with(&resolved_src) {
            return Err(StoreError::CopyIntoTemplate(name.to_string(), target));
        }

        copy::copy_path(&src, &target).map_err(|e| StoreError::Io(e, target.clone()))?;
        info!("Copied template {} to {}", name, target.display());
        Ok(())
    }
}

/// Canonical form of `path`, which need not exist: the longest existing
/// prefix is canonicalized and the rest appended.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if parent.as_os_str().is_empty() => {
            resolve(Path::new(".")).join(name)
        }
        (Some(parent), Some(name)) => resolve(parent).join(name),
        _ => path.to_path_buf(),
    }
}
