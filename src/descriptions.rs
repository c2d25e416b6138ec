use crate::{store::StoreError, template::DESCRIPTION_FILE_NAME};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs,
    io::BufReader,
    path::{Path, PathBuf},
};

/// The description map stored in `.templates`, next to the templates
/// themselves.
///
/// Keys are kept in a `BTreeMap`, so the file is always written with
/// sorted keys.
#[derive(Debug, Default)]
pub struct Descriptions {
    path: PathBuf,
    map: BTreeMap<String, String>,
}

/// Serializes `value` as JSON indented by four spaces, with a trailing
/// newline.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

impl Descriptions {
    /// Loads the description map of the template root `root`. A missing
    /// file is an empty map.
    pub fn load(root: &Path) -> Result<Self, StoreError> {
        let path = root.join(DESCRIPTION_FILE_NAME);
        if !path.exists() {
            return Ok(Descriptions {
                path,
                map: BTreeMap::new(),
            });
        }
        let file = fs::File::open(&path).map_err(|e| StoreError::Io(e, path.clone()))?;
        let map = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| StoreError::Descriptions(e, path.clone()))?;
        Ok(Descriptions { path, map })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn set(&mut self, name: &str, description: &str) {
        self.map.insert(name.to_string(), description.to_string());
    }

    /// Removes the entry of `name`, returning whether there was one.
    pub fn remove(&mut self, name: &str) -> bool {
        self.map.remove(name).is_some()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = to_pretty_json(&self.map)
            .map_err(|e| StoreError::Descriptions(e, self.path.clone()))?;
        fs::write(&self.path, json).map_err(|e| StoreError::Io(e, self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let descriptions = Descriptions::load(tmp.path()).unwrap();
        assert_eq!(descriptions.get("anything"), None);
    }

    #[test]
    fn saves_sorted_and_indented() {
        let tmp = TempDir::new().unwrap();
        let mut descriptions = Descriptions::load(tmp.path()).unwrap();
        descriptions.set("zsh", "shell rc");
        descriptions.set("bash", "other shell rc");
        descriptions.save().unwrap();

        let written = fs::read_to_string(tmp.path().join(DESCRIPTION_FILE_NAME)).unwrap();
        assert_eq!(
            written,
            "{\n    \"bash\": \"other shell rc\",\n    \"zsh\": \"shell rc\"\n}\n"
        );

        let reloaded = Descriptions::load(tmp.path()).unwrap();
        assert_eq!(reloaded.get("zsh"), Some("shell rc"));
    }

    #[test]
    fn remove_reports_presence() {
        let tmp = TempDir::new().unwrap();
        let mut descriptions = Descriptions::load(tmp.path()).unwrap();
        descriptions.set("a", "b");
        assert!(descriptions.remove("a"));
        assert!(!descriptions.remove("a"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(DESCRIPTION_FILE_NAME), "{ not json").unwrap();
        match Descriptions::load(tmp.path()) {
            Err(StoreError::Descriptions(_, path)) => {
                assert!(path.ends_with(DESCRIPTION_FILE_NAME))
            }
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }
}
