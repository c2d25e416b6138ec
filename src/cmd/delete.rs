use crate::store::{StoreError, TemplateStore};
use colored::Colorize;

pub fn delete(store: &TemplateStore, name: &str) -> Result<(), StoreError> {
    store.delete(name)?;
    println!(
        "Deleted {} from {}",
        name.bold(),
        store.root().to_string_lossy()
    );
    Ok(())
}
