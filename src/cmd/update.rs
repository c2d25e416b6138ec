use crate::store::{StoreError, TemplateStore};
use colored::Colorize;

pub fn update(store: &TemplateStore, name: &str, description: &str) -> Result<(), StoreError> {
    store.update_description(name, description)?;
    println!("Updated the description of {}", name.bold());
    Ok(())
}
