use crate::{
    store::{StoreError, TemplateStore},
    template,
    userpath::UserPath,
};
use colored::Colorize;

/// Adds `src` to the store. Without an explicit `name`, the template is
/// named after the last segment of `src`.
pub fn add(
    store: &TemplateStore,
    src: &UserPath,
    name: Option<&str>,
    description: &str,
    overwrite: bool,
) -> Result<(), StoreError> {
    let name = match name {
        Some(name) => name.to_string(),
        None => template::infer_name(&src.path_buf)
            .ok_or_else(|| StoreError::InvalidName(src.path_buf.to_string_lossy().to_string()))?,
    };
    store.add(&src.path_buf, &name, description, overwrite)?;
    println!(
        "Added {} to {}",
        name.bold(),
        store.root().to_string_lossy()
    );
    Ok(())
}
