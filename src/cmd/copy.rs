use crate::{
    store::{StoreError, TemplateStore},
    userpath::UserPath,
};
use colored::Colorize;

pub fn copy(
    store: &TemplateStore,
    name: &str,
    destination: &UserPath,
    overwrite: bool,
) -> Result<(), StoreError> {
    store.copy(name, &destination.path_buf, overwrite)?;
    println!(
        "{} {} {} {}.",
        "Copied template".green(),
        name,
        "to".green(),
        destination.path_buf.to_string_lossy()
    );
    Ok(())
}
