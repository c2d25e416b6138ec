use crate::{
    store::{StoreError, TemplateStore},
    template::Template,
};
use colored::Colorize;

/// One listing line: the padded name, then the description. A missing
/// description shows a dimmed placeholder.
fn format_row(template: &Template) -> String {
    let description = match &template.description {
        Some(description) => description.clone(),
        None => "No description.".dimmed().italic().to_string(),
    };
    format!("{} - {}", format!("{:10}", template.name).bold(), description)
}

pub fn list(store: &TemplateStore) -> Result<(), StoreError> {
    let templates = store.list()?;
    if templates.is_empty() {
        println!(
            "There are no templates in {}",
            store.root().to_string_lossy()
        );
        return Ok(());
    }
    for template in &templates {
        println!("{}", format_row(template));
    }
    Ok(())
}
