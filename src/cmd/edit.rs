use crate::cmd::tree;
use colored::Colorize;
use projman::TemplateStore;

pub const CMD_STR: &str = "edit";
pub const TEMPLATE_ARG: &str = "TEMPLATE";
pub const ADD_ARG: &str = "add";
pub const REMOVE_ARG: &str = "remove";
pub const RENAME_ARG: &str = "rename";

/// Structural changes to one template, applied in the order removals,
/// renames, additions.
#[derive(Debug, Default)]
pub struct Edits<'a> {
    pub add: Vec<&'a str>,
    pub remove: Vec<&'a str>,
    /// (path, new name) pairs.
    pub rename: Vec<(&'a str, &'a str)>,
}

impl<'a> Edits<'a> {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.rename.is_empty()
    }
}

pub fn edit(store: &TemplateStore, template_name: &str, edits: Edits<'_>) -> projman::Result<()> {
    let mut template = store.load(template_name)?;
    if edits.is_empty() {
        println!("{}", "Nothing to change.".dimmed());
        return Ok(());
    }
    for path in &edits.remove {
        template.root.remove(path)?;
    }
    for (path, new_name) in &edits.rename {
        template.root.rename(path, *new_name)?;
    }
    for path in &edits.add {
        template.root.add_path(path);
    }
    template.root.sort();
    store.save(&template)?;

    println!("Template {} saved.", template.name.bold());
    print!("{}", tree::render(&template.root));
    Ok(())
}
