use colored::Colorize;
use projman::{project, ProjectRegistry, TemplateStore};
use std::path::Path;

pub const CMD_STR: &str = "new";
pub const PATH_ARG: &str = "PATH";
pub const TEMPLATE_ARG: &str = "TEMPLATE";

pub fn new(
    registry: &ProjectRegistry,
    store: &TemplateStore,
    path: &Path,
    template: Option<&str>,
) -> projman::Result<()> {
    // Load first, so an unknown template leaves nothing behind.
    let template = template.map(|name| store.load(name)).transpose()?;
    let created = project::create(registry, path, template.as_ref())?;

    println!(
        "{} {}",
        "Created new project in".green(),
        created.root.to_string_lossy()
    );
    if let Some(template) = &template {
        println!(
            "  {} {} {}",
            created.folders.len(),
            "folders created from".dimmed(),
            template.name.bold()
        );
    }
    if !created.registered {
        println!("  {}", "It was already in the project list.".dimmed());
    }
    Ok(())
}
