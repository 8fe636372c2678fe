use colored::Colorize;
use projman::TemplateStore;

pub const CMD_STR: &str = "templates";

pub fn templates(store: &TemplateStore) -> projman::Result<()> {
    let names = store.list_templates()?;
    if names.is_empty() {
        println!("{}", "No templates yet.".italic());
        println!(
            "{} {} {}",
            "Call".dimmed(),
            "projman make <NAME>".yellow(),
            "to create one.".dimmed()
        );
    }
    for name in names {
        match store.load(&name) {
            Ok(template) => println!(
                "{}\n  {} {}",
                name.bold(),
                template.root.folder_paths().len(),
                "folders".dimmed()
            ),
            Err(err) => println!("{}\n  {}", name.bold(), err.to_string().red()),
        }
    }
    Ok(())
}
