use colored::Colorize;
use projman::ProjectRegistry;
use std::path::Path;

pub const EXPORT_CMD_STR: &str = "export";
pub const IMPORT_CMD_STR: &str = "import";
pub const FILE_ARG: &str = "FILE";

pub fn export(registry: &ProjectRegistry, file: &Path) -> projman::Result<()> {
    let count = registry.export_to(file)?;
    println!(
        "{} {} {} {}",
        "Exported".green(),
        count,
        "projects to".green(),
        file.to_string_lossy()
    );
    Ok(())
}

pub fn import(registry: &ProjectRegistry, file: &Path) -> projman::Result<()> {
    let added = registry.import_from(file)?;
    if added == 0 {
        println!("{}", "Every project in that list is already known.".dimmed());
    } else {
        println!("{} {} {}", "Imported".green(), added, "projects.".green());
    }
    Ok(())
}
