use colored::Colorize;
use projman::ProjectRegistry;

pub const CMD_STR: &str = "list";

pub fn list(registry: &ProjectRegistry) -> projman::Result<()> {
    let entries = registry.sorted_for_display()?;
    if entries.is_empty() {
        println!("{}", "No projects yet.".italic());
        println!(
            "{} {} {} {}{}",
            "Create one with".dimmed(),
            "projman new".yellow(),
            "or list an existing one with".dimmed(),
            "projman add".yellow(),
            ".".dimmed()
        );
        return Ok(());
    }
    for entry in entries {
        if entry.is_valid() {
            println!("{}\n  {}", entry.display_name().bold(), entry.path.dimmed());
        } else {
            println!(
                "{}\n  {} {}",
                entry.display_name().red().bold(),
                entry.path.red(),
                "(missing)".red().italic()
            );
        }
    }
    Ok(())
}
