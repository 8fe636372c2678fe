use crate::userbool::UserBool;
use colored::Colorize;
use projman::ProjectRegistry;
use read_input::prelude::*;

pub const CMD_STR: &str = "remove";
pub const PATH_ARG: &str = "PATH";
pub const YES_ARG: &str = "yes";

/// Removes `path` from the list. The path is matched exactly as listed, so
/// it is not expanded or canonicalized.
pub fn remove(registry: &ProjectRegistry, path: &str, assume_yes: bool) -> projman::Result<()> {
    if !registry.list()?.iter().any(|e| e.path == path) {
        println!("{}{}", path.yellow(), " is not a listed project.".red());
        println!(
            "{}{}{}",
            "Call ".dimmed(),
            "projman list".yellow(),
            " to see the listed projects.".dimmed()
        );
        std::process::exit(exitcode::USAGE);
    }
    let confirm = assume_yes
        || input()
            .msg(&format!(
                "Remove '{}' from the project list? {} ",
                path,
                "[y/N]".dimmed()
            ))
            .default(UserBool::NO)
            .get()
            .into();
    if confirm {
        // Only the list entry goes; the folder stays on disk.
        registry.remove(path)?;
        println!("Project {} removed from the list.", path);
    } else {
        println!("Aborted.")
    }
    Ok(())
}
