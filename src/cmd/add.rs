use crate::userpath::UserDir;
use colored::Colorize;
use projman::{project, ProjectRegistry};

pub const CMD_STR: &str = "add";
pub const PATH_ARG: &str = "PATH";

pub fn add(registry: &ProjectRegistry, path: UserDir) -> projman::Result<()> {
    if project::adopt(registry, &path.path_buf)? {
        println!("{} {}", "Added".green(), path);
    } else {
        println!("{} {}", path, "is already listed.".dimmed());
    }
    Ok(())
}
