use crate::userpath::UserDir;
use colored::Colorize;
use projman::{Template, TemplateStore};

pub const CMD_STR: &str = "make";
pub const NAME_ARG: &str = "NAME";
pub const FOLDER_ARG: &str = "FOLDER";
pub const FROM_ARG: &str = "from";

const ERR_NAME_TAKEN: &str = "There is already a template of that name.";

/// Creates and saves a new template from `folders` (slash-separated paths)
/// and, optionally, the sub-directories of an existing folder.
pub fn make(
    store: &TemplateStore,
    name: &str,
    folders: Vec<&str>,
    from: Option<UserDir>,
) -> projman::Result<()> {
    if store.exists(name) {
        println!("{}", ERR_NAME_TAKEN.red());
        println!(
            "{} {}{}",
            "To change it, use".dimmed(),
            format!("projman edit {}", name).yellow(),
            ".".dimmed()
        );
        std::process::exit(exitcode::USAGE);
    }

    let mut template = match from {
        Some(dir) => Template::infer_from_path(name, &dir.path_buf)?,
        None => store.create(name),
    };
    for folder in folders {
        template.root.add_path(folder);
    }
    template.root.sort();
    store.save(&template)?;

    println!("New template {} was created.", template.name.bold());
    println!(
        "{} {} {}",
        "Call".dimmed(),
        format!("projman new <PATH> -t {}", template.name).green(),
        "to create a project from it.".dimmed()
    );
    Ok(())
}
