use crate::userpath::UserDir;
use colored::Colorize;
use projman::{scene, LoadedConfig, SceneFileType};

pub const CMD_STR: &str = "scenes";
pub const PROJECT_ARG: &str = "PROJECT";
pub const TYPE_ARG: &str = "type";

/// Lists the scene files of a project. `types` overrides the filters saved
/// with `projman filters`.
pub fn scenes(
    config: &LoadedConfig,
    project: UserDir,
    types: Option<Vec<&str>>,
) -> projman::Result<()> {
    let types: Vec<&SceneFileType> = match types {
        Some(keys) => keys
            .into_iter()
            .filter_map(SceneFileType::lookup)
            .collect(),
        None => config.config.scene_types(),
    };
    if types.is_empty() {
        println!("{}", "No scene types selected.".yellow());
        println!(
            "{} {} {} {}{}",
            "Pick some with".dimmed(),
            "projman filters".yellow(),
            "or pass".dimmed(),
            "-t".yellow(),
            ".".dimmed()
        );
        return Ok(());
    }

    let found = scene::scan(&project.path_buf, &types)?;
    if found.is_empty() {
        println!("{}", "No matching scenes.".italic());
    }
    for scene in found {
        println!(
            "{}  {}",
            scene.name.bold(),
            scene.relative_path.to_string_lossy().dimmed()
        );
    }
    Ok(())
}
