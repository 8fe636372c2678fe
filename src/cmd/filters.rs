use colored::Colorize;
use projman::{scene::SCENE_FILE_TYPES, LoadedConfig};

pub const CMD_STR: &str = "filters";
pub const TYPE_ARG: &str = "TYPE";
pub const CLEAR_ARG: &str = "clear";

/// Shows the scene types used by `projman scenes`, replacing the selection
/// first when `select` is given.
pub fn filters(config: &mut LoadedConfig, select: Option<Vec<&str>>, clear: bool) {
    let changed = clear || select.is_some();
    if clear {
        config.config.scene_filters.clear();
    }
    if let Some(keys) = select {
        let mut selected: Vec<String> = vec![];
        for key in keys {
            if !selected.iter().any(|k| k == key) {
                selected.push(key.to_string());
            }
        }
        config.config.scene_filters = selected;
    }
    if changed {
        if let Err(err) = config.write_config() {
            clap::Error::with_description(&err.to_string(), clap::ErrorKind::InvalidValue).exit()
        }
    }

    for file_type in SCENE_FILE_TYPES {
        let selected = config
            .config
            .scene_filters
            .iter()
            .any(|k| k == file_type.key || k == file_type.label);
        let mark = if selected {
            "[x]".green()
        } else {
            "[ ]".dimmed()
        };
        println!("{} {:<8} {}", mark, file_type.key, file_type.label.dimmed());
    }
}
