//! Finding scene files inside a project.

use crate::error::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// A kind of file the host can open or import.
#[derive(Debug, PartialEq, Eq)]
pub struct SceneFileType {
    /// Short name used on the command line and in `config.json`.
    pub key: &'static str,
    pub label: &'static str,
    /// Extensions including the leading dot, matched case-sensitively.
    pub extensions: &'static [&'static str],
}

macro_rules! file_type {
    ($key:expr, $label:expr, [$($ext:expr),+]) => {
        SceneFileType {
            key: $key,
            label: $label,
            extensions: &[$($ext),+],
        }
    };
}

pub const SCENE_FILE_TYPES: &[SceneFileType] = &[
    file_type!("lxo", "Modo (*.lxo)", [".lxo"]),
    file_type!("lxl", "Preset (*.lxl)", [".lxl"]),
    file_type!("lwo", "Lightwave (*.lwo)", [".lwo"]),
    file_type!("obj", "Wavefront (*.obj)", [".obj"]),
    file_type!("abc", "Alembic (*.abc)", [".abc"]),
    file_type!("fbx", "Filmbox (*.fbx)", [".fbx"]),
    file_type!("dae", "Collada (*.dae)", [".dae"]),
    file_type!("3dm", "Rhino (*.3dm)", [".3dm"]),
    file_type!("dxf", "Autodesk DXF (*.dxf)", [".dxf"]),
    file_type!("ai", "Adobe Illustrator (*.eps, *.ai)", [".eps", ".ai"]),
    file_type!("stl", "Stereolithography (*.stl)", [".stl"]),
    file_type!("geo", "Videoscape (*.geo)", [".geo"]),
    file_type!("sldprt", "Solidworks (*.sldprt, *.sldasm)", [".sldprt", ".sldasm"]),
    file_type!("pdb", "Protein DB (*.pdb)", [".pdb"]),
];

impl SceneFileType {
    /// Finds a type by key or by its full label.
    pub fn lookup(name: &str) -> Option<&'static SceneFileType> {
        SCENE_FILE_TYPES
            .iter()
            .find(|t| t.key == name || t.label == name)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.extensions.iter().any(|ext| {
            file_name.len() > ext.len() && file_name.ends_with(ext)
        })
    }
}

/// A file found by `scan`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    pub name: String,
    /// Location relative to the project root.
    pub relative_path: PathBuf,
}

impl Scene {
    pub fn absolute_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.relative_path)
    }
}

/// Walks `project_root` and returns every file matching one of `types`,
/// sorted by file name. Directories that cannot be read are skipped.
pub fn scan(project_root: &Path, types: &[&SceneFileType]) -> Result<Vec<Scene>> {
    if !project_root.is_dir() {
        return Err(Error::InvalidPath {
            path: project_root.to_path_buf(),
        });
    }

    let mut scenes = vec![];
    let mut to_visit = vec![project_root.to_path_buf()];
    while let Some(dir) = to_visit.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if dir != project_root => {
                warn!(dir = %dir.display(), %err, "skipping unreadable directory");
                continue;
            }
            Err(err) => return Err(Error::io(dir, err)),
        };
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(dir = %dir.display(), %err, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    warn!(dir = %dir.display(), %err, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            // Symlinked directories are not followed; they may loop back.
            if file_type.is_dir() {
                to_visit.push(path);
                continue;
            }
            if file_type.is_symlink() && path.is_dir() {
                debug!(link = %path.display(), "not following directory link");
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !types.iter().any(|t| t.matches(&name)) {
                continue;
            }
            if let Ok(relative) = path.strip_prefix(project_root) {
                scenes.push(Scene {
                    name,
                    relative_path: relative.to_path_buf(),
                });
            }
        }
    }
    scenes.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
    debug!(root = %project_root.display(), found = scenes.len(), "scanned for scenes");
    Ok(scenes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn lookup_by_key_or_label() {
        assert_eq!(SceneFileType::lookup("fbx").unwrap().extensions, &[".fbx"]);
        assert_eq!(
            SceneFileType::lookup("Solidworks (*.sldprt, *.sldasm)").unwrap().key,
            "sldprt"
        );
        assert!(SceneFileType::lookup("psd").is_none());
    }

    #[test]
    fn extension_match_is_exact() {
        let ai = SceneFileType::lookup("ai").unwrap();
        assert!(ai.matches("logo.eps"));
        assert!(ai.matches("logo.ai"));
        assert!(!ai.matches("logo.AI"));
        assert!(!ai.matches("logo.aix"));
        assert!(!ai.matches(".ai"));
    }

    #[test]
    fn scan_filters_and_reports_relative_paths() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Scenes/shot_010.lxo");
        touch(dir.path(), "Scenes/old/shot_005.lxo");
        touch(dir.path(), "Assets/tree.fbx");
        touch(dir.path(), "Images/tree.png");

        let lxo = SceneFileType::lookup("lxo").unwrap();
        let scenes = scan(dir.path(), &[lxo]).unwrap();
        assert_eq!(
            scenes,
            vec![
                Scene {
                    name: "shot_005.lxo".to_string(),
                    relative_path: Path::new("Scenes").join("old").join("shot_005.lxo"),
                },
                Scene {
                    name: "shot_010.lxo".to_string(),
                    relative_path: Path::new("Scenes").join("shot_010.lxo"),
                },
            ]
        );
        assert!(scenes[1].absolute_path(dir.path()).is_file());

        let fbx = SceneFileType::lookup("fbx").unwrap();
        assert_eq!(scan(dir.path(), &[lxo, fbx]).unwrap().len(), 3);
        assert!(scan(dir.path(), &[]).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn directory_links_are_not_followed() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Scenes/shot.lxo");
        std::os::unix::fs::symlink(dir.path(), dir.path().join("Scenes").join("loop")).unwrap();
        touch(dir.path(), "Other/take.lxo");
        std::os::unix::fs::symlink(
            dir.path().join("Other").join("take.lxo"),
            dir.path().join("Scenes").join("linked.lxo"),
        )
        .unwrap();

        let lxo = SceneFileType::lookup("lxo").unwrap();
        let found: Vec<_> = scan(dir.path(), &[lxo])
            .unwrap()
            .into_iter()
            .map(|s| s.relative_path)
            .collect();
        assert_eq!(
            found,
            vec![
                Path::new("Scenes").join("linked.lxo"),
                Path::new("Scenes").join("shot.lxo"),
                Path::new("Other").join("take.lxo"),
            ]
        );
    }

    #[test]
    fn scanning_a_missing_project_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            scan(&dir.path().join("gone"), &[]),
            Err(Error::InvalidPath { .. })
        ));
    }
}
