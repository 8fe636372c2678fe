//! Creating new projects and adopting existing folders as projects.

use crate::{
    error::{Error, Result},
    marker::{self, MarkerState},
    registry::ProjectRegistry,
    template::{self, Template},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

/// What `create` did on disk.
#[derive(Debug)]
pub struct CreatedProject {
    pub root: PathBuf,
    pub marker: PathBuf,
    pub folders: Vec<PathBuf>,
    /// False if the root was already listed.
    pub registered: bool,
}

/// Makes `root` a project: creates the directory if needed, writes a
/// generic marker, lays out `template` under it and lists it in `registry`.
pub fn create(
    registry: &ProjectRegistry,
    root: &Path,
    template: Option<&Template>,
) -> Result<CreatedProject> {
    let listed = listable(root)?;
    if !root.exists() {
        fs::create_dir_all(root).map_err(|e| Error::io(root, e))?;
    }
    let marker = marker::write_generic(root)?;
    let folders = match template {
        Some(template) => template::materialize(&template.root, root)?,
        None => vec![],
    };
    let registered = registry.add(listed)?;
    info!(root = %root.display(), folders = folders.len(), "created project");
    Ok(CreatedProject {
        root: root.to_path_buf(),
        marker,
        folders,
        registered,
    })
}

/// Lists an existing folder as a project.
///
/// A folder with a valid marker is listed as is; one without a marker gets a
/// root-default marker first. A folder whose marker is broken is refused and
/// the registry is left alone.
pub fn adopt(registry: &ProjectRegistry, root: &Path) -> Result<bool> {
    let listed = listable(root)?;
    if !root.is_dir() {
        return Err(Error::InvalidPath {
            path: root.to_path_buf(),
        });
    }
    match marker::inspect(root)? {
        MarkerState::Valid => {}
        MarkerState::Missing => {
            marker::write_root_default(root)?;
        }
        MarkerState::Invalid => {
            return Err(Error::InvalidMarker {
                path: marker::marker_path(root),
            })
        }
    }
    registry.add(listed)
}

/// The list file holds text, so a root must be valid UTF-8 to be listed.
fn listable(root: &Path) -> Result<&str> {
    root.to_str().ok_or_else(|| Error::InvalidPath {
        path: root.to_path_buf(),
    })
}
