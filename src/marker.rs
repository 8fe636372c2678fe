//! The `.luxproject` file that marks a directory as a project root for the
//! host application.

use crate::error::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

pub const MARKER_FILE: &str = ".luxproject";
pub const HEADER: &str = "#LXProject#";

/// Where each kind of file goes in a freshly created project.
const GENERIC_ASSOCIATIONS: &[(&str, &str)] = &[
    ("Associate image", "Images"),
    ("Associate irrad", "IrradianceCaches"),
    ("Associate movie", "Movies"),
    ("Associate image@renderframes", "Renders/Frames"),
    ("Associate movie@rendermovies", "Renders/Movies"),
    ("Associate movie_st@rendermovies", "Renders/Movies"),
    ("Associate movie_nost@rendermovies", "Renders/Movies"),
    ("Associate scene", "Scenes"),
    ("Associate scene.saveAs", "Scenes"),
    ("ScriptSearchPath", "Scripts"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
    Missing,
    Valid,
    /// There is a marker file, but its first line is not the header.
    Invalid,
}

pub fn marker_path(root: &Path) -> PathBuf {
    root.join(MARKER_FILE)
}

/// Marker for a new project, pointing each file kind at its usual
/// sub-folder.
pub fn generic_contents() -> String {
    render(|target| target)
}

/// Marker with every association left empty, so the host's file dialogs
/// open at the project root. Used for existing folders adopted as projects.
pub fn root_default_contents() -> String {
    render(|_| "")
}

fn render(target: impl Fn(&'static str) -> &'static str) -> String {
    let mut lines = vec![HEADER.to_string()];
    lines.extend(
        GENERIC_ASSOCIATIONS
            .iter()
            .map(|&(key, dir)| format!("{} {}", key, target(dir))),
    );
    lines.join("\n")
}

pub fn write_generic(root: &Path) -> Result<PathBuf> {
    write(root, &generic_contents())
}

pub fn write_root_default(root: &Path) -> Result<PathBuf> {
    write(root, &root_default_contents())
}

fn write(root: &Path, contents: &str) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(Error::InvalidPath {
            path: root.to_path_buf(),
        });
    }
    let path = marker_path(root);
    fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
    info!(path = %path.display(), "wrote project marker");
    Ok(path)
}

pub fn inspect(root: &Path) -> Result<MarkerState> {
    let path = marker_path(root);
    if !path.exists() {
        return Ok(MarkerState::Missing);
    }
    let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let state = match contents.lines().next() {
        Some(first) if first.trim() == HEADER => MarkerState::Valid,
        _ => MarkerState::Invalid,
    };
    debug!(path = %path.display(), ?state, "inspected project marker");
    Ok(state)
}
