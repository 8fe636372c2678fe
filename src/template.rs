//! Folder templates: named directory trees used to scaffold new projects.

mod store;
pub mod xml;

pub use store::{materialize, TemplateStore, TEMPLATE_EXTENSION};

use crate::error::{Error, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// One folder of a template, with its sub-folders in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderNode {
    pub name: String,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn new(name: impl Into<String>) -> Self {
        FolderNode {
            name: name.into(),
            children: vec![],
        }
    }

    /// The unnamed container whose children are a template's top-level
    /// folders.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, children: Vec<FolderNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&FolderNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Appends a new child and returns it.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut FolderNode {
        self.children.push(FolderNode::new(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Follows a `/`-separated path of names from this node.
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        segments(path).try_fold(self, |node, name| node.child(name))
    }

    fn find_mut(&mut self, path: &str) -> Option<&mut FolderNode> {
        let mut node = self;
        for name in segments(path) {
            node = node.children.iter_mut().find(|c| c.name == name)?;
        }
        Some(node)
    }

    /// Makes sure every folder along `path` exists, reusing folders that are
    /// already there, and returns the last one.
    pub fn add_path(&mut self, path: &str) -> &mut FolderNode {
        let mut node = self;
        for name in segments(path) {
            let idx = match node.children.iter().position(|c| c.name == name) {
                Some(idx) => idx,
                None => {
                    node.children.push(FolderNode::new(name));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[idx];
        }
        node
    }

    /// Detaches the folder at `path`, with everything below it.
    pub fn remove(&mut self, path: &str) -> Result<FolderNode> {
        let (parent, name) = split_last(path)?;
        let parent = self
            .find_mut(parent)
            .ok_or_else(|| invalid_node(path))?;
        let idx = parent
            .children
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| invalid_node(path))?;
        Ok(parent.children.remove(idx))
    }

    pub fn rename(&mut self, path: &str, new_name: impl Into<String>) -> Result<()> {
        split_last(path)?;
        let node = self.find_mut(path).ok_or_else(|| invalid_node(path))?;
        node.name = new_name.into();
        Ok(())
    }

    /// Sorts children by name at every level.
    pub fn sort(&mut self) {
        self.children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in &mut self.children {
            child.sort();
        }
    }

    /// Paths of every folder below this node, relative to it, parents
    /// before their children.
    pub fn folder_paths(&self) -> Vec<PathBuf> {
        fn visit(node: &FolderNode, prefix: &Path, out: &mut Vec<PathBuf>) {
            for child in &node.children {
                let path = prefix.join(&child.name);
                out.push(path.clone());
                visit(child, &path, out);
            }
        }
        let mut out = vec![];
        visit(self, Path::new(""), &mut out);
        out
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> + '_ {
    path.split('/').filter(|s| !s.is_empty())
}

/// Splits `a/b/c` into (`a/b`, `c`).
fn split_last(path: &str) -> Result<(&str, &str)> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => Ok((&trimmed[..idx], &trimmed[idx + 1..])),
        None if !trimmed.is_empty() => Ok(("", trimmed)),
        None => Err(invalid_node(path)),
    }
}

fn invalid_node(path: &str) -> Error {
    Error::InvalidNode {
        path: path.to_string(),
    }
}

/// A named folder tree. The name is also the template's file name in the
/// store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub root: FolderNode,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            root: FolderNode::root(),
        }
    }

    /// Captures the sub-directories of `dir` (files are ignored) as a new
    /// template, with folders sorted by name.
    pub fn infer_from_path(name: impl Into<String>, dir: &Path) -> Result<Self> {
        fn read_level(dir: &Path, node: &mut FolderNode) -> Result<()> {
            let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| Error::io(dir, e))?;
                let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
                if !file_type.is_dir() {
                    continue;
                }
                let child = node.add_child(entry.file_name().to_string_lossy().to_string());
                read_level(&entry.path(), child)?;
            }
            Ok(())
        }

        if !dir.is_dir() {
            return Err(Error::InvalidPath {
                path: dir.to_path_buf(),
            });
        }
        let mut template = Template::new(name);
        read_level(dir, &mut template.root)?;
        template.root.sort();
        Ok(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn standard() -> FolderNode {
        FolderNode::root().with_children(vec![
            FolderNode::new("Scenes"),
            FolderNode::new("Textures").with_children(vec![FolderNode::new("Raw")]),
        ])
    }

    #[test]
    fn find_walks_names() {
        let root = standard();
        assert_eq!(root.find("Textures/Raw").map(|n| n.name.as_str()), Some("Raw"));
        assert!(root.find("Textures/Nope").is_none());
        assert_eq!(root.find(""), Some(&root));
    }

    #[test]
    fn add_path_reuses_existing_folders() {
        let mut root = standard();
        root.add_path("Textures/Final");
        root.add_path("Renders/Frames");
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Scenes", "Textures", "Renders"]);
        assert_eq!(root.find("Textures").unwrap().children.len(), 2);
        assert!(root.find("Renders/Frames").is_some());
    }

    #[test]
    fn remove_takes_the_subtree() {
        let mut root = standard();
        let removed = root.remove("Textures").unwrap();
        assert_eq!(removed.children, vec![FolderNode::new("Raw")]);
        assert_eq!(root.children, vec![FolderNode::new("Scenes")]);
        assert!(matches!(
            root.remove("Textures/Raw"),
            Err(Error::InvalidNode { .. })
        ));
        assert!(matches!(root.remove(""), Err(Error::InvalidNode { .. })));
    }

    #[test]
    fn rename_and_sort() {
        let mut root = standard();
        root.rename("Scenes", "Zeta").unwrap();
        root.sort();
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Textures", "Zeta"]);
        assert!(root.rename("Missing", "x").is_err());
    }

    #[test]
    fn folder_paths_lists_parents_first() {
        let paths = standard().folder_paths();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("Scenes"),
                PathBuf::from("Textures"),
                PathBuf::from("Textures").join("Raw"),
            ]
        );
    }

    #[test]
    fn infer_from_existing_layout() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Textures").join("Raw")).unwrap();
        fs::create_dir(dir.path().join("Scenes")).unwrap();
        fs::write(dir.path().join("Scenes").join("shot.lxo"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let template = Template::infer_from_path("Standard", dir.path()).unwrap();
        assert_eq!(template.name, "Standard");
        assert_eq!(template.root, standard());
    }
}
