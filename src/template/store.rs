use super::{xml, FolderNode, Template};
use crate::{
    config::Paths,
    error::{Error, Result},
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Extension of template files; the file stem is the template name.
pub const TEMPLATE_EXTENSION: &str = "xml";

/// A directory of templates, one XML file per template.
#[derive(Clone, Debug)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(paths: &Paths) -> Self {
        Self::with_dir(paths.templates_dir())
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        TemplateStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn template_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.template_path(name).is_file()
    }

    /// Names of every saved template, sorted.
    pub fn list_templates(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(vec![]);
        }
        if !self.dir.is_dir() {
            return Err(Error::InvalidPath {
                path: self.dir.clone(),
            });
        }
        let pattern = Path::new(&glob::Pattern::escape(&self.dir.to_string_lossy()))
            .join(format!("*.{}", TEMPLATE_EXTENSION));
        let entries = glob::glob(&pattern.to_string_lossy())
            .map_err(|e| Error::malformed(&pattern, e.msg))?;

        let mut names = vec![];
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                Error::io(path, e.into_error())
            })?;
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
        names.sort();
        debug!(dir = %self.dir.display(), count = names.len(), "listed templates");
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<Template> {
        let path = self.template_path(name);
        if !path.is_file() {
            return Err(Error::NotFound {
                name: name.to_string(),
            });
        }
        let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let root = xml::from_xml(&contents).map_err(|e| Error::malformed(&path, e))?;
        debug!(name, folders = root.folder_paths().len(), "loaded template");
        Ok(Template {
            name: name.to_string(),
            root,
        })
    }

    /// Writes `template` to `<name>.xml`, replacing whatever was there.
    pub fn save(&self, template: &Template) -> Result<PathBuf> {
        let path = self.template_path(&template.name);
        let contents = xml::to_xml(template).map_err(|e| Error::malformed(&path, e))?;
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        }
        fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
        info!(name = %template.name, path = %path.display(), "saved template");
        Ok(path)
    }

    /// A new, empty template. Nothing is written until it is saved.
    pub fn create(&self, name: &str) -> Template {
        Template::new(name)
    }

    pub fn materialize(&self, root: &FolderNode, destination: &Path) -> Result<Vec<PathBuf>> {
        materialize(root, destination)
    }
}

/// Creates one directory per folder of `root` under `destination`, creating
/// `destination` itself first if it is missing.
///
/// Directories that already exist are left alone and nothing is ever
/// removed, so running it again after a failure picks up where it stopped.
/// Returns the directories that were actually created.
pub fn materialize(root: &FolderNode, destination: &Path) -> Result<Vec<PathBuf>> {
    let mut created = vec![];
    if !destination.is_dir() {
        fs::create_dir_all(destination).map_err(|e| Error::io(destination, e))?;
        debug!(dir = %destination.display(), "created destination");
        created.push(destination.to_path_buf());
    }
    for relative in root.folder_paths() {
        let target = destination.join(relative);
        if target.is_dir() {
            continue;
        }
        fs::create_dir(&target).map_err(|e| Error::io(&target, e))?;
        debug!(dir = %target.display(), "created folder");
        created.push(target);
    }
    info!(
        destination = %destination.display(),
        created = created.len(),
        "materialized folder tree"
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn standard() -> Template {
        let mut template = Template::new("Standard");
        template.root.add_child("Scenes");
        template.root.add_child("Textures").add_child("Raw");
        template
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path().join("templates"));
        let path = store.save(&standard()).unwrap();
        assert_eq!(path, dir.path().join("templates").join("Standard.xml"));
        assert_eq!(store.load("Standard").unwrap(), standard());
    }

    #[test]
    fn save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path());
        store.save(&standard()).unwrap();
        let mut smaller = Template::new("Standard");
        smaller.root.add_child("Only");
        store.save(&smaller).unwrap();
        assert_eq!(store.load("Standard").unwrap(), smaller);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path());
        match store.load("Nope") {
            Err(Error::NotFound { name }) => assert_eq!(name, "Nope"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn broken_template_is_malformed() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path());
        fs::write(store.template_path("Bad"), "<root><folder/></root>").unwrap();
        assert!(matches!(store.load("Bad"), Err(Error::Malformed { .. })));
    }

    #[test]
    fn listing_only_sees_xml_files() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path());
        assert!(TemplateStore::with_dir(dir.path().join("missing"))
            .list_templates()
            .unwrap()
            .is_empty());

        store.save(&Template::new("beta")).unwrap();
        store.save(&Template::new("Alpha")).unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("folder.xml")).unwrap();
        assert_eq!(store.list_templates().unwrap(), vec!["Alpha", "beta"]);
    }

    #[test]
    fn created_templates_stay_off_disk() {
        let dir = TempDir::new().unwrap();
        let store = TemplateStore::with_dir(dir.path());
        let mut template = store.create("Draft");
        template.root.add_child("Scenes");
        assert!(!store.exists("Draft"));
        assert!(store.list_templates().unwrap().is_empty());
    }

    #[test]
    fn materialize_builds_the_tree() {
        let dir = TempDir::new().unwrap();
        let created = materialize(&standard().root, dir.path()).unwrap();
        assert_eq!(created.len(), 3);
        assert!(dir.path().join("Scenes").is_dir());
        assert!(dir.path().join("Textures").is_dir());
        assert!(dir.path().join("Textures").join("Raw").is_dir());
    }

    #[test]
    fn materialize_into_a_fresh_path() {
        let dir = TempDir::new().unwrap();
        let newproj = dir.path().join("work").join("newproj");
        let created = materialize(&standard().root, &newproj).unwrap();
        assert_eq!(created.len(), 4);
        assert_eq!(created[0], newproj);
        assert!(newproj.join("Scenes").is_dir());
        assert!(newproj.join("Textures").join("Raw").is_dir());
        assert!(materialize(&standard().root, &newproj).unwrap().is_empty());
    }

    #[test]
    fn materialize_twice_is_harmless() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Extra")).unwrap();
        materialize(&standard().root, dir.path()).unwrap();
        let again = materialize(&standard().root, dir.path()).unwrap();
        assert!(again.is_empty());
        assert!(dir.path().join("Extra").is_dir());
    }

    #[test]
    fn materialize_stops_at_a_file_in_the_way() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Textures"), "").unwrap();
        let err = materialize(&standard().root, dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        // Folders before the failure stay.
        assert!(dir.path().join("Scenes").is_dir());
    }
}
