use crate::{
    config::Paths,
    error::{Error, Result},
};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// One known project root. Two entries are the same project only if their
/// paths are the same string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProjectEntry {
    pub path: String,
}

impl ProjectEntry {
    pub fn new(path: impl Into<String>) -> Self {
        ProjectEntry { path: path.into() }
    }

    /// The last component of the path, which is what users see in lists.
    pub fn display_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.clone())
    }

    pub fn is_valid(&self) -> bool {
        ProjectRegistry::is_valid(&self.path)
    }
}

/// The list of known project roots, one path per line in a text file.
///
/// Nothing is cached: every call reads the file again, and every change
/// rewrites it whole.
#[derive(Clone, Debug)]
pub struct ProjectRegistry {
    list_file: PathBuf,
}

impl ProjectRegistry {
    pub fn new(paths: &Paths) -> Self {
        Self::with_file(paths.project_list_file())
    }

    pub fn with_file(list_file: impl Into<PathBuf>) -> Self {
        ProjectRegistry {
            list_file: list_file.into(),
        }
    }

    pub fn list_file(&self) -> &Path {
        &self.list_file
    }

    /// Entries in file order. Duplicates written by hand are kept.
    ///
    /// A missing list file is created empty.
    pub fn list(&self) -> Result<Vec<ProjectEntry>> {
        if !self.list_file.exists() {
            debug!(file = %self.list_file.display(), "creating empty project list");
            self.write_lines(&[])?;
            return Ok(vec![]);
        }
        let entries = read_list(&self.list_file)?
            .into_iter()
            .map(ProjectEntry::new)
            .collect::<Vec<_>>();
        debug!(count = entries.len(), "read project list");
        Ok(entries)
    }

    /// Entries sorted by display name, the order front ends present them in.
    pub fn sorted_for_display(&self) -> Result<Vec<ProjectEntry>> {
        let mut entries = self.list()?;
        entries.sort_by_key(|e| e.display_name());
        Ok(entries)
    }

    /// Appends `path` unless it is already listed. Returns whether the list
    /// changed. The path is not required to exist, but it must fit on one
    /// line of the list file.
    pub fn add(&self, path: &str) -> Result<bool> {
        if !storable(path) {
            return Err(Error::InvalidPath {
                path: PathBuf::from(path),
            });
        }
        let mut lines = self.lines()?;
        if lines.iter().any(|l| l == path) {
            debug!(path, "project already listed");
            return Ok(false);
        }
        lines.push(path.to_string());
        self.write_lines(&lines)?;
        info!(path, "added project");
        Ok(true)
    }

    /// Drops every line equal to `path`. Returns whether the list changed.
    pub fn remove(&self, path: &str) -> Result<bool> {
        let mut lines = self.lines()?;
        let before = lines.len();
        lines.retain(|l| l != path);
        if lines.len() == before {
            debug!(path, "project not listed");
            return Ok(false);
        }
        self.write_lines(&lines)?;
        info!(path, removed = before - lines.len(), "removed project");
        Ok(true)
    }

    /// Whether `path` currently exists on disk.
    pub fn is_valid(path: &str) -> bool {
        Path::new(path).exists()
    }

    /// Writes the current list to `target` in the same one-path-per-line
    /// format.
    pub fn export_to(&self, target: &Path) -> Result<usize> {
        let lines = self.lines()?;
        write_list(target, &lines)?;
        info!(target = %target.display(), count = lines.len(), "exported project list");
        Ok(lines.len())
    }

    /// Adds every path listed in `source`. Paths already known are skipped.
    /// Returns how many were added.
    pub fn import_from(&self, source: &Path) -> Result<usize> {
        if !source.is_file() {
            return Err(Error::InvalidPath {
                path: source.to_path_buf(),
            });
        }
        let mut lines = self.lines()?;
        let mut added = 0;
        for path in read_list(source)? {
            if storable(&path) && !lines.contains(&path) {
                lines.push(path);
                added += 1;
            }
        }
        if added > 0 {
            self.write_lines(&lines)?;
        }
        info!(source = %source.display(), added, "imported project list");
        Ok(added)
    }

    fn lines(&self) -> Result<Vec<String>> {
        if !self.list_file.exists() {
            return Ok(vec![]);
        }
        read_list(&self.list_file)
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        if let Some(parent) = self.list_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }
        write_list(&self.list_file, lines)
    }
}

/// Lines are kept byte for byte, apart from the line ending, so that what
/// `add` wrote compares equal to what is read back. Blank lines are skipped.
fn read_list(file: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(file).map_err(|e| Error::io(file, e))?;
    Ok(contents
        .lines()
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn storable(path: &str) -> bool {
    !path.trim().is_empty() && !path.contains(|c| c == '\n' || c == '\r')
}

fn write_list(file: &Path, lines: &[String]) -> Result<()> {
    let write = || -> io::Result<()> {
        let mut out = io::BufWriter::new(fs::File::create(file)?);
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    };
    write().map_err(|e| Error::io(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry(dir: &TempDir) -> ProjectRegistry {
        ProjectRegistry::new(&Paths::new(dir.path()))
    }

    fn paths_of(entries: Vec<ProjectEntry>) -> Vec<String> {
        entries.into_iter().map(|e| e.path).collect()
    }

    #[test]
    fn missing_file_lists_empty_and_is_created() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        assert!(reg.list().unwrap().is_empty());
        assert!(reg.list_file().is_file());
    }

    #[test]
    fn adding_twice_keeps_one_line() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        assert!(reg.add("/a/proj1").unwrap());
        assert!(!reg.add("/a/proj1").unwrap());
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/a/proj1"]);
        assert_eq!(
            fs::read_to_string(reg.list_file()).unwrap(),
            "/a/proj1\n"
        );
    }

    #[test]
    fn no_normalization_on_add() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        reg.add("/a/proj").unwrap();
        reg.add("/a/proj/").unwrap();
        assert_eq!(reg.list().unwrap().len(), 2);
    }

    #[test]
    fn remove_one_of_two() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        fs::write(reg.list_file(), "/a/proj1\n/a/proj2\n").unwrap();
        assert!(reg.remove("/a/proj1").unwrap());
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/a/proj2"]);
    }

    #[test]
    fn removing_an_absent_path_leaves_the_file_alone() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        fs::write(reg.list_file(), "/a/proj1\n\n").unwrap();
        assert!(!reg.remove("/nowhere").unwrap());
        assert_eq!(fs::read_to_string(reg.list_file()).unwrap(), "/a/proj1\n\n");
    }

    #[test]
    fn remove_drops_every_duplicate() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        fs::write(reg.list_file(), "/x\n/y\n/x\n").unwrap();
        reg.remove("/x").unwrap();
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/y"]);
    }

    #[test]
    fn hand_written_duplicates_are_read_back() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        fs::write(reg.list_file(), "/dup\n\n   \n/dup\n").unwrap();
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/dup", "/dup"]);
        assert!(!reg.add("/dup").unwrap());
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_path() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        assert!(reg.add("/a/my project ").unwrap());
        assert!(!reg.add("/a/my project ").unwrap());
        assert!(reg.add("/a/my project").unwrap());
        assert_eq!(
            fs::read_to_string(reg.list_file()).unwrap(),
            "/a/my project \n/a/my project\n"
        );
        assert!(reg.remove("/a/my project ").unwrap());
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/a/my project"]);
    }

    #[test]
    fn crlf_lists_are_read_without_the_carriage_return() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        fs::write(reg.list_file(), "/a/proj1\r\n\r\n/a/proj2\r\n").unwrap();
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/a/proj1", "/a/proj2"]);
        assert!(!reg.add("/a/proj2").unwrap());
        assert!(reg.remove("/a/proj1").unwrap());
        assert_eq!(fs::read_to_string(reg.list_file()).unwrap(), "/a/proj2\n");
    }

    #[test]
    fn paths_that_do_not_fit_on_a_line_are_refused() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        for bad in &["", "   ", "/a\n/b", "/a\r"] {
            assert!(matches!(reg.add(bad), Err(Error::InvalidPath { .. })));
        }
        assert!(reg.list().unwrap().is_empty());
    }

    #[test]
    fn display_order_is_by_name() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        reg.add("/z/beta").unwrap();
        reg.add("/a/gamma").unwrap();
        reg.add("/m/alpha").unwrap();
        let names: Vec<_> = reg
            .sorted_for_display()
            .unwrap()
            .iter()
            .map(ProjectEntry::display_name)
            .collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn validity_follows_the_disk() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("proj");
        let entry = ProjectEntry::new(project.to_string_lossy());
        assert!(!entry.is_valid());
        fs::create_dir(&project).unwrap();
        assert!(entry.is_valid());
    }

    #[test]
    fn import_skips_known_paths() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        reg.add("/a").unwrap();
        let other = dir.path().join("other.projlist");
        fs::write(&other, "/a\n/b\n/b\n").unwrap();
        assert_eq!(reg.import_from(&other).unwrap(), 1);
        assert_eq!(paths_of(reg.list().unwrap()), vec!["/a", "/b"]);

        let exported = dir.path().join("exported.projlist");
        assert_eq!(reg.export_to(&exported).unwrap(), 2);
        assert_eq!(fs::read_to_string(exported).unwrap(), "/a\n/b\n");
    }

    #[test]
    fn import_of_a_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let reg = registry(&dir);
        match reg.import_from(&dir.path().join("nope")) {
            Err(Error::InvalidPath { .. }) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
