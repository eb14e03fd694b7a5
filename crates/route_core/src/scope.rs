use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::Config;
use crate::error::ConfigError;

/// Decides which files are route pages: anything under a routes directory
/// except underscore-prefixed special files such as `_layout.tsx`.
#[derive(Debug, Clone)]
pub struct RoutesRoot {
    project_dir: PathBuf,
    dirs: Vec<PathBuf>,
    ignored: Regex,
}

impl RoutesRoot {
    pub fn new(project_dir: impl Into<PathBuf>, config: &Config) -> Result<Self, ConfigError> {
        let project_dir = project_dir.into();
        let dirs = config
            .routes_dirs
            .iter()
            .map(|dir| project_dir.join(dir))
            .collect();

        let extensions = config
            .extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        let ignored = Regex::new(&format!(r"^_.+\.({})$", extensions))
            .map_err(|_| ConfigError::Extension(config.extensions.join(",")))?;

        Ok(Self {
            project_dir,
            dirs,
            ignored,
        })
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn contains(&self, path: &Path) -> bool {
        if !self.dirs.iter().any(|dir| path.starts_with(dir)) {
            return false;
        }
        match path.file_name().and_then(|name| name.to_str()) {
            Some(name) => !self.ignored.is_match(name),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> RoutesRoot {
        RoutesRoot::new("/project", &Config::default()).unwrap()
    }

    #[test]
    fn accepts_app_and_src_app() {
        let root = root();
        assert!(root.contains(Path::new("/project/app/[id].tsx")));
        assert!(root.contains(Path::new("/project/src/app/blog/[...slug].tsx")));
    }

    #[test]
    fn rejects_files_outside_routes_dirs() {
        let root = root();
        assert!(!root.contains(Path::new("/project/components/[id].tsx")));
        assert!(!root.contains(Path::new("/project/application/[id].tsx")));
        assert!(!root.contains(Path::new("/other/app/[id].tsx")));
    }

    #[test]
    fn rejects_underscore_special_files() {
        let root = root();
        assert!(!root.contains(Path::new("/project/app/_layout.tsx")));
        assert!(!root.contains(Path::new("/project/app/blog/_layout.js")));
        assert!(!root.contains(Path::new("/project/app/_sitemap.mjs")));
    }

    #[test]
    fn underscore_files_with_other_extensions_are_routes() {
        let root = root();
        assert!(root.contains(Path::new("/project/app/_notes.md")));
        assert!(root.contains(Path::new("/project/app/_.tsx")));
    }

    #[test]
    fn custom_dirs_and_extensions() {
        let config = Config {
            routes_dirs: vec!["pages".to_string()],
            extensions: vec!["vue".to_string()],
        };
        let root = RoutesRoot::new("/project", &config).unwrap();
        assert!(root.contains(Path::new("/project/pages/[id].tsx")));
        assert!(!root.contains(Path::new("/project/pages/_layout.vue")));
        assert!(root.contains(Path::new("/project/pages/_layout.tsx")));
        assert!(!root.contains(Path::new("/project/app/[id].tsx")));
    }
}
