use anyhow::{Context, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

/// Regenerates the name-list file from the raw image directory and
/// returns the naturally sorted base names (extension stripped).
///
/// The file is overwritten on every run, one name per line.
pub fn make_name_list(raw_images_folder: &Path, name_list_path: &Path) -> Result<Vec<String>> {
    let mut file_names: Vec<String> = fs::read_dir(raw_images_folder)
        .with_context(|| format!("cannot list {}", raw_images_folder.display()))?
        .map(|entry| anyhow::Ok(entry?.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_>>()?;
    alphanumeric_sort::sort_str_slice(&mut file_names);

    let names: Vec<String> = file_names
        .iter()
        .map(|file_name| {
            PathBuf::from(file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| file_name.clone())
        })
        .collect();

    let mut list_file = fs::File::create(name_list_path)
        .with_context(|| format!("cannot write {}", name_list_path.display()))?;
    for name in &names {
        writeln!(list_file, "{name}")?;
    }

    Ok(names)
}

/// Loads the whitespace-separated class names; position defines the
/// class index.
pub fn load_classes(classes_path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(classes_path)
        .with_context(|| format!("cannot read {}", classes_path.display()))?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Filesystem artifacts that are not dataset entries and must be
/// skipped transparently.
pub fn is_artifact(name: &str) -> bool {
    name.contains("DS_Store") || name.starts_with('.')
}

/// Position in the name list. Stepping back saturates at zero and
/// advancing stops at the end, so the list is never indexed out of
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Current index, or None once the list is exhausted.
    pub fn get(&self) -> Option<usize> {
        (self.index < self.len).then_some(self.index)
    }

    pub fn advance(&mut self) {
        if self.index < self.len {
            self.index += 1;
        }
    }

    pub fn step_back(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn name_list_is_naturally_sorted_and_stripped() -> Result<()> {
        let dir = TempDir::new()?;
        let images = dir.path().join("images");
        fs::create_dir(&images)?;
        for file_name in ["img10.jpg", "img2.jpg", "img1.jpg"] {
            fs::write(images.join(file_name), b"")?;
        }

        let list_path = dir.path().join("name_list.txt");
        let names = make_name_list(&images, &list_path)?;
        assert_eq!(names, ["img1", "img2", "img10"]);
        assert_eq!(fs::read_to_string(&list_path)?, "img1\nimg2\nimg10\n");
        Ok(())
    }

    #[test]
    fn name_list_is_overwritten() -> Result<()> {
        let dir = TempDir::new()?;
        let images = dir.path().join("images");
        fs::create_dir(&images)?;
        fs::write(images.join("only.jpg"), b"")?;

        let list_path = dir.path().join("name_list.txt");
        fs::write(&list_path, "stale\ncontent\n")?;
        make_name_list(&images, &list_path)?;
        assert_eq!(fs::read_to_string(&list_path)?, "only\n");
        Ok(())
    }

    #[test]
    fn classes_are_whitespace_separated() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("classes.txt");
        fs::write(&path, "hand face\nperson\n")?;
        assert_eq!(load_classes(&path)?, ["hand", "face", "person"]);
        Ok(())
    }

    #[test]
    fn recognizes_filesystem_artifacts() {
        assert!(is_artifact(".DS_Store"));
        assert!(is_artifact("DS_Store"));
        assert!(is_artifact(".hidden"));
        assert!(!is_artifact("img1"));
    }

    #[test]
    fn cursor_saturates_at_both_ends() {
        let mut cursor = Cursor::new(2);
        cursor.step_back();
        assert_eq!(cursor.get(), Some(0));

        cursor.advance();
        assert_eq!(cursor.get(), Some(1));
        cursor.advance();
        assert_eq!(cursor.get(), None);
        cursor.advance();
        assert_eq!(cursor.get(), None);

        cursor.step_back();
        assert_eq!(cursor.get(), Some(1));
    }

    #[test]
    fn empty_list_is_immediately_exhausted() {
        assert_eq!(Cursor::new(0).get(), None);
    }
}
