//! Puzzle inputs read from a local directory

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Read-only view of the input directory
///
/// Directory structure: `{dir}/{year}/day{day:02}.txt`, or
/// `day{day:02}.example.txt` when examples are selected.
#[derive(Debug, Clone)]
pub struct InputStore {
    dir: PathBuf,
    example: bool,
}

impl InputStore {
    pub fn new(dir: PathBuf, example: bool) -> Self {
        Self { dir, example }
    }

    pub fn path(&self, year: u16, day: u8) -> PathBuf {
        let suffix = if self.example { ".example" } else { "" };
        self.dir
            .join(year.to_string())
            .join(format!("day{:02}{}.txt", day, suffix))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.path(year, day).is_file()
    }

    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::Missing(path),
            _ => InputError::Io { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("inputs"), false);
        assert_eq!(store.path(2021, 3), PathBuf::from("inputs/2021/day03.txt"));
        assert_eq!(store.path(2021, 25), PathBuf::from("inputs/2021/day25.txt"));

        let examples = InputStore::new(PathBuf::from("inputs"), true);
        assert_eq!(
            examples.path(2021, 3),
            PathBuf::from("inputs/2021/day03.example.txt")
        );
    }

    #[test]
    fn test_read_present_and_missing() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), false);

        assert!(!store.contains(2021, 1));
        assert!(matches!(store.read(2021, 1), Err(InputError::Missing(_))));

        fs::create_dir_all(temp.path().join("2021")).unwrap();
        fs::write(store.path(2021, 1), "199\n200\n").unwrap();

        assert!(store.contains(2021, 1));
        assert_eq!(store.read(2021, 1).unwrap(), "199\n200\n");
        // Example file is a different file
        assert!(!InputStore::new(temp.path().to_path_buf(), true).contains(2021, 1));
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), false);
        fs::create_dir_all(store.path(2021, 2)).unwrap();

        assert!(!store.contains(2021, 2));
        assert!(matches!(store.read(2021, 2), Err(InputError::Io { .. })));
    }
}
