//! Storage initialization
//!
//! Handles first-run setup of the data directory

use crate::config::paths::SessionBookPaths;
use crate::error::SessionBookError;
use crate::models::Collection;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Creates the directories and an empty array for each collection that does
/// not exist yet. Existing collections are left alone.
pub fn initialize_storage(paths: &SessionBookPaths) -> Result<(), SessionBookError> {
    paths.ensure_directories()?;

    for collection in [Collection::Appointments, Collection::Transactions] {
        let file = paths.collection_file(collection.file_name());
        if !file.exists() {
            write_json_atomic(&file, &Vec::<serde_json::Value>::new())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_collections() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SessionBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        let text = std::fs::read_to_string(paths.collection_file("appointments.json")).unwrap();
        assert_eq!(text.trim(), "[]");
        assert!(paths.collection_file("transactions.json").exists());
    }

    #[test]
    fn test_initialize_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SessionBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();

        let file = paths.collection_file("transactions.json");
        std::fs::write(&file, r#"[{"id": "t1"}]"#).unwrap();

        initialize_storage(&paths).unwrap();

        let text = std::fs::read_to_string(&file).unwrap();
        assert!(text.contains("t1"));
    }
}
