/*!
 * Tests for file utility functions
 */

use std::path::PathBuf;
use yatt::file_utils::{DEFAULT_SAVE_FILENAME, FileManager};

use crate::common;

#[test]
fn test_readToString_withExistingFile_shouldReturnContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let file = common::create_test_file(temp_dir.path(), "input.txt", "hello").unwrap();

    assert_eq!(FileManager::read_to_string(&file).unwrap(), "hello");
    assert!(FileManager::read_to_string(temp_dir.path().join("missing.txt")).is_err());
}

#[test]
fn test_ensureDir_withNestedPath_shouldCreateParents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested).unwrap();

    assert!(nested.is_dir());
}

#[test]
fn test_writeToFile_shouldOverwriteExistingContent() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "out.txt", "old").unwrap();

    FileManager::write_to_file(&path, "new").unwrap();

    assert_eq!(FileManager::read_to_string(&path).unwrap(), "new");
}

#[test]
fn test_defaultSavePath_shouldBeTranslateTxt() {
    assert_eq!(FileManager::default_save_path(), PathBuf::from("translate.txt"));
    assert_eq!(DEFAULT_SAVE_FILENAME, "translate.txt");
}
