/*!
 * Tests for file and directory utilities
 */

use subfmt::file_utils::FileManager;

use crate::common;

#[test]
fn test_file_exists_withRealAndMissingFiles_shouldReport() {
    let temp_dir = common::create_temp_dir().expect("temp dir");
    let dir_path = temp_dir.path().to_path_buf();
    let file = common::create_test_file(&dir_path, "a.srt", "content").expect("test file");

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(dir_path.join("missing.srt")));
    // A directory is not a file
    assert!(!FileManager::file_exists(&dir_path));
}

#[test]
fn test_ensure_dir_withNestedPath_shouldCreateIt() {
    let temp_dir = common::create_temp_dir().expect("temp dir");
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested).expect("directory creation");

    assert!(FileManager::dir_exists(&nested));
}

#[test]
fn test_generate_output_path_shouldSwapExtension() {
    let path = FileManager::generate_output_path("/input/movie.vtt", "/output", "srt");
    assert_eq!(path, std::path::PathBuf::from("/output/movie.srt"));
}

#[test]
fn test_find_subtitle_files_shouldMatchSupportedExtensionsRecursively() {
    let temp_dir = common::create_temp_dir().expect("temp dir");
    let dir_path = temp_dir.path().to_path_buf();
    let sub_dir = dir_path.join("nested");
    FileManager::ensure_dir(&sub_dir).expect("nested dir");

    common::create_test_file(&dir_path, "a.srt", "x").expect("file");
    common::create_test_file(&dir_path, "b.VTT", "x").expect("file");
    common::create_test_file(&dir_path, "notes.txt", "x").expect("file");
    common::create_test_file(&sub_dir, "c.ass", "x").expect("file");

    let mut found = FileManager::find_subtitle_files(&dir_path).expect("scan");
    found.sort();

    let names: Vec<String> = found
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();

    assert_eq!(found.len(), 3);
    assert!(names.contains(&"a.srt".to_string()));
    assert!(names.contains(&"b.VTT".to_string()));
    assert!(names.contains(&"c.ass".to_string()));
}

#[test]
fn test_write_to_file_shouldCreateParentAndRoundTrip() {
    let temp_dir = common::create_temp_dir().expect("temp dir");
    let path = temp_dir.path().join("deep").join("out.srt");

    FileManager::write_to_file(&path, "1\ncontent\n").expect("write");

    assert_eq!(
        FileManager::read_to_string(&path).expect("read"),
        "1\ncontent\n"
    );
    assert_eq!(
        FileManager::read_to_bytes(&path).expect("read bytes"),
        b"1\ncontent\n".to_vec()
    );
}
