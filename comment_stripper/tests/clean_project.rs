use comment_stripper::batch;
use comment_stripper::{clean, CleanConfig, FileProcessor};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn cleans_unity_style_project() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let player = "using UnityEngine;\n\n\
        /// <summary>\n\
        /// Player controller.\n\
        /// </summary>\n\
        public class Player : MonoBehaviour\n\
        {\n\
        \x20   // Movement speed\n\
        \x20   public float speed = 5f;   \n\
        \x20   string url = \"http://example.com\"; /* endpoint */\n\
        \x20   char slash = '/';\n\
        }\n";
    write(&root.join("Assets/Scripts/Player.cs"), player.as_bytes());
    write(&root.join("Assets/Temp/Generated.cs"), b"// generated\n");
    write(&root.join("Library/Cache.cs"), b"// cache\n");
    write(&root.join("GameManager.cs"), b"class GameManager {} // root\r\n");
    write(&root.join("syntax_check.cs"), b"// untouched\n");

    let config = CleanConfig::for_project(root);
    let results = batch::run_batch(&config, &FileProcessor::new()).unwrap();

    assert_eq!(results.files_cleaned, 2);
    assert_eq!(results.summary_line(), "Cleaned 2 files.");

    let cleaned = fs::read_to_string(root.join("Assets/Scripts/Player.cs")).unwrap();
    assert_eq!(
        cleaned,
        "using UnityEngine;\n\n\
         public class Player : MonoBehaviour\n\
         {\n\
         \n\
         \x20   public float speed = 5f;\n\
         \x20   string url = \"http://example.com\";\n\
         \x20   char slash = '/';\n\
         }\n"
    );
    assert_eq!(clean(&cleaned), cleaned);

    assert_eq!(
        fs::read(root.join("GameManager.cs")).unwrap(),
        b"class GameManager {}\r\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("Assets/Temp/Generated.cs")).unwrap(),
        "// generated\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("Library/Cache.cs")).unwrap(),
        "// cache\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("syntax_check.cs")).unwrap(),
        "// untouched\n"
    );
}

#[test]
fn rerun_reports_zero_cleaned() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("Assets/A.cs"), b"int a; /* x */\n");

    let first = batch::process_project(dir.path()).unwrap();
    let second = batch::process_project(dir.path()).unwrap();

    assert_eq!(first.files_cleaned, 1);
    assert_eq!(second.files_cleaned, 0);
    assert_eq!(second.files_unchanged, 1);
}
