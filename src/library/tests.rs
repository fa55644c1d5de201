use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn exts(list: &[&str]) -> Vec<String> {
    normalized_extensions(&list.iter().map(|s| s.to_string()).collect::<Vec<_>>())
}

#[test]
fn normalized_extensions_trims_dots_and_case() {
    assert_eq!(exts(&[" .MP3", "flac", "", "."]), vec!["mp3", "flac"]);
}

#[test]
fn matching_extension_is_case_insensitive_and_needs_a_dot() {
    let e = exts(&["mp3", "flac"]);
    assert_eq!(matching_extension("song.mp3", &e), Some("mp3"));
    assert_eq!(matching_extension("SONG.MP3", &e), Some("mp3"));
    assert_eq!(matching_extension("a.FlAc", &e), Some("flac"));
    assert_eq!(matching_extension("notmp3", &e), None);
    assert_eq!(matching_extension("song.mp3.txt", &e), None);
    assert_eq!(matching_extension("mp3", &e), None);
}

#[test]
fn display_name_strips_only_the_final_extension() {
    assert_eq!(display_name("Song.Name.MP3", "mp3"), "Song.Name");
    assert_eq!(display_name("Björk - Jóga.mp3", "mp3"), "Björk - Jóga");
    assert_eq!(display_name(".mp3", "mp3"), ".mp3");
}

#[test]
fn library_assigns_unique_ids_and_unknown_duration() {
    let mut lib = Library::new();
    let a = lib.push("a".into(), "a.mp3".into(), SourceHandle::new("/m/a.mp3"));
    let b = lib.push("b".into(), "b.mp3".into(), SourceHandle::new("/m/b.mp3"));
    assert_ne!(a, b);
    assert_eq!(lib.len(), 2);
    assert!(!lib.get(0).unwrap().has_duration());
    assert_eq!(lib.get(1).unwrap().source.path(), std::path::Path::new("/m/b.mp3"));
}

#[test]
fn set_duration_rejects_bad_values_and_indices() {
    let mut lib = Library::new();
    lib.push("a".into(), "a.mp3".into(), SourceHandle::new("/m/a.mp3"));
    assert!(!lib.set_duration(3, 10.0));
    assert!(!lib.set_duration(0, f64::NAN));
    assert!(lib.set_duration(0, 183.5));
    assert!(lib.get(0).unwrap().has_duration());
    assert_eq!(lib.get(0).unwrap().duration_secs, 183.5);
}

#[test]
fn local_file_open_reports_missing_and_directories() {
    let dir = tempdir().unwrap();
    let song = dir.path().join("ok.mp3");
    fs::write(&song, b"not a real mp3").unwrap();

    let handle = LocalFile::new(&song).open().unwrap();
    assert_eq!(handle.path(), song.as_path());
    assert_eq!(LocalFile::new(&song).name(), "ok.mp3");

    assert!(LocalFile::new(dir.path().join("missing.mp3")).open().is_err());
}

#[test]
fn select_directory_returns_all_files_in_name_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"x").unwrap();
    fs::write(dir.path().join("a.ogg"), b"x").unwrap();
    fs::write(dir.path().join("c.txt"), b"x").unwrap();

    let files = select_directory(dir.path(), &LibrarySettings::default());
    let names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["a.ogg", "b.MP3", "c.txt"]);
}

#[test]
fn select_directory_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"x").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    let files = select_directory(dir.path(), &settings);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name(), "visible.mp3");
}

#[test]
fn select_directory_respects_recursive_false_and_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(d1.join("one.mp3"), b"x").unwrap();
    fs::write(d2.join("two.mp3"), b"x").unwrap();

    let flat = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let names: Vec<String> = select_directory(dir.path(), &flat)
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert_eq!(names, vec!["root.mp3"]);

    // WalkDir depth counts root as 0, so max_depth=2 reaches d1/* but not d1/d2/*.
    let capped = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let names: Vec<String> = select_directory(dir.path(), &capped)
        .iter()
        .map(|f| f.name().to_string())
        .collect();
    assert!(names.contains(&"root.mp3".to_string()));
    assert!(names.contains(&"one.mp3".to_string()));
    assert!(!names.contains(&"two.mp3".to_string()));
}

#[test]
fn select_paths_expands_directories_and_keeps_files() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("album");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("01.mp3"), b"x").unwrap();
    fs::write(sub.join("02.mp3"), b"x").unwrap();
    let single = dir.path().join("single.flac");
    fs::write(&single, b"x").unwrap();

    let files = select_paths(&[single.clone(), sub.clone()], &LibrarySettings::default());
    let names: Vec<&str> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["single.flac", "01.mp3", "02.mp3"]);

    let missing = PathBuf::from("/definitely/not/here.mp3");
    let files = select_paths(&[missing], &LibrarySettings::default());
    assert_eq!(files.len(), 1);
}
