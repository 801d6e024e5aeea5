use super::*;

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "overlay_font_catalog_{tag}_{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn discover_filters_by_extension_and_sorts() {
    let dir = scratch_dir("filter");
    for name in ["b.ttf", "a.OTF", "c.txt", "d.woff"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir_all(dir.join("nested.ttf")).unwrap();

    let cat = FontCatalog::discover(&dir, &["ttf".to_string(), ".otf".to_string()]).unwrap();
    let names: Vec<_> = cat
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.OTF", "b.ttf"]);
    assert_eq!(cat.len(), 2);
    assert!(cat.path(2).is_none());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn discover_without_matches_is_configuration_error() {
    let dir = scratch_dir("empty");
    std::fs::write(dir.join("readme.md"), b"x").unwrap();
    let err = FontCatalog::discover(&dir, &["ttf".to_string()]).unwrap_err();
    assert!(matches!(err, OverlayError::Configuration(_)));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_directory_is_configuration_error() {
    let err = FontCatalog::discover(Path::new("/definitely/not/here"), &["ttf".to_string()])
        .unwrap_err();
    assert!(matches!(err, OverlayError::Configuration(_)));
}

#[test]
fn from_paths_rejects_empty() {
    assert!(FontCatalog::from_paths(vec![]).is_err());
    let cat = FontCatalog::from_paths(vec![PathBuf::from("x.ttf")]).unwrap();
    assert!(!cat.is_empty());
}
