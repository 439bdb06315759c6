//! End-to-end tests: descriptor on disk → krom.gypi / krom_libs.gypi.

use std::path::{Path, PathBuf};

use krom_gyp::config::Config;
use krom_gyp::error::ProjectError;
use krom_gyp::platform::Platform;
use krom_gyp::projection::{LibraryProjection, SourceProjection};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// A scratch directory with the named fixture copied to `build/Krom.json`.
fn workspace_with(name: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("build")).unwrap();
    std::fs::copy(fixture(name), dir.path().join("build/Krom.json")).unwrap();
    dir
}

fn offline_config() -> Config {
    let mut cfg = Config::default();
    cfg.generator.enabled = false;
    cfg
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn writes_both_projections_for_win32() {
    let dir = workspace_with("Krom.json");
    let written =
        krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("win32")).unwrap();

    assert_eq!(written.sources, dir.path().join("krom.gypi"));
    assert_eq!(written.libraries, dir.path().join("krom_libs.gypi"));

    let sources: SourceProjection = read_json(&written.sources);
    assert_eq!(
        sources.sources,
        [
            "src/krom/main.cpp",
            "Kinc/Sources/kinc/graphics4/graphics.c",
            "Kinc/Backends/System/Windows/Sources/kinc/backend/system.c",
            "Sources/main.cpp",
            "Sources/debug.cpp",
        ]
    );
    assert_eq!(
        sources.include_dirs,
        [
            "Kinc/Sources",
            "Kinc/Backends/System/Windows/Sources",
            "Chakra/Build/include",
        ]
    );
    assert_eq!(
        sources.defines,
        ["KINC_NO_MAIN", "KINC_G4", "KORE_WINDOWS", "_CRT_SECURE_NO_WARNINGS"]
    );

    let libraries: LibraryProjection = read_json(&written.libraries);
    assert_eq!(
        libraries.libraries,
        ["OleAut32", "dxguid", "dsound", "ChakraCore"]
    );
}

#[test]
fn other_platforms_get_no_fixed_library() {
    let dir = workspace_with("Krom.json");
    let written =
        krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("linux")).unwrap();
    let libraries: LibraryProjection = read_json(&written.libraries);
    assert_eq!(libraries.libraries, ["dxguid", "dsound", "ChakraCore"]);
}

#[test]
fn written_files_use_four_space_indent() {
    let dir = workspace_with("Krom.json");
    let written =
        krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("linux")).unwrap();
    let text = std::fs::read_to_string(&written.libraries).unwrap();
    assert_eq!(
        text,
        "{\n    \"libraries\": [\n        \"dxguid\",\n        \"dsound\",\n        \"ChakraCore\"\n    ]\n}"
    );
}

#[test]
fn project_matches_what_run_writes() {
    let dir = workspace_with("Krom.json");
    let cfg = offline_config();
    let platform = Platform::from("win32");

    let (sources, libraries) = krom_gyp::project(&cfg, dir.path(), &platform).unwrap();
    assert!(!dir.path().join("krom.gypi").exists());

    let written = krom_gyp::run_from_config(&cfg, dir.path(), &platform).unwrap();
    assert_eq!(read_json::<SourceProjection>(&written.sources), sources);
    assert_eq!(read_json::<LibraryProjection>(&written.libraries), libraries);
}

#[test]
fn missing_libraries_leaves_source_projection_behind() {
    let dir = workspace_with("no_libraries.json");
    let err = krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("win32"))
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::MissingField { field: "libraries" })
    ));
    assert!(dir.path().join("krom.gypi").is_file());
    assert!(!dir.path().join("krom_libs.gypi").exists());
}

#[test]
fn absent_descriptor_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("linux"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::DescriptorNotFound { .. })
    ));
}

#[test]
fn malformed_descriptor_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("build")).unwrap();
    std::fs::write(dir.path().join("build/Krom.json"), "{ not json").unwrap();
    let err = krom_gyp::run_from_config(&offline_config(), dir.path(), &Platform::from("linux"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::Parse { .. })
    ));
}

#[test]
fn default_generator_without_kinc_checkout_is_environment_error() {
    let dir = workspace_with("Krom.json");
    let err = krom_gyp::run_from_config(&Config::default(), dir.path(), &Platform::from("linux"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::Environment { .. })
    ));
    assert!(!dir.path().join("krom.gypi").exists());
}

#[test]
fn config_file_paths_resolve_against_its_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("out")).unwrap();
    std::fs::copy(fixture("Krom.json"), dir.path().join("descriptor.json")).unwrap();
    let config_path = dir.path().join("krom-gyp.toml");
    std::fs::write(
        &config_path,
        r#"
[generator]
enabled = false

[descriptor]
path = "descriptor.json"

[sources]
entry_point = "src/app/main.cpp"
output = "out/app.gypi"

[libraries]
platform = "linux"
library = "pthread"
output = "out/app_libs.gypi"
"#,
    )
    .unwrap();

    let written = krom_gyp::run(Some(&config_path), &Platform::from("linux")).unwrap();
    assert_eq!(written.sources, dir.path().join("out/app.gypi"));

    let sources: SourceProjection = read_json(&written.sources);
    assert_eq!(sources.sources[0], "src/app/main.cpp");
    let libraries: LibraryProjection = read_json(&written.libraries);
    assert_eq!(
        libraries.libraries,
        ["pthread", "dxguid", "dsound", "ChakraCore"]
    );
}

#[cfg(unix)]
#[test]
fn generator_output_is_projected() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default();
    cfg.generator.program = PathBuf::from("sh");
    cfg.generator.args = vec![
        "-c".to_string(),
        format!(
            "mkdir -p build && cp '{}' build/Krom.json",
            fixture("Krom.json").display()
        ),
    ];

    let written = krom_gyp::run_from_config(&cfg, dir.path(), &Platform::from("win32")).unwrap();
    let libraries: LibraryProjection = read_json(&written.libraries);
    assert_eq!(libraries.libraries[0], "OleAut32");
}

#[cfg(unix)]
#[test]
fn failing_generator_stops_before_projection() {
    let dir = workspace_with("Krom.json");
    let mut cfg = Config::default();
    cfg.generator.program = PathBuf::from("false");
    cfg.generator.args = vec![];

    let err = krom_gyp::run_from_config(&cfg, dir.path(), &Platform::from("win32")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::Process { .. })
    ));
    assert!(!dir.path().join("krom.gypi").exists());
}
