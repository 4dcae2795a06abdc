use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use erd_cli::{Args, Emit, run};

/// Collects all .erd files from a directory
fn collect_erd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("erd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &Path, output: &Path, emit: Emit) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        emit,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_erd_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed = Vec::new();

    for demo in &valid_demos {
        for emit in [Emit::Model, Emit::Tree, Emit::Source] {
            let output_path = temp_dir.path().join(format!(
                "{}.{emit:?}.txt",
                demo.file_stem().unwrap().to_string_lossy()
            ));

            match run(&args_for(demo, &output_path, emit)) {
                Ok(()) => assert!(output_path.exists(), "{} produced no output", demo.display()),
                Err(e) => failed.push((demo.clone(), emit, e)),
            }
        }
    }

    if !failed.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, emit, err) in &failed {
            eprintln!("  - {} ({emit:?}): {}", path.display(), err);
        }
        panic!("{} valid demo run(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_erd_files(demos_path().join("errors"));
    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.txt",
            demo.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo, &output_path, Emit::Model)).is_ok() {
            unexpectedly_succeeded.push(demo.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_source_output_is_stable() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demo = demos_path().join("simple.erd");

    let first = temp_dir.path().join("first.erd");
    run(&args_for(&demo, &first, Emit::Source)).expect("Failed to format demo");

    let second = temp_dir.path().join("second.erd");
    run(&args_for(&first, &second, Emit::Source)).expect("Failed to format formatted demo");

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}
