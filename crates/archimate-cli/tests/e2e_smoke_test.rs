use std::{fs, path::PathBuf};

use tempfile::tempdir;

use archimate::{ArchimateError, ArchimateModel, config::AppConfig, layout::LayoutAlgorithm};
use archimate_cli::{Args, Command, run};

/// Collects all .archimate files from a directory
fn collect_model_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("archimate")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos")
}

fn args(command: Command) -> Args {
    Args {
        command,
        config: None,
        log_level: "off".to_string(),
    }
}

fn load(path: &PathBuf) -> ArchimateModel {
    let text = fs::read_to_string(path).expect("Failed to read output");
    ArchimateModel::from_document(&text, AppConfig::default()).expect("Failed to parse output")
}

#[test]
fn e2e_smoke_test_roundtrip_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_model_files(demos_path());

    assert!(!demos.is_empty(), "No demo models found in demos/");

    for demo_path in &demos {
        let output_path = temp_dir.path().join(demo_path.file_name().expect("file name"));

        let command = Command::Roundtrip {
            input: demo_path.to_string_lossy().to_string(),
            output: output_path.to_string_lossy().to_string(),
        };
        run(&args(command), &mut Vec::new()).expect("Failed to round trip");

        assert_eq!(load(&output_path).model(), load(demo_path).model());
    }
}

#[test]
fn e2e_inspect_reports_counts() {
    let demo_path = demos_path().join("retail.archimate");
    let mut out = Vec::new();

    let command = Command::Inspect {
        input: demo_path.to_string_lossy().to_string(),
    };
    run(&args(command), &mut out).expect("Failed to inspect");

    let report = String::from_utf8(out).expect("utf-8 report");
    assert!(report.contains("Model: Retail & Logistics"));
    assert!(report.contains("Relationships: 3"));
    assert!(report.contains("Ordering (2 objects)"));
}

#[test]
fn e2e_generate_view() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("generated.archimate");

    let command = Command::GenerateView {
        input: demos_path()
            .join("retail.archimate")
            .to_string_lossy()
            .to_string(),
        name: "Generated".to_string(),
        elements: vec![
            "id-svc00000000000000000000000000001".to_string(),
            "id-prc00000000000000000000000000001".to_string(),
        ],
        layout: Some(LayoutAlgorithm::Hierarchical),
        no_relationships: false,
        output: Some(output_path.to_string_lossy().to_string()),
    };
    run(&args(command), &mut Vec::new()).expect("Failed to generate view");

    let model = load(&output_path);
    let views = model.list_views();
    assert_eq!(views.len(), 2);

    let generated = &views[1];
    assert_eq!(generated.name, "Generated");
    let objects = generated.diagram_objects();
    assert_eq!(objects.len(), 2);
    assert_eq!((objects[1].bounds.x, objects[1].bounds.y), (50.0, 125.0));
    assert_eq!(objects[0].source_connections.len(), 1);
    assert_eq!(
        objects[0].source_connections[0]
            .archimate_relationship
            .as_deref(),
        Some("id-rel00000000000000000000000000001")
    );
}

#[test]
fn e2e_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let invalid_path = temp_dir.path().join("invalid.archimate");
    fs::write(&invalid_path, "<archimate:model name=\"x\"><folder></archimate:model>")
        .expect("Failed to write");
    let command = Command::Inspect {
        input: invalid_path.to_string_lossy().to_string(),
    };
    assert!(matches!(
        run(&args(command), &mut Vec::new()),
        Err(ArchimateError::Parse { .. })
    ));

    let command = Command::GenerateView {
        input: demos_path()
            .join("retail.archimate")
            .to_string_lossy()
            .to_string(),
        name: "Broken".to_string(),
        elements: vec!["id-missing".to_string()],
        layout: None,
        no_relationships: true,
        output: Some(
            temp_dir
                .path()
                .join("broken.archimate")
                .to_string_lossy()
                .to_string(),
        ),
    };
    assert!(matches!(
        run(&args(command), &mut Vec::new()),
        Err(ArchimateError::ElementNotFound { .. })
    ));

    let command = Command::Inspect {
        input: temp_dir
            .path()
            .join("absent.archimate")
            .to_string_lossy()
            .to_string(),
    };
    assert!(matches!(
        run(&args(command), &mut Vec::new()),
        Err(ArchimateError::Io(_))
    ));
}
