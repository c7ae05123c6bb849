//! Integration tests for directory analysis through the binary

#[cfg(test)]
mod directory_tests {
    use std::fs;
    use std::path::Path;
    use std::process::Command;
    use tempfile::tempdir;

    fn run_jsonshape(args: &[&str]) -> (bool, String, String) {
        let output = Command::new(env!("CARGO_BIN_EXE_jsonshape"))
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run jsonshape");

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        (output.status.success(), stdout, stderr)
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_report_for_three_documents() {
        let input = tempdir().unwrap();
        write(input.path(), "one.json", r#"{"a": 1, "b": 2}"#);
        write(input.path(), "two.json", r#"{"a": 3, "b": 4}"#);
        write(input.path(), "three.json", r#"{"a": 5, "c": 6}"#);
        write(input.path(), "readme.txt", "ignored");

        let output = tempdir().unwrap();
        let (ok, stdout, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "--output",
            output.path().to_str().unwrap(),
            "--no-timestamp",
        ]);
        assert!(ok, "run failed: {}", stderr);
        assert!(stdout.contains("Found 3 JSON files"), "{}", stdout);

        let report =
            fs::read_to_string(output.path().join("json_analysis_report.txt")).unwrap();
        assert!(report.contains("Total files analyzed: 3"));
        assert!(report.contains("  a: 3 (100.00%)"));
        assert!(report.contains("  b: 2 (66.67%)"));
        assert!(report.contains("  c: 1 (33.33%)"));
        assert!(report.contains("  one.json: b"));
        assert!(report.contains("  three.json: c"));
        assert!(report.contains("  Group 1 (2 files):\n    Fields: a, b\n    Files: one.json, two.json"));
        assert!(report.contains("  Group 2 (1 files):\n    Fields: a, c\n    Files: three.json"));
    }

    #[test]
    fn test_empty_directory_reports_zero_files() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let (ok, _stdout, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--no-timestamp",
        ]);
        assert!(ok, "empty corpus must not fail: {}", stderr);
        assert!(stderr.contains("No JSON files found"));

        let report =
            fs::read_to_string(output.path().join("json_analysis_report.txt")).unwrap();
        assert!(report.contains("Total files analyzed: 0"));
    }

    #[test]
    fn test_recursive_flag() {
        let input = tempdir().unwrap();
        fs::create_dir_all(input.path().join("nested")).unwrap();
        write(input.path(), "top.json", r#"{"id": 1}"#);
        write(&input.path().join("nested"), "deep.json", r#"{"id": 2, "x": true}"#);

        let output = tempdir().unwrap();
        let (ok, _, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--no-timestamp",
            "--quiet",
        ]);
        assert!(ok, "{}", stderr);
        let flat = fs::read_to_string(output.path().join("json_analysis_report.txt")).unwrap();
        assert!(flat.contains("Total files analyzed: 1"));

        let (ok, _, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--no-timestamp",
            "--quiet",
            "--recursive",
        ]);
        assert!(ok, "{}", stderr);
        let deep = fs::read_to_string(output.path().join("json_analysis_report.txt")).unwrap();
        assert!(deep.contains("Total files analyzed: 2"));
        assert!(deep.contains("  nested/deep.json: x"));
    }

    #[test]
    fn test_missing_input_directory_fails() {
        let input = tempdir().unwrap();
        let missing = input.path().join("missing");
        let (ok, _, stderr) = run_jsonshape(&[missing.to_str().unwrap(), "--quiet"]);
        assert!(!ok);
        assert!(stderr.contains("not a directory"), "{}", stderr);
    }

    #[test]
    fn test_top_level_mode() {
        let input = tempdir().unwrap();
        write(input.path(), "a.json", r#"{"id": 1, "meta": {"x": 1}}"#);
        write(input.path(), "b.json", r#"{"id": 2, "meta": {"y": 1}}"#);

        let output = tempdir().unwrap();
        let (ok, _, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--no-timestamp",
            "--quiet",
            "--top-level",
        ]);
        assert!(ok, "{}", stderr);

        let report =
            fs::read_to_string(output.path().join("json_analysis_report.txt")).unwrap();
        assert!(report.contains("  Group 1 (2 files):\n    Fields: id, meta"));
        assert!(!report.contains("Group 2"));
    }
}
