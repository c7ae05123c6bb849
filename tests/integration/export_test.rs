//! Integration tests for report formats and per-group table export

#[cfg(test)]
mod export_tests {
    use std::fs;
    use std::process::Command;
    use tempfile::tempdir;

    use jsonshape::analysis::AnalysisConfig;
    use jsonshape::report::{GroupTable, OutputWriter};
    use jsonshape::AnalysisEngine;

    fn run_jsonshape(args: &[&str]) -> (bool, String, String) {
        let output = Command::new(env!("CARGO_BIN_EXE_jsonshape"))
            .args(args)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run jsonshape");

        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
    }

    #[test]
    fn test_tables_written_per_group() {
        let input = tempdir().unwrap();
        fs::write(
            input.path().join("a.json"),
            r#"{"user": {"name": "Ann"}, "items": [{"id": 1}, {"id": 2}]}"#,
        )
        .unwrap();
        fs::write(input.path().join("b.json"), r#"{"user": {"name": "Bo, Jr."}}"#).unwrap();

        let output = tempdir().unwrap();
        let (ok, stdout, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--tables",
        ]);
        assert!(ok, "{}", stderr);
        assert!(stdout.contains("Group 1 table saved to:"), "{}", stdout);

        let first = fs::read_to_string(output.path().join("group_1_table.csv")).unwrap();
        let mut lines = first.lines();
        assert_eq!(
            lines.next().unwrap(),
            "file_name,file_path,field_names,items[0].id,items[1].id,user.name"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("a.json,"));
        assert!(row.ends_with(",\"items[0].id, items[1].id, user.name\",1,2,Ann"));

        let second = fs::read_to_string(output.path().join("group_2_table.csv")).unwrap();
        assert!(second.contains("\"Bo, Jr.\""));

        // Timestamped report name
        let reports: Vec<String> = fs::read_dir(output.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.ends_with("_json_analysis_report.txt"))
            .collect();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].len(), "YYYYmmdd-HHMMSS_json_analysis_report.txt".len());
    }

    #[test]
    fn test_json_report_format() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("a.json"), r#"{"a": 1, "b": 2}"#).unwrap();
        fs::write(input.path().join("b.json"), r#"{"a": 1, "c": 2}"#).unwrap();

        let output = tempdir().unwrap();
        let (ok, _, stderr) = run_jsonshape(&[
            input.path().to_str().unwrap(),
            "-o",
            output.path().to_str().unwrap(),
            "--format",
            "json",
            "--no-timestamp",
            "--quiet",
        ]);
        assert!(ok, "{}", stderr);

        let content =
            fs::read_to_string(output.path().join("json_analysis_report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["total_documents"], 2);
        assert_eq!(value["common_fields"], serde_json::json!(["a"]));
        assert_eq!(value["statistics"]["group_count"], 2);
    }

    #[test]
    fn test_tables_reload_when_records_not_retained() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("a.json"), r#"{"k": [1, 2]}"#).unwrap();

        let engine = AnalysisEngine::new(AnalysisConfig::default()).unwrap();
        let report = engine.scan(input.path()).unwrap();
        assert!(report.analysis.groups[0].members[0].record.is_none());

        let table = GroupTable::build(&report.analysis.groups[0], |member| {
            engine.reload_record(&member.path)
        })
        .unwrap();
        assert_eq!(table.rows[0][3], "Array[2]");

        let output = tempdir().unwrap();
        let path = OutputWriter::new(output.path(), false)
            .write_table(&table)
            .unwrap();
        assert!(fs::read_to_string(path).unwrap().contains("Array[2]"));
    }
}
