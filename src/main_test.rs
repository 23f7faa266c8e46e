#[cfg(test)]
mod tests {
    use crate::{Args, SystemArg, config_from_args, read_gate_records, write_layout};
    use clap::Parser;
    use gate_layout::{
        CoordinateSystem, ExclusionReason, GateRecord, GateStatus, ImageExtent,
        build_layout_from_rows,
    };
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_main_program() {
        let test_csv = "id,name,latitude,longitude,x,y,status,health_score,activity_count
gate-1,North A,40.7128,-74.0060,,,active,95,12
gate-2,North B,40.7129,-74.0061,,,active,,15
gate-3,South,40.7000,-74.0200,,,maintenance,60,0
gate-4,Nowhere,,,,,inactive,,
gate-5,Confused,40.7,-74.0,10,10,active,,";

        let test_file = PathBuf::from("test_gates_layout.csv");
        fs::write(&test_file, test_csv).expect("Failed to create test CSV");

        let rows = read_gate_records(&test_file).expect("Failed to read CSV");
        fs::remove_file(&test_file).ok();

        assert_eq!(rows.len(), 5);
        let records: Vec<&GateRecord> = rows.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].name.as_deref(), Some("North A"));
        assert_eq!(records[1].health_score, None);
        assert_eq!(records[2].status, Some(GateStatus::Maintenance));
        assert_eq!(records[3].latitude, None);
        assert_eq!(records[3].activity_count, None);

        let args = Args::parse_from(["gate_layout"]);
        let config = config_from_args(&args).expect("default flags are valid");
        let layout = build_layout_from_rows(rows, &config).expect("layout");

        assert_eq!(layout.markers.len(), 2);
        assert_eq!(layout.markers[0].gate_ids, vec!["gate-1", "gate-2"]);
        assert_eq!(layout.markers[0].activity, 27);

        let excluded: Vec<(&str, ExclusionReason)> = layout
            .excluded
            .iter()
            .map(|e| (e.id.as_str(), e.reason))
            .collect();
        assert_eq!(
            excluded,
            vec![
                ("gate-4", ExclusionReason::MissingCoordinates),
                ("gate-5", ExclusionReason::AmbiguousCoordinates),
            ]
        );

        let mut out = Vec::new();
        write_layout(&mut out, &layout).expect("json");
        let json: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
        assert_eq!(json["markers"].as_array().map(|m| m.len()), Some(2));
        assert_eq!(json["system"]["kind"], "geographic");
        assert_eq!(json["excluded"][0]["reason"], "missing_coordinates");
    }

    #[test]
    fn test_camel_case_headers() {
        let test_csv = "id,x,y,healthScore,activityCount
a,10,20,75,3";
        let test_file = PathBuf::from("test_gates_camel.csv");
        fs::write(&test_file, test_csv).expect("Failed to create test CSV");

        let rows = read_gate_records(&test_file).expect("Failed to read CSV");
        fs::remove_file(&test_file).ok();

        assert_eq!(rows.len(), 1);
        let record = rows[0].as_ref().expect("valid row");
        assert_eq!(record.health_score, Some(75.0));
        assert_eq!(record.activity_count, Some(3));
        assert_eq!(record.x, Some(10.0));
    }

    #[test]
    fn test_malformed_rows_are_excluded() {
        let test_csv = "id,latitude,longitude,status
a,40.7128,-74.0060,active
b,n/a,-74.0061,active
c,40.7129,-74.0062,closed
,oops,-74.0,active
d,40.7130,-74.0063,maintenance";

        let test_file = PathBuf::from("test_gates_malformed.csv");
        fs::write(&test_file, test_csv).expect("Failed to create test CSV");

        let rows = read_gate_records(&test_file).expect("bad cells do not fail the read");
        fs::remove_file(&test_file).ok();

        // the row without an id is dropped
        assert_eq!(rows.len(), 4);

        let args = Args::parse_from(["gate_layout"]);
        let config = config_from_args(&args).expect("default flags are valid");
        let layout = build_layout_from_rows(rows, &config).expect("layout");

        let placed: Vec<&str> = layout
            .markers
            .iter()
            .flat_map(|m| m.gate_ids.iter().map(|id| id.as_str()))
            .collect();
        assert_eq!(placed, vec!["a", "d"]);

        let excluded: Vec<(&str, ExclusionReason)> = layout
            .excluded
            .iter()
            .map(|e| (e.id.as_str(), e.reason))
            .collect();
        assert_eq!(
            excluded,
            vec![
                ("b", ExclusionReason::MalformedRecord),
                ("c", ExclusionReason::MalformedRecord),
            ]
        );
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from([
            "gate_layout",
            "--image-width",
            "640",
            "--image-height",
            "480",
            "--threshold",
            "15",
            "--max-zoom",
            "4",
            "--min-zoom",
            "-2",
        ]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(
            config.system,
            Some(CoordinateSystem::Image {
                extent: Some(ImageExtent {
                    width: 640.0,
                    height: 480.0
                })
            })
        );
        assert_eq!(config.distance_threshold, Some(15.0));
        assert_eq!(config.zoom_range.min, -2.0);
        assert_eq!(config.zoom_range.max, 4.0);

        let args = Args::parse_from(["gate_layout", "--system", "geo"]);
        assert_eq!(args.system, Some(SystemArg::Geo));
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.system, Some(CoordinateSystem::Geographic));

        let args = Args::parse_from(["gate_layout", "--image-width", "640"]);
        assert!(config_from_args(&args).is_err());

        let args = Args::parse_from(["gate_layout", "--min-zoom", "9", "--max-zoom", "3"]);
        assert!(config_from_args(&args).is_err());
    }
}
