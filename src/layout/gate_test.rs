#[cfg(test)]
mod tests {
    use crate::layout::error::ExclusionReason;
    use crate::layout::gate::{
        DEFAULT_HEALTH_SCORE, ExcludedGate, Gate, GateRecord, GateStatus, Location,
        gates_from_records, resolve_coordinate_system,
    };
    use crate::layout::point::{CoordinateSystem, ImageExtent, Point};

    fn record(id: &str) -> GateRecord {
        GateRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_record_geo() {
        let gate = Gate::from_record(GateRecord {
            name: Some("North Gate".to_string()),
            latitude: Some(45.5),
            longitude: Some(-120.25),
            status: Some(GateStatus::Maintenance),
            health_score: Some(80.0),
            activity_count: Some(7),
            ..record("n1")
        })
        .unwrap();

        assert_eq!(
            gate.location,
            Some(Location::Geo {
                latitude: 45.5,
                longitude: -120.25
            })
        );
        assert_eq!(gate.location.unwrap().point(), Point::new(-120.25, 45.5));
        assert_eq!(gate.name.as_deref(), Some("North Gate"));
        assert_eq!(gate.status, GateStatus::Maintenance);
        assert_eq!(gate.health_score, 80.0);
        assert_eq!(gate.activity_count, 7);
    }

    #[test]
    fn test_from_record_defaults() {
        let gate = Gate::from_record(GateRecord {
            x: Some(10.0),
            y: Some(20.0),
            name: Some(String::new()),
            ..record("i1")
        })
        .unwrap();

        assert_eq!(gate.location, Some(Location::Image { x: 10.0, y: 20.0 }));
        assert_eq!(gate.name, None);
        assert_eq!(gate.status, GateStatus::Active);
        assert_eq!(gate.health_score, DEFAULT_HEALTH_SCORE);
        assert_eq!(gate.activity_count, 0);
    }

    #[test]
    fn test_from_record_clamps_health() {
        let high = Gate::from_record(GateRecord {
            health_score: Some(140.0),
            ..record("a")
        })
        .unwrap();
        let low = Gate::from_record(GateRecord {
            health_score: Some(-3.0),
            ..record("b")
        })
        .unwrap();
        assert_eq!(high.health_score, 100.0);
        assert_eq!(low.health_score, 0.0);
    }

    #[test]
    fn test_from_record_both_or_neither() {
        let both = Gate::from_record(GateRecord {
            latitude: Some(1.0),
            longitude: Some(2.0),
            x: Some(3.0),
            y: Some(4.0),
            ..record("both")
        })
        .unwrap_err();
        assert_eq!(both.id, "both");
        assert_eq!(both.reason, ExclusionReason::AmbiguousCoordinates);

        let half = Gate::from_record(GateRecord {
            latitude: Some(1.0),
            ..record("half")
        })
        .unwrap();
        assert_eq!(half.location, None);
        assert_eq!(
            half.usable_point(&CoordinateSystem::Geographic),
            Err(ExclusionReason::MissingCoordinates)
        );
    }

    #[test]
    fn test_usable_point_image_extent() {
        let system = CoordinateSystem::Image {
            extent: Some(ImageExtent {
                width: 640.0,
                height: 480.0,
            }),
        };
        assert_eq!(
            Gate::image("in", 320.0, 240.0).usable_point(&system),
            Ok(Point::new(320.0, 240.0))
        );
        assert_eq!(
            Gate::image("out", 700.0, 240.0).usable_point(&system),
            Err(ExclusionReason::OutOfRange)
        );
        assert_eq!(
            Gate::geo("geo", 1.0, 1.0).usable_point(&system),
            Err(ExclusionReason::CoordinateSystemMismatch)
        );
    }

    #[test]
    fn test_gates_from_records() {
        let records = vec![
            GateRecord {
                latitude: Some(1.0),
                longitude: Some(1.0),
                ..record("a")
            },
            GateRecord {
                latitude: Some(1.0),
                longitude: Some(1.0),
                x: Some(1.0),
                y: Some(1.0),
                ..record("b")
            },
            record("c"),
        ];
        let (gates, excluded) = gates_from_records(records.into_iter().map(Ok));
        let ids: Vec<(usize, &str)> = gates.iter().map(|(row, g)| (*row, g.id.as_str())).collect();
        assert_eq!(ids, vec![(0, "a"), (2, "c")]);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].0, 1);
        assert_eq!(excluded[0].1.reason, ExclusionReason::AmbiguousCoordinates);
    }

    #[test]
    fn test_gates_from_records_keeps_reader_exclusions() {
        let rows = vec![
            Err(ExcludedGate {
                id: "garbled".to_string(),
                reason: ExclusionReason::MalformedRecord,
            }),
            Ok(record("a")),
        ];
        let (gates, excluded) = gates_from_records(rows);
        assert_eq!(gates.len(), 1);
        assert_eq!(gates[0].0, 1);
        assert_eq!(excluded[0].0, 0);
        assert_eq!(excluded[0].1.reason, ExclusionReason::MalformedRecord);
    }

    #[test]
    fn test_resolve_coordinate_system() {
        let gates = vec![
            Gate::new("none", None),
            Gate::image("nan", f64::NAN, 1.0),
            Gate::image("img", 1.0, 1.0),
            Gate::geo("geo", 1.0, 1.0),
        ];
        assert_eq!(
            resolve_coordinate_system(&gates, None),
            Some(CoordinateSystem::Image { extent: None })
        );
        assert_eq!(
            resolve_coordinate_system(&gates, Some(CoordinateSystem::Geographic)),
            Some(CoordinateSystem::Geographic)
        );
        assert_eq!(resolve_coordinate_system(&gates[..2], None), None);
        assert_eq!(resolve_coordinate_system(&[], None), None);

        // an out-of-range geographic gate does not decide the system
        let gates = vec![Gate::geo("bad", 200.0, 10.0), Gate::image("img", 10.0, 10.0)];
        assert_eq!(
            resolve_coordinate_system(&gates, None),
            Some(CoordinateSystem::Image { extent: None })
        );
        assert_eq!(resolve_coordinate_system(&gates[..1], None), None);
    }
}
