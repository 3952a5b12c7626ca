//! Unit tests for sr-hazard.

use sr_core::{CoreError, Coordinate, HourLayer};

use crate::{HazardField, HazardFieldBuilder, RiskConfig, RiskModel};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Ten buckets of width 1.0 with probability `i / 10` in bucket `i`.
fn ramp_model() -> RiskModel {
    let probs = (0..10).map(|i| i as f64 / 10.0).collect();
    RiskModel::new(probs, &RiskConfig { bucket_width: 1.0, bucket_count: 10 }).unwrap()
}

/// 4×4 field over 2 hours where intensity = x + y + 10 * hour.
fn gradient_field() -> HazardField {
    let mut b = HazardFieldBuilder::new(4, 4, 2).unwrap().day(3);
    for h in 0..2 {
        for x in 0..4 {
            for y in 0..4 {
                b.set(HourLayer(h), Coordinate::new(x, y), (x + y + 10 * h) as f64)
                    .unwrap();
            }
        }
    }
    b.build()
}

// ── RiskModel ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod risk_model {
    use super::*;
    use crate::HazardError;

    #[test]
    fn bucket_lookup_floors() {
        let m = ramp_model();
        assert_eq!(m.probability_of_failure(0.0).unwrap(), 0.0);
        assert_eq!(m.probability_of_failure(0.99).unwrap(), 0.0);
        assert_eq!(m.probability_of_failure(1.0).unwrap(), 0.1);
        assert_eq!(m.probability_of_failure(3.7).unwrap(), 0.3);
    }

    #[test]
    fn saturates_past_table_end() {
        let m = ramp_model();
        let edge = m.bucket_count() as f64 * m.bucket_width();
        let at_edge = m.probability_of_failure(edge).unwrap();
        let far_out = m.probability_of_failure(10.0 * edge).unwrap();
        assert_eq!(at_edge, far_out);
        assert_eq!(at_edge, 0.9);
        assert_eq!(m.probability_of_failure(1e300).unwrap(), 0.9);
    }

    #[test]
    fn survival_is_complement() {
        let m = ramp_model();
        assert!((m.survival(2.5).unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn negative_intensity_is_an_error() {
        let m = ramp_model();
        assert!(matches!(
            m.probability_of_failure(-0.1),
            Err(HazardError::InvalidIntensity(_))
        ));
        assert!(m.probability_of_failure(f64::NAN).is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        let config = RiskConfig::default();
        let result = RiskModel::new(vec![0.0; 59], &config);
        assert!(matches!(result, Err(HazardError::Config(_))));
    }

    #[test]
    fn out_of_range_probability_rejected() {
        let config = RiskConfig { bucket_width: 1.0, bucket_count: 3 };
        assert!(RiskModel::new(vec![0.0, 1.01, 0.5], &config).is_err());
        assert!(RiskModel::new(vec![0.0, -0.01, 0.5], &config).is_err());
        assert!(RiskModel::new(vec![0.0, f64::NAN, 0.5], &config).is_err());
        assert!(RiskModel::new(vec![0.0, 1.0, 0.5], &config).is_ok());
    }

    #[test]
    fn invalid_config_rejected() {
        let zero_width = RiskConfig { bucket_width: 0.0, bucket_count: 1 };
        assert!(RiskModel::new(vec![0.0], &zero_width).is_err());
        let no_buckets = RiskConfig { bucket_width: 1.0, bucket_count: 0 };
        assert!(RiskModel::new(vec![], &no_buckets).is_err());
    }

    #[test]
    fn constant_model() {
        let m = RiskModel::constant(0.25, 4).unwrap();
        assert_eq!(m.probability_of_failure(0.0).unwrap(), 0.25);
        assert_eq!(m.probability_of_failure(99.0).unwrap(), 0.25);
    }
}

// ── HazardField ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod hazard_field {
    use super::*;
    use crate::HazardError;

    #[test]
    fn unwritten_cells_are_calm() {
        let f = HazardFieldBuilder::new(3, 2, 1).unwrap().build();
        assert_eq!(f.intensity_at(HourLayer(0), Coordinate::new(2, 1)).unwrap(), 0.0);
        assert_eq!(f.max_intensity(), 0.0);
        assert_eq!(f.day(), None);
    }

    #[test]
    fn indexing_by_layer_and_cell() {
        let f = gradient_field();
        assert_eq!(f.intensity_at(HourLayer(0), Coordinate::new(3, 1)).unwrap(), 4.0);
        assert_eq!(f.intensity_at(HourLayer(1), Coordinate::new(0, 2)).unwrap(), 12.0);
        assert_eq!(f.day(), Some(3));
        assert_eq!(f.max_intensity(), 16.0);
    }

    #[test]
    fn layer_slice_is_x_major() {
        let f = gradient_field();
        let layer = f.layer(HourLayer(1)).unwrap();
        assert_eq!(layer.len(), 16);
        assert_eq!(layer[0], 10.0);
        assert_eq!(layer[4 + 3], 14.0); // x=1, y=3
        assert!(f.layer(HourLayer(2)).is_none());
    }

    #[test]
    fn out_of_bounds_reads_rejected() {
        let f = gradient_field();
        assert!(f.intensity_at(HourLayer(0), Coordinate::new(4, 0)).is_err());
        assert!(f.intensity_at(HourLayer(2), Coordinate::new(0, 0)).is_err());
    }

    #[test]
    fn layer_past_field_is_out_of_range() {
        let f = gradient_field();
        assert!(matches!(
            f.intensity_at(HourLayer(2), Coordinate::new(0, 0)),
            Err(HazardError::Core(CoreError::LayerOutOfRange { layer: HourLayer(2), count: 2 }))
        ));
    }

    #[test]
    fn builder_rejects_bad_writes() {
        let mut b = HazardFieldBuilder::new(2, 2, 1).unwrap();
        assert!(matches!(
            b.set(HourLayer(0), Coordinate::new(0, 0), -1.0),
            Err(HazardError::InvalidIntensity(_))
        ));
        assert!(matches!(
            b.set(HourLayer(0), Coordinate::new(2, 0), 1.0),
            Err(HazardError::Core(_))
        ));
        assert!(matches!(
            b.set(HourLayer(1), Coordinate::new(0, 0), 1.0),
            Err(HazardError::Core(CoreError::LayerOutOfRange { .. }))
        ));
        assert!(matches!(
            b.fill_layer(HourLayer(1), 1.0),
            Err(HazardError::Core(CoreError::LayerOutOfRange { .. }))
        ));
    }

    #[test]
    fn zero_extent_rejected() {
        assert!(HazardFieldBuilder::new(0, 3, 1).is_err());
        assert!(HazardFieldBuilder::new(3, 3, 0).is_err());
    }

    #[test]
    fn set_all_hours_writes_every_layer() {
        let mut b = HazardFieldBuilder::new(2, 2, 3).unwrap();
        b.set_all_hours(Coordinate::new(1, 1), 7.0).unwrap();
        let f = b.build();
        for h in 0..3 {
            assert_eq!(f.intensity_at(HourLayer(h), Coordinate::new(1, 1)).unwrap(), 7.0);
            assert_eq!(f.intensity_at(HourLayer(h), Coordinate::new(0, 1)).unwrap(), 0.0);
        }
    }
}

// ── Loaders ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loaders {
    use std::io::Cursor;

    use super::*;
    use crate::{
        GridSpec, HazardError, load_cities_reader, load_field_reader, load_risk_reader,
        scan_dimensions_reader,
    };

    const HAZARD_CSV: &str = "\
xid,yid,date_id,hour,wind\n\
1,1,2,3,4.5\n\
2,1,2,3,16.0\n\
3,2,2,4,1.25\n\
";

    #[test]
    fn scan_finds_extents() {
        let grid = scan_dimensions_reader(Cursor::new(HAZARD_CSV)).unwrap();
        assert_eq!(grid, GridSpec { xsize: 3, ysize: 2, first_hour: 3, hour_count: 2 });
    }

    #[test]
    fn load_translates_to_zero_based() {
        let grid = scan_dimensions_reader(Cursor::new(HAZARD_CSV)).unwrap();
        let f = load_field_reader(Cursor::new(HAZARD_CSV), &grid).unwrap();
        assert_eq!(f.intensity_at(HourLayer(0), Coordinate::new(0, 0)).unwrap(), 4.5);
        assert_eq!(f.intensity_at(HourLayer(0), Coordinate::new(1, 0)).unwrap(), 16.0);
        assert_eq!(f.intensity_at(HourLayer(1), Coordinate::new(2, 1)).unwrap(), 1.25);
        // Not listed → calm.
        assert_eq!(f.intensity_at(HourLayer(1), Coordinate::new(0, 0)).unwrap(), 0.0);
        assert_eq!(f.day(), Some(2));
    }

    #[test]
    fn mixed_days_rejected() {
        let csv = "xid,yid,date_id,hour,wind\n1,1,1,3,1.0\n1,2,2,3,1.0\n";
        let grid = GridSpec { xsize: 2, ysize: 2, first_hour: 3, hour_count: 1 };
        let err = load_field_reader(Cursor::new(csv), &grid).unwrap_err();
        assert!(matches!(err, HazardError::Parse(ref m) if m.contains("more than one day")));
    }

    #[test]
    fn record_outside_grid_rejected() {
        let grid = GridSpec { xsize: 2, ysize: 2, first_hour: 3, hour_count: 1 };
        let bad_x = "xid,yid,date_id,hour,wind\n3,1,1,3,1.0\n";
        assert!(matches!(
            load_field_reader(Cursor::new(bad_x), &grid),
            Err(HazardError::Core(_))
        ));
        let bad_hour = "xid,yid,date_id,hour,wind\n1,1,1,4,1.0\n";
        assert!(load_field_reader(Cursor::new(bad_hour), &grid).is_err());
        let zero_id = "xid,yid,date_id,hour,wind\n0,1,1,3,1.0\n";
        assert!(load_field_reader(Cursor::new(zero_id), &grid).is_err());
        let negative = "xid,yid,date_id,hour,wind\n1,1,1,3,-2.0\n";
        assert!(matches!(
            load_field_reader(Cursor::new(negative), &grid),
            Err(HazardError::InvalidIntensity(_))
        ));
    }

    #[test]
    fn wrong_header_rejected() {
        let csv = "x,y,day,hour,wind\n1,1,1,3,1.0\n";
        assert!(matches!(
            scan_dimensions_reader(Cursor::new(csv)),
            Err(HazardError::Parse(_))
        ));
    }

    #[test]
    fn empty_hazard_file_rejected() {
        let csv = "xid,yid,date_id,hour,wind\n";
        assert!(scan_dimensions_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn cities_sorted_with_origin_first() {
        let csv = "cid,xid,yid\n2,5,5\n0,1,1\n1,3,4\n";
        let cities = load_cities_reader(Cursor::new(csv)).unwrap();
        let ids: Vec<u32> = cities.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(cities[0].coord, Coordinate::new(0, 0));
        assert_eq!(cities[1].coord, Coordinate::new(2, 3));
    }

    #[test]
    fn cities_without_origin_rejected() {
        let csv = "cid,xid,yid\n1,3,4\n2,5,5\n";
        assert!(load_cities_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn duplicate_city_rejected() {
        let csv = "cid,xid,yid\n0,1,1\n1,3,4\n1,5,5\n";
        assert!(load_cities_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn risk_table_skips_comments() {
        let csv = "# bucketed failure probabilities\n# width 1.0\n0.0,0.1, 0.5,1.0\n9,9,9\n";
        let config = RiskConfig { bucket_width: 1.0, bucket_count: 4 };
        let m = load_risk_reader(Cursor::new(csv), &config).unwrap();
        assert_eq!(m.probabilities(), &[0.0, 0.1, 0.5, 1.0]);
    }

    #[test]
    fn risk_table_length_checked() {
        let csv = "0.0,0.1,0.5\n";
        let config = RiskConfig { bucket_width: 1.0, bucket_count: 4 };
        assert!(matches!(
            load_risk_reader(Cursor::new(csv), &config),
            Err(HazardError::Config(_))
        ));
    }

    #[test]
    fn risk_table_non_numeric_rejected() {
        let csv = "0.0,abc\n";
        let config = RiskConfig { bucket_width: 1.0, bucket_count: 2 };
        assert!(matches!(
            load_risk_reader(Cursor::new(csv), &config),
            Err(HazardError::Parse(_))
        ));
    }

    #[test]
    fn risk_table_only_comments_rejected() {
        let csv = "# nothing here\n";
        assert!(load_risk_reader(Cursor::new(csv), &RiskConfig::default()).is_err());
    }
}

// ── Down-sampling ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod aggregate {
    use super::*;
    use crate::{Accumulation, downsample};

    #[test]
    fn mean_blocks() {
        let coarse = downsample(&gradient_field(), 2, Accumulation::Mean).unwrap();
        assert_eq!((coarse.xsize(), coarse.ysize(), coarse.hour_count()), (2, 2, 2));
        // Block (0,0) at hour 0 covers x+y ∈ {0,1,1,2} → mean 1.0
        assert_eq!(coarse.intensity_at(HourLayer(0), Coordinate::new(0, 0)).unwrap(), 1.0);
        // Block (1,1) at hour 1 covers 10 + {4,5,5,6} → 15.0
        assert_eq!(coarse.intensity_at(HourLayer(1), Coordinate::new(1, 1)).unwrap(), 15.0);
        assert_eq!(coarse.day(), Some(3));
    }

    #[test]
    fn max_blocks() {
        let coarse = downsample(&gradient_field(), 2, Accumulation::Max).unwrap();
        assert_eq!(coarse.intensity_at(HourLayer(0), Coordinate::new(0, 0)).unwrap(), 2.0);
        assert_eq!(coarse.intensity_at(HourLayer(1), Coordinate::new(1, 1)).unwrap(), 16.0);
    }

    #[test]
    fn partial_edge_blocks() {
        // 4×4 with ratio 3 → 2×2; block (1,1) holds only cell (3,3).
        let coarse = downsample(&gradient_field(), 3, Accumulation::Mean).unwrap();
        assert_eq!((coarse.xsize(), coarse.ysize()), (2, 2));
        assert_eq!(coarse.intensity_at(HourLayer(0), Coordinate::new(1, 1)).unwrap(), 6.0);
        // Block (1,0): x=3, y ∈ {0,1,2} → 3,4,5 → 4.0
        assert_eq!(coarse.intensity_at(HourLayer(0), Coordinate::new(1, 0)).unwrap(), 4.0);
    }

    #[test]
    fn ratio_one_is_identity() {
        let f = gradient_field();
        assert_eq!(downsample(&f, 1, Accumulation::Max).unwrap(), f);
    }

    #[test]
    fn ratio_zero_rejected() {
        assert!(downsample(&gradient_field(), 0, Accumulation::Mean).is_err());
    }

    #[test]
    fn accumulation_parses() {
        assert_eq!("MAX".parse::<Accumulation>().unwrap(), Accumulation::Max);
        assert_eq!("mean".parse::<Accumulation>().unwrap(), Accumulation::Mean);
        assert!("sum".parse::<Accumulation>().is_err());
    }
}
