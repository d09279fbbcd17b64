use proptest::prelude::*;

use tabular_pipeline::processing::{
    filter_in, filter_not_in, filter_range, impute_mean, missing_count, partition_range, transform_column,
    AddConstant, CompareOp, FilterMode,
};
use tabular_pipeline::types::{DataSet, DataType, Field, Schema, Value};

const ORIGINS: [&str; 3] = ["Asia", "Europe", "USA"];

type Row = (Option<usize>, Option<f64>, Option<f64>);

fn build(rows: &[Row]) -> DataSet {
    let schema = Schema::new(vec![
        Field::new("Origin", DataType::Utf8),
        Field::new("Weight", DataType::Float64),
        Field::new("Cylinders", DataType::Float64),
    ]);
    let to_num = |v: Option<f64>| v.map(Value::Float64).unwrap_or(Value::Null);
    let rows = rows
        .iter()
        .map(|&(origin, weight, cyl)| {
            vec![
                origin
                    .map(|i| Value::Utf8(ORIGINS[i].to_string()))
                    .unwrap_or(Value::Null),
                to_num(weight),
                to_num(cyl),
            ]
        })
        .collect();
    DataSet::from_rows(schema, rows).unwrap()
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            prop::option::of(0..ORIGINS.len()),
            prop::option::of(0.0..10_000.0f64),
            prop::option::of((2u8..=12).prop_map(f64::from)),
        ),
        0..40,
    )
}

fn complete_weights_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            prop::option::of(0..ORIGINS.len()),
            (0.0..10_000.0f64).prop_map(Some),
            prop::option::of(4.0..8.0f64),
        ),
        0..40,
    )
}

fn complete_origins_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (
            (0..ORIGINS.len()).prop_map(Some),
            prop::option::of(0.0..10_000.0f64),
            prop::option::of(4.0..8.0f64),
        ),
        0..40,
    )
}

/// Origins selected by `mask`, and the remaining ones.
fn split_origins(mask: &[bool]) -> (Vec<&'static str>, Vec<&'static str>) {
    let mut selected = Vec::new();
    let mut rest = Vec::new();
    for (origin, keep) in ORIGINS.iter().zip(mask) {
        if *keep {
            selected.push(*origin);
        } else {
            rest.push(*origin);
        }
    }
    (selected, rest)
}

proptest! {
    #[test]
    fn imputation_leaves_no_missing_values(rows in rows_strategy()) {
        let mut ds = build(&rows);
        let before = ds.numeric_column("Cylinders").unwrap().to_vec();
        let present: Vec<f64> = before.iter().flatten().copied().collect();

        match impute_mean(&mut ds, "Cylinders") {
            Ok(report) => {
                prop_assert!(!present.is_empty());
                prop_assert_eq!(missing_count(&ds, "Cylinders").unwrap(), 0);
                let after = ds.numeric_column("Cylinders").unwrap();
                for (b, a) in before.iter().zip(after) {
                    match b {
                        Some(v) => {
                            prop_assert_eq!(Some(*v), *a);
                        }
                        None => {
                            prop_assert_eq!(Some(report.fill_value), *a);
                        }
                    }
                }
            }
            Err(_) => {
                prop_assert!(present.is_empty());
            }
        }
    }

    #[test]
    fn membership_filters_partition(rows in rows_strategy(), mask in prop::collection::vec(any::<bool>(), 3)) {
        let ds = build(&rows);
        let allowed: Vec<&str> = ORIGINS.iter().zip(&mask).filter(|(_, keep)| **keep).map(|(o, _)| *o).collect();

        let inside = filter_in(&ds, "Origin", allowed.as_slice()).unwrap();
        let outside = filter_not_in(&ds, "Origin", allowed.as_slice()).unwrap();

        prop_assert_eq!(inside.row_count() + outside.row_count(), ds.row_count());
        for origin in inside.categorical_column("Origin").unwrap() {
            prop_assert!(origin.as_deref().is_some_and(|o| allowed.contains(&o)));
        }
        prop_assert_eq!(inside.schema(), ds.schema());
    }

    #[test]
    fn membership_and_complementary_membership_cover_complete_columns(
        rows in complete_origins_strategy(),
        mask in prop::collection::vec(any::<bool>(), 3)
    ) {
        let ds = build(&rows);
        let (allowed, others) = split_origins(&mask);

        let inside = filter_in(&ds, "Origin", allowed.as_slice()).unwrap();
        let rest = filter_in(&ds, "Origin", others.as_slice()).unwrap();
        prop_assert_eq!(inside.row_count() + rest.row_count(), ds.row_count());
    }

    #[test]
    fn complementary_membership_misses_exactly_the_missing_entries(
        rows in rows_strategy(),
        mask in prop::collection::vec(any::<bool>(), 3)
    ) {
        let ds = build(&rows);
        let (allowed, others) = split_origins(&mask);
        let missing = missing_count(&ds, "Origin").unwrap();

        let inside = filter_in(&ds, "Origin", allowed.as_slice()).unwrap();
        let rest = filter_in(&ds, "Origin", others.as_slice()).unwrap();
        prop_assert_eq!(inside.row_count() + rest.row_count(), ds.row_count() - missing);
    }

    #[test]
    fn gt_and_le_partition_complete_columns(rows in complete_weights_strategy(), t in 0.0..10_000.0f64) {
        let ds = build(&rows);
        let gt = filter_range(&ds, "Weight", CompareOp::Gt, t, FilterMode::Matching).unwrap();
        let le = filter_range(&ds, "Weight", CompareOp::Le, t, FilterMode::Matching).unwrap();

        prop_assert_eq!(gt.row_count() + le.row_count(), ds.row_count());
        prop_assert!(gt.numeric_column("Weight").unwrap().iter().flatten().all(|w| *w > t));
        prop_assert!(le.numeric_column("Weight").unwrap().iter().flatten().all(|w| *w <= t));
    }

    #[test]
    fn complement_mode_partitions_with_missing_values(rows in rows_strategy(), t in 0.0..10_000.0f64) {
        let ds = build(&rows);
        for op in [CompareOp::Gt, CompareOp::Ge, CompareOp::Lt, CompareOp::Le] {
            let (matching, complement) = partition_range(&ds, "Weight", op, t).unwrap();
            prop_assert_eq!(matching.row_count() + complement.row_count(), ds.row_count());

            let excluded = filter_range(&ds, "Weight", op, t, FilterMode::Complement).unwrap();
            prop_assert_eq!(&excluded, &complement);
        }
    }

    #[test]
    fn add_constant_touches_only_its_column(rows in rows_strategy(), k in -100.0..100.0f64) {
        let original = build(&rows);
        let mut ds = original.clone();
        transform_column(&mut ds, "Weight", &AddConstant(k)).unwrap();

        prop_assert_eq!(ds.row_count(), original.row_count());
        prop_assert_eq!(ds.column("Origin").unwrap(), original.column("Origin").unwrap());
        prop_assert_eq!(ds.column("Cylinders").unwrap(), original.column("Cylinders").unwrap());

        let before = original.numeric_column("Weight").unwrap();
        let after = ds.numeric_column("Weight").unwrap();
        for (b, a) in before.iter().zip(after) {
            prop_assert_eq!(b.map(|v| v + k), *a);
        }
    }
}

#[test]
fn rows_with_missing_origin_fall_outside_both_value_sets() {
    let ds = build(&[
        (Some(0), Some(3000.0), Some(4.0)),
        (None, Some(4500.0), Some(6.0)),
        (Some(2), Some(4000.0), None),
        (Some(1), Some(5000.0), Some(8.0)),
    ]);
    let inside = filter_in(&ds, "Origin", &["Asia", "Europe"]).unwrap();
    let rest = filter_in(&ds, "Origin", &["USA"]).unwrap();
    assert_eq!(inside.row_count(), 2);
    assert_eq!(rest.row_count(), 1);
    assert_eq!(filter_not_in(&ds, "Origin", &["Asia", "Europe"]).unwrap().row_count(), 2);
}

#[test]
fn cylinders_mean_fills_missing_entry() {
    let mut ds = build(&[
        (Some(0), Some(3000.0), Some(4.0)),
        (Some(1), Some(4500.0), Some(6.0)),
        (Some(2), Some(4000.0), None),
        (Some(0), Some(5000.0), Some(8.0)),
    ]);
    let report = impute_mean(&mut ds, "Cylinders").unwrap();
    assert_eq!(report.fill_value, 6.0);
    assert_eq!(ds.numeric_column("Cylinders").unwrap()[2], Some(6.0));
}
