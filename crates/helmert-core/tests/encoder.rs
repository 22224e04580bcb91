//! Integration tests for the Helmert encoder fit/transform lifecycle.

use helmert_core::{
    CategoricalEncoder, EncodeError, EncoderOptions, FittedHelmert, HandleUnknown,
    HelmertEncoder, OutputKind,
};
use polars::prelude::*;

fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .collect()
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

fn encode(encoder: &HelmertEncoder, df: &DataFrame) -> DataFrame {
    encoder.transform(df).unwrap().into_frame().unwrap()
}

fn fitted(options: EncoderOptions, df: &DataFrame) -> HelmertEncoder {
    let mut encoder = HelmertEncoder::new(options).unwrap();
    encoder.fit(df).unwrap();
    encoder
}

fn shop() -> DataFrame {
    df! {
        "id" => &[1i64, 2, 3, 4],
        "color" => &["red", "green", "blue", "green"],
        "weight" => &[1.5, 2.0, 0.5, 3.0],
        "size" => &["S", "M", "S", "M"],
    }
    .unwrap()
}

#[test]
fn two_levels_encode_as_minus_one_and_one() {
    let train = df! { "letter" => &["a", "b"] }.unwrap();
    let encoder = fitted(EncoderOptions::default(), &train);

    let a = encode(&encoder, &df! { "letter" => &["a"] }.unwrap());
    let b = encode(&encoder, &df! { "letter" => &["b"] }.unwrap());

    assert_eq!(names(&a), vec!["intercept", "letter_0"]);
    assert_eq!(f64_values(&a, "letter_0"), vec![Some(-1.0)]);
    assert_eq!(f64_values(&b, "letter_0"), vec![Some(1.0)]);
}

#[test]
fn three_levels_follow_helmert_rows() {
    let train = df! { "color" => &["red", "green", "blue"] }.unwrap();
    let encoder = fitted(EncoderOptions::default(), &train);

    let out = encode(&encoder, &train);

    assert_eq!(
        f64_values(&out, "color_0"),
        vec![Some(-1.0), Some(1.0), Some(0.0)]
    );
    assert_eq!(
        f64_values(&out, "color_1"),
        vec![Some(-1.0), Some(-1.0), Some(2.0)]
    );
}

#[test]
fn generated_columns_replace_source_in_place() {
    let encoder = fitted(EncoderOptions::default(), &shop());

    let out = encode(&encoder, &shop());

    assert_eq!(
        names(&out),
        vec!["intercept", "id", "color_0", "color_1", "weight", "size_0"]
    );
    assert_eq!(out.height(), 4);
    assert_eq!(f64_values(&out, "intercept"), vec![Some(1.0); 4]);
    assert_eq!(
        f64_values(&out, "weight"),
        vec![Some(1.5), Some(2.0), Some(0.5), Some(3.0)]
    );
}

#[test]
fn explicit_cols_limit_encoding() {
    let options = EncoderOptions::new().with_cols(["size"]);
    let encoder = fitted(options, &shop());

    let out = encode(&encoder, &shop());

    assert_eq!(
        names(&out),
        vec!["intercept", "id", "color", "weight", "size_0"]
    );
}

#[test]
fn numeric_column_can_be_encoded_explicitly() {
    let train = df! { "grade" => &[3i64, 1, 3, 2] }.unwrap();
    let encoder = fitted(EncoderOptions::new().with_cols(["grade"]), &train);

    let out = encode(&encoder, &train);

    // first appearance order: 3 -> code 1, 1 -> code 2, 2 -> code 3
    assert_eq!(
        f64_values(&out, "grade_0"),
        vec![Some(-1.0), Some(1.0), Some(-1.0), Some(0.0)]
    );
}

#[test]
fn single_level_column_is_removed() {
    let train = df! {
        "country" => &["NL", "NL", "NL"],
        "score" => &[1.0, 2.0, 3.0],
    }
    .unwrap();
    let encoder = fitted(EncoderOptions::default(), &train);

    let out = encode(&encoder, &train);

    assert_eq!(names(&out), vec!["intercept", "score"]);
}

#[test]
fn unknown_category_is_imputed_to_zero_row() {
    let encoder = fitted(EncoderOptions::default(), &shop());
    let test = df! {
        "id" => &[9i64],
        "color" => &["purple"],
        "weight" => &[1.0],
        "size" => &["XL"],
    }
    .unwrap();

    let out = encode(&encoder, &test);

    assert_eq!(f64_values(&out, "color_0"), vec![Some(0.0)]);
    assert_eq!(f64_values(&out, "color_1"), vec![Some(0.0)]);
    assert_eq!(f64_values(&out, "size_0"), vec![Some(0.0)]);
}

#[test]
fn unknown_category_errors_under_error_policy() {
    let options = EncoderOptions::new().with_handle_unknown(HandleUnknown::Error);
    let encoder = fitted(options, &shop());
    let test = df! {
        "id" => &[9i64],
        "color" => &["purple"],
        "weight" => &[1.0],
        "size" => &["S"],
    }
    .unwrap();

    let err = encoder.transform(&test).unwrap_err();

    assert!(matches!(
        err,
        EncodeError::UnknownCategory { ref column, ref value } if column == "color" && value == "purple"
    ));
}

#[test]
fn unknown_category_is_null_under_ignore_policy() {
    let options = EncoderOptions::new().with_handle_unknown(HandleUnknown::Ignore);
    let train = df! { "letter" => &["a", "b"] }.unwrap();
    let encoder = fitted(options, &train);

    let out = encode(&encoder, &df! { "letter" => &["c", "b"] }.unwrap());

    assert_eq!(f64_values(&out, "letter_0"), vec![None, Some(1.0)]);
}

#[test]
fn transform_before_fit_fails() {
    let encoder = HelmertEncoder::default();

    let err = encoder.transform(&shop()).unwrap_err();

    assert!(matches!(err, EncodeError::NotFitted));
}

#[test]
fn transform_rejects_different_width() {
    let encoder = fitted(EncoderOptions::default(), &shop());
    let narrow = df! { "color" => &["red"] }.unwrap();

    let err = encoder.transform(&narrow).unwrap_err();

    assert!(matches!(
        err,
        EncodeError::DimensionMismatch {
            expected: 4,
            got: 1
        }
    ));
}

#[test]
fn frame_without_categories_passes_through() {
    let train = df! {
        "a" => &[1.0, 2.0],
        "b" => &[3i64, 4],
    }
    .unwrap();
    let encoder = fitted(EncoderOptions::default(), &train);

    let out = encode(&encoder, &train);

    assert!(out.equals_missing(&train));
    assert!(encoder.fitted().unwrap().cols().is_empty());
}

#[test]
fn missing_explicit_column_is_reported() {
    let mut encoder = HelmertEncoder::new(EncoderOptions::new().with_cols(["shape"])).unwrap();

    let err = encoder.fit(&shop()).unwrap_err();

    assert!(matches!(err, EncodeError::ColumnNotFound { ref column } if column == "shape"));
}

#[test]
fn drop_invariant_removes_constant_generated_columns() {
    let options = EncoderOptions::new().with_drop_invariant(true);
    let encoder = fitted(options, &shop());

    let out = encode(&encoder, &shop());

    assert_eq!(encoder.fitted().unwrap().drop_cols(), ["intercept"]);
    assert_eq!(
        names(&out),
        vec!["id", "color_0", "color_1", "weight", "size_0"]
    );
}

#[test]
fn drop_invariant_keeps_columns_of_single_row_fit() {
    let options = EncoderOptions::new().with_drop_invariant(true);
    let train = df! { "letter" => &["a"], "x" => &[1.0] }.unwrap();
    let encoder = fitted(options, &train);

    assert!(encoder.fitted().unwrap().drop_cols().is_empty());
}

#[test]
fn drop_invariant_keeps_row_count_when_every_column_is_dropped() {
    let options = EncoderOptions::new().with_drop_invariant(true);
    let train = df! { "country" => &["NL", "NL", "NL"] }.unwrap();
    let encoder = fitted(options, &train);

    let out = encode(&encoder, &train);

    assert_eq!(encoder.fitted().unwrap().drop_cols(), ["intercept"]);
    assert_eq!(out.width(), 0);
    assert_eq!(out.height(), train.height());
}

#[test]
fn generated_name_clash_is_rejected_at_fit() {
    let train = df! {
        "c" => &["a", "b"],
        "c_0" => &[1.0, 2.0],
    }
    .unwrap();
    let mut encoder = HelmertEncoder::new(EncoderOptions::default()).unwrap();

    let err = encoder.fit(&train).unwrap_err();

    assert!(matches!(err, EncodeError::DuplicateOutputColumn { ref column } if column == "c_0"));
    assert!(!encoder.is_fitted());
}

#[test]
fn categorical_columns_are_detected_and_encoded() {
    let size = Column::new("size".into(), &["S", "M", "L", "M"])
        .cast(&DataType::from_categories(Categories::global()))
        .unwrap();
    let weight = Column::new("weight".into(), &[1.0, 2.0, 3.0, 4.0]);
    let train = DataFrame::new(vec![size, weight]).unwrap();
    let encoder = fitted(EncoderOptions::default(), &train);

    let out = encode(&encoder, &train);

    assert_eq!(names(&out), vec!["intercept", "size_0", "size_1", "weight"]);
    assert_eq!(
        f64_values(&out, "size_1"),
        vec![Some(-1.0), Some(-1.0), Some(2.0), Some(-1.0)]
    );
}

#[test]
fn transform_is_deterministic() {
    let encoder = fitted(EncoderOptions::default(), &shop());

    let first = encode(&encoder, &shop());
    let second = encode(&encoder, &shop());

    assert!(first.equals_missing(&second));
}

#[test]
fn refit_replaces_mapping() {
    let mut encoder = HelmertEncoder::default();
    encoder.fit(&df! { "letter" => &["a", "b"] }.unwrap()).unwrap();
    encoder
        .fit(&df! { "letter" => &["x", "y", "z"] }.unwrap())
        .unwrap();

    let fitted = encoder.fitted().unwrap();
    assert_eq!(fitted.mapping()[0].matrix.levels(), 3);
    assert_eq!(fitted.ordinal().category_mapping()[0].levels, vec!["x", "y", "z"]);
}

#[test]
fn fit_transform_matches_fit_then_transform() {
    let mut encoder = HelmertEncoder::default();
    let combined = encoder.fit_transform(&shop()).unwrap().into_frame().unwrap();

    let separate = encode(&fitted(EncoderOptions::default(), &shop()), &shop());

    assert!(combined.equals_missing(&separate));
}

#[test]
fn array_output_has_encoded_shape() {
    let train = df! {
        "color" => &["red", "green", "blue"],
        "weight" => &[1.0, 2.0, 3.0],
    }
    .unwrap();
    let options = EncoderOptions::new().with_output(OutputKind::Array);
    let encoder = fitted(options, &train);

    let array = encoder.transform(&train).unwrap().into_array().unwrap();

    assert_eq!(array.dim(), (3, 4));
    assert_eq!(array[[1, 0]], 1.0);
    assert_eq!(array[[1, 1]], 1.0);
    assert_eq!(array[[1, 2]], -1.0);
    assert_eq!(array[[2, 3]], 3.0);
}

#[test]
fn array_output_rejects_string_columns() {
    let options = EncoderOptions::new()
        .with_cols(["size"])
        .with_output(OutputKind::Array);
    let encoder = fitted(options, &shop());

    let err = encoder.transform(&shop()).unwrap_err();

    assert!(matches!(err, EncodeError::NonNumericOutput { ref column } if column == "color"));
}

#[test]
fn feature_names_match_transform_output() {
    let options = EncoderOptions::new().with_drop_invariant(true);
    let encoder = fitted(options, &shop());

    let out = encode(&encoder, &shop());

    assert_eq!(encoder.fitted().unwrap().feature_names(), names(&out));
}

#[test]
fn fitted_state_survives_json_round_trip() {
    let encoder = fitted(EncoderOptions::new().with_drop_invariant(true), &shop());
    let state = encoder.fitted().unwrap();

    let json = serde_json::to_string(state).expect("serialize fitted encoder");
    let restored: FittedHelmert = serde_json::from_str(&json).expect("deserialize fitted encoder");

    assert_eq!(&restored, state);
    let reloaded = HelmertEncoder::from_fitted(restored);
    assert!(encode(&reloaded, &shop()).equals_missing(&encode(&encoder, &shop())));
}
