//! Tests for position encoding

use crowdstorm::pipeline::{encode_position, PositionEncoding};

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_onehot_expands_in_first_seen_order() {
    let df = common::create_player_dataframe();
    let encoded = encode_position(df, PositionEncoding::Onehot).unwrap();

    // First-seen category ("Center Back") is the dropped baseline.
    assert!(encoded.column("position").is_err());
    assert!(encoded.column("position_Center Back").is_err());

    let goalkeeper = common::column_i32(&encoded, "position_Goalkeeper");
    assert_eq!(goalkeeper, vec![0, 1, 0, 0, 0, 1]);

    let winger = common::column_i32(&encoded, "position_Right Winger");
    assert_eq!(winger, vec![0, 0, 0, 0, 1, 0]);
}

#[test]
fn test_onehot_missing_position_is_all_zero() {
    let df = common::create_player_dataframe();
    let encoded = encode_position(df, PositionEncoding::Onehot).unwrap();

    let goalkeeper = common::column_i32(&encoded, "position_Goalkeeper");
    let winger = common::column_i32(&encoded, "position_Right Winger");
    assert_eq!(goalkeeper[2], 0, "row with missing position");
    assert_eq!(winger[2], 0, "row with missing position");
}

#[test]
fn test_ordinal_codes_are_stable_for_fixed_input() {
    let df = common::create_player_dataframe();
    let encoded = encode_position(df, PositionEncoding::Ordinal).unwrap();

    let codes = common::column_i32(&encoded, "position");
    assert_eq!(codes, vec![0, 1, -1, 0, 2, 1]);
}

#[test]
fn test_drop_discards_position_information() {
    let df = common::create_player_dataframe();
    let width_before = df.width();
    let encoded = encode_position(df, PositionEncoding::Drop).unwrap();

    assert!(encoded.column("position").is_err());
    assert_eq!(encoded.width(), width_before - 1);
}

#[test]
fn test_missing_position_column_errors() {
    let df = polars::prelude::df! {
        "games" => [1i64, 2, 3],
    }
    .unwrap();

    for mode in [
        PositionEncoding::Onehot,
        PositionEncoding::Ordinal,
        PositionEncoding::Drop,
    ] {
        assert!(
            encode_position(df.clone(), mode).is_err(),
            "mode {:?} should fail without a position column",
            mode
        );
    }
}
