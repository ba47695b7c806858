//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small player-referee frame with every column the pipeline expects,
/// including derived-column inputs with known values.
pub fn create_player_dataframe() -> DataFrame {
    df! {
        "rater1" => [Some(0.1f64), Some(0.5), Some(0.7), Some(0.25), None, Some(1.0)],
        "rater2" => [Some(0.3f64), Some(0.7), Some(0.9), Some(0.25), None, Some(1.0)],
        "redCards" => [0i64, 1, 2, 0, 1, 0],
        "yellowCards" => [1i64, 0, 3, 2, 1, 0],
        "games" => [10i64, 25, 8, 30, 12, 5],
        "goals" => [2i64, 0, 1, 5, 0, 0],
        "victories" => [4i64, 12, 3, 18, 6, 1],
        "defeats" => [3i64, 8, 4, 6, 4, 3],
        "height" => [Some(180.0f64), Some(175.0), None, Some(182.0), Some(178.0), Some(190.0)],
        "weight" => [75.0f64, 70.0, 80.0, 78.0, 74.0, 85.0],
        "birthday" => [Some("31.12.1984"), Some("15.06.1990"), Some("not a date"), Some("01.01.1988"), None, Some("20.03.1985")],
        "position" => [Some("Center Back"), Some("Goalkeeper"), None, Some("Center Back"), Some("Right Winger"), Some("Goalkeeper")],
    }
    .unwrap()
}

/// CSV fixture matching the raw file layout: `NA` for missing values,
/// day-first birthdays.
pub fn write_player_csv() -> (TempDir, PathBuf) {
    let csv = "\
rater1,rater2,redCards,yellowCards,games,goals,victories,defeats,height,weight,birthday,position
0.1,0.3,0,1,10,2,4,3,180,75,31.12.1984,Center Back
0.5,0.7,1,0,25,0,12,8,175,70,15.06.1990,Goalkeeper
0.7,0.9,2,3,8,1,3,4,NA,80,not a date,NA
0.25,0.25,0,2,30,5,18,6,182,78,01.01.1988,Center Back
NA,NA,1,1,12,0,6,4,178,74,NA,Right Winger
1.0,1.0,0,0,5,0,1,3,190,85,20.03.1985,Goalkeeper
";
    write_csv(csv)
}

/// Write raw CSV text to a temp file, returning the guard and the path.
pub fn write_csv(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("data.csv");
    let mut file = std::fs::File::create(&path).expect("create temp csv");
    file.write_all(contents.as_bytes()).expect("write temp csv");
    (dir, path)
}

/// Collect a column as `Vec<f64>` with nulls as NaN.
pub fn column_f64(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .iter()
        .map(|opt| opt.unwrap_or(f64::NAN))
        .collect()
}

/// Collect a column as `Vec<i32>`, panicking on nulls.
pub fn column_i32(df: &DataFrame, name: &str) -> Vec<i32> {
    df.column(name)
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect()
}
