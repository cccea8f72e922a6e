use chrono::{NaiveDate, Timelike};
use outletscope::outlet::Outlet;
use outletscope::parser::{parse_record, tokenize, RecordError};

#[test]
fn parse_valid_line_fills_every_field() {
    let line = "Wed02-25-2015_12-15PM\tYNET\t3\tנתניהו נאם בקונגרס\tנתניהו נאם קונגרס";
    let rec = parse_record(line, 12).expect("valid record");
    assert_eq!(rec.line_number, 12);
    assert_eq!(rec.outlet, Outlet::Ynet);
    assert_eq!(rec.epoch_count, 3);
    assert_eq!(rec.timestamp.date(), NaiveDate::from_ymd_opt(2015, 2, 25).unwrap());
    assert_eq!(rec.timestamp.hour(), 12);
    assert_eq!(rec.timestamp.minute(), 15);
    assert_eq!(rec.raw_title, "נתניהו נאם בקונגרס");
    assert_eq!(rec.lemma_title, "נתניהו נאם קונגרס");
    assert_eq!(rec.identifier(), "Wed02-25-2015_12-15PM:YNET");
}

#[test]
fn wrong_column_count_is_malformed() {
    let line = "Wed02-25-2015_12-15PM\tYNET\t3\tכותרת";
    assert_eq!(parse_record(line, 1), Err(RecordError::Malformed { columns: 4 }));
    let line = "a\tb\tc\td\te\tf";
    assert_eq!(parse_record(line, 1), Err(RecordError::Malformed { columns: 6 }));
}

#[test]
fn bad_timestamp_is_reported_as_bad_date() {
    let line = "yesterday\tHAARETZ\t1\tכותרת\tכותרת";
    let err = parse_record(line, 1).unwrap_err();
    assert_eq!(err, RecordError::BadTimestamp("yesterday".into()));
    assert!(err.is_bad_date());
}

#[test]
fn unknown_outlet_and_bad_epochs_are_shape_errors() {
    let err = parse_record("Wed02-25-2015_12-15PM\tFOX\t1\tx\tx", 1).unwrap_err();
    assert_eq!(err, RecordError::UnknownOutlet("FOX".into()));
    assert!(!err.is_bad_date());

    let err = parse_record("Wed02-25-2015_12-15PM\tNRG\t0\tx\tx", 1).unwrap_err();
    assert_eq!(err, RecordError::BadEpochCount("0".into()));
    let err = parse_record("Wed02-25-2015_12-15PM\tNRG\tmany\tx\tx", 1).unwrap_err();
    assert_eq!(err, RecordError::BadEpochCount("many".into()));
}

#[test]
fn outlet_code_and_crlf_are_accepted() {
    let rec = parse_record("Wed02-25-2015_12-15PM\tih\t1\tכותרת\tכותרת\r", 1).unwrap();
    assert_eq!(rec.outlet, Outlet::IsraelHayom);
    assert_eq!(rec.lemma_title, "כותרת");
}

#[test]
fn empty_titles_still_form_a_record() {
    let rec = parse_record("Wed02-25-2015_12-15PM\tMAKO\t2\t\t", 1).unwrap();
    assert!(tokenize(&rec.raw_title).is_empty());
    assert!(tokenize(&rec.lemma_title).is_empty());
}

#[test]
fn tokenize_collapses_whitespace_runs() {
    assert_eq!(tokenize("  א  ב\tג "), vec!["א", "ב", "ג"]);
}
