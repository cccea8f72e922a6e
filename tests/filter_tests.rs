use chrono::NaiveDate;
use outletscope::filter::{BoundaryState, Decision, RecordFilter};
use outletscope::outlet::Outlet;
use outletscope::parser::{parse_record, Record};

fn record(ts: &str, outlet: &str) -> Record {
    parse_record(&format!("{ts}\t{outlet}\t1\tכותרת\tכותרת"), 1).expect("valid record")
}

fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn rejects_unselected_outlets() {
    let filter = RecordFilter::new(&[Outlet::Ynet], None, None);
    let mut state = BoundaryState::new();
    assert_eq!(filter.decide(&record("Mon03-16-2015_10-00AM", "WALLA"), &mut state), Decision::RejectOutlet);
    assert!(filter.accept(&record("Mon03-16-2015_10-00AM", "YNET"), &mut state));
}

#[test]
fn rejects_records_before_start() {
    let filter = RecordFilter::new(&[Outlet::Ynet], day(2015, 3, 16), None);
    let mut state = BoundaryState::new();
    assert_eq!(
        filter.decide(&record("Sun03-01-2015_08-00AM", "YNET"), &mut state),
        Decision::RejectBeforeStart
    );
    assert!(filter.accept(&record("Mon03-16-2015_12-05AM", "YNET"), &mut state));
}

#[test]
fn end_date_covers_the_whole_day() {
    let filter = RecordFilter::new(&[Outlet::Ynet], None, day(2015, 3, 17));
    let mut state = BoundaryState::new();
    assert_eq!(filter.decide(&record("Tue03-17-2015_11-45PM", "YNET"), &mut state), Decision::Accept);
    assert!(!state.has_carried(Outlet::Ynet));
}

#[test]
fn keeps_exactly_one_post_window_record_per_outlet() {
    let filter = RecordFilter::new(&[Outlet::Ynet, Outlet::Haaretz], None, day(2015, 3, 17));
    let mut state = BoundaryState::new();
    assert_eq!(
        filter.decide(&record("Wed03-18-2015_06-00AM", "YNET"), &mut state),
        Decision::AcceptCarryOver
    );
    assert_eq!(
        filter.decide(&record("Wed03-18-2015_07-00AM", "YNET"), &mut state),
        Decision::RejectAfterEnd
    );
    assert_eq!(
        filter.decide(&record("Fri03-20-2015_09-00AM", "YNET"), &mut state),
        Decision::RejectAfterEnd
    );
    // other outlets keep their own carry-over
    assert_eq!(
        filter.decide(&record("Wed03-18-2015_07-00AM", "HAARETZ"), &mut state),
        Decision::AcceptCarryOver
    );
    assert!(state.has_carried(Outlet::Ynet));
    assert!(state.has_carried(Outlet::Haaretz));

    // a fresh build starts with a fresh state
    let mut fresh = BoundaryState::new();
    assert!(filter.accept(&record("Wed03-18-2015_07-00AM", "YNET"), &mut fresh));
}

#[test]
fn no_carry_over_before_the_start() {
    let filter = RecordFilter::new(&[Outlet::Ynet], day(2015, 3, 16), day(2015, 3, 17));
    let mut state = BoundaryState::new();
    for ts in ["Sun03-01-2015_08-00AM", "Sun03-01-2015_09-00AM"] {
        assert_eq!(filter.decide(&record(ts, "YNET"), &mut state), Decision::RejectBeforeStart);
    }
}

#[test]
fn unbounded_window_accepts_every_selected_record() {
    let filter = RecordFilter::new(&Outlet::ALL, None, None);
    let mut state = BoundaryState::new();
    for ts in ["Sun03-01-2015_08-00AM", "Fri03-20-2015_09-00AM", "Fri03-20-2015_10-00AM"] {
        assert_eq!(filter.decide(&record(ts, "MAARIV"), &mut state), Decision::Accept);
    }
}
