use outletscope::frequency::{self, FrequencyError, FrequencyTable, Smoothing};
use outletscope::outlet::Outlet;
use std::io::Cursor;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn word_smoothing_floors_rare_and_unseen_words() {
    let t = FrequencyTable::from_pairs([("נדיר", 4u64), ("נפוץ", 100), ("סף", 5)]);
    assert!(close(t.log_frequency("חסר", Smoothing::WORDS), 3f64.ln()));
    assert!(close(t.log_frequency("נדיר", Smoothing::WORDS), 3f64.ln()));
    assert!(close(t.log_frequency("סף", Smoothing::WORDS), 5f64.ln()));
    assert!(close(t.log_frequency("נפוץ", Smoothing::WORDS), 100f64.ln()));
}

#[test]
fn lemma_smoothing_uses_its_own_threshold() {
    let t = FrequencyTable::from_pairs([("תשע", 9u64), ("עשר", 10)]);
    assert!(close(t.log_frequency("חסר", Smoothing::LEMMAS), 5f64.ln()));
    assert!(close(t.log_frequency("תשע", Smoothing::LEMMAS), 5f64.ln()));
    assert!(close(t.log_frequency("עשר", Smoothing::LEMMAS), 10f64.ln()));
}

#[test]
fn reader_skips_malformed_lines() {
    let data = "של\t120\nבית\t40\nשבור\nשלוש\tעמודות\tכאן\nמילה\tהרבה\n\nסוף\t7\n";
    let t = FrequencyTable::from_reader(Cursor::new(data)).unwrap();
    assert_eq!(t.len(), 3);
    assert_eq!(t.get("של"), Some(120));
    assert_eq!(t.get("סוף"), Some(7));
    assert_eq!(t.get("שבור"), None);
    assert_eq!(t.get("מילה"), None);
}

#[test]
fn missing_table_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FrequencyTable::load(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, FrequencyError::Io { .. }));
}

#[test]
fn counts_and_writes_loadable_tables() {
    let log = [
        "Mon03-16-2015_10-00AM\tYNET\t1\tשל הבית של\tשל בית של",
        "Mon03-16-2015_11-00AM\tWALLA\t2\tהבית שלנו\tבית של",
        "broken line",
    ]
    .join("\n");
    let counts = frequency::count_frequencies(Cursor::new(log)).unwrap();
    assert_eq!(counts.headlines, 2);
    assert_eq!(counts.malformed, 1);
    assert_eq!(counts.words.get("של"), Some(&2));
    assert_eq!(counts.words.get("הבית"), Some(&2));
    assert_eq!(counts.lemmas.get("של"), Some(&3));
    assert_eq!(counts.lemmas.get("בית"), Some(&2));

    let totals = counts.outlet_totals();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].outlet, Outlet::Ynet);
    assert_eq!(totals[0].words, 3);
    assert_eq!(totals[1].outlet, Outlet::Walla);
    assert_eq!(totals[1].lemmas, 2);

    let mut buf = Vec::new();
    let written = frequency::write_table(&counts.lemmas, 2, &mut buf).unwrap();
    assert_eq!(written, 2);
    let text = String::from_utf8(buf.clone()).unwrap();
    assert_eq!(text, "של\t3\nבית\t2\n");

    let table = FrequencyTable::from_reader(Cursor::new(buf)).unwrap();
    assert_eq!(table.get("של"), Some(3));
}
