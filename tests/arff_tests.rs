use outletscope::arff::{self, ArffError, RELATION};
use outletscope::dataset::{Dataset, FeatureVector, RunCounters};
use outletscope::outlet::Outlet;
use outletscope::schema::{Feature, FeatureSchema, SchemaOptions};

fn schema(ids: bool) -> FeatureSchema {
    FeatureSchema::build(&SchemaOptions {
        optimize_features: true,
        include_identifier: ids,
        outlets: vec![Outlet::Ynet, Outlet::IsraelHayom],
    })
}

fn vector(schema: &FeatureSchema, label: Outlet) -> FeatureVector {
    let mut v = FeatureVector::new(schema, label);
    if schema.contains(Feature::Identifier) {
        v.set_identifier(format!("Mon03-16-2015_10-00AM:{label}"));
    }
    v.set_at(schema.position(Feature::NumChars).unwrap(), 13.0);
    v.set_at(schema.position(Feature::AvgWordLength).unwrap(), 2.25);
    v
}

fn dataset(schema: FeatureSchema, labels: &[Outlet]) -> Dataset {
    let vectors = labels.iter().map(|l| vector(&schema, *l)).collect();
    Dataset { schema, vectors, counters: RunCounters::default() }
}

fn render(ds: &Dataset) -> String {
    let mut buf = Vec::new();
    arff::write_dataset(ds, RELATION, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn header_lists_every_attribute_in_order() {
    let ds = dataset(schema(true), &[]);
    let text = render(&ds);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "@relation Instances");
    assert_eq!(lines[2], "@attribute ID string");
    assert_eq!(lines[3], "@attribute num-of-chars numeric");
    let attrs: Vec<&&str> = lines.iter().filter(|l| l.starts_with("@attribute")).collect();
    assert_eq!(attrs.len(), ds.schema.len());
    assert_eq!(*attrs[attrs.len() - 1], "@attribute class {YNET,ISRAEL_HAYOM}");
    assert_eq!(lines.last(), Some(&"@data"));
}

#[test]
fn rows_are_sparse_and_skip_zeros() {
    let ds = dataset(schema(true), &[Outlet::IsraelHayom]);
    let text = render(&ds);
    let row = text.lines().last().unwrap();
    let class_pos = ds.schema.len() - 1;
    assert_eq!(
        row,
        format!("{{0 'Mon03-16-2015_10-00AM:ISRAEL_HAYOM',1 13,3 2.25,{class_pos} ISRAEL_HAYOM}}")
    );
}

#[test]
fn rows_without_identifier_start_at_the_first_numeric() {
    let ds = dataset(schema(false), &[Outlet::Ynet, Outlet::Ynet]);
    let text = render(&ds);
    let rows: Vec<&str> = text.lines().skip_while(|l| *l != "@data").skip(1).collect();
    let class_pos = ds.schema.len() - 1;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], format!("{{0 13,2 2.25,{class_pos} YNET}}"));
}

#[test]
fn label_outside_the_class_levels_is_rejected() {
    let ds = dataset(schema(false), &[Outlet::Mako]);
    let mut buf = Vec::new();
    let err = arff::write_dataset(&ds, RELATION, &mut buf).unwrap_err();
    assert!(matches!(err, ArffError::UnknownClassLevel(ref l) if l == "MAKO"));
}

#[test]
fn save_renames_into_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.arff");
    let ds = dataset(schema(true), &[Outlet::Ynet]);
    arff::save(&ds, &path).unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("out.arff.tmp").exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), render(&ds));
}

#[test]
fn failed_save_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.arff");
    let ds = dataset(schema(true), &[Outlet::Walla]);
    assert!(arff::save(&ds, &path).is_err());
    assert!(!path.exists());
    assert!(!dir.path().join("bad.arff.tmp").exists());
}

#[test]
fn numbers_print_compactly() {
    assert_eq!(arff::format_number(4.0), "4");
    assert_eq!(arff::format_number(-2.0), "-2");
    assert_eq!(arff::format_number(0.25), "0.25");
    assert_eq!(arff::format_number(1.0 / 3.0), "0.3333333333333333");
}
