use rowstore::csv::{self, CsvOptions, OversizePolicy};
use rowstore::{stats, Column, ColumnKind, ColumnRole, Error, NumericType, Schema};
use std::io::Cursor;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_alternating_column_converges_to_categorical() {
    init_tracing();
    let text = "A,B\n1,10\n2,20\nx,30\n4,40\n";

    let inference = csv::infer_schema(&mut Cursor::new(text), &CsvOptions::default()).unwrap();
    assert!(inference.restarts >= 1);

    let a = inference.schema.find("A").unwrap();
    assert_eq!(a.kind(), ColumnKind::Categorical);
    assert!(a.width() >= 2);
    assert_eq!(
        inference.schema.find("B").unwrap().kind(),
        ColumnKind::Quantitative(NumericType::F64)
    );

    let store = csv::load(Cursor::new(text), &CsvOptions::default()).unwrap();
    let texts: Vec<String> = store
        .column_fields("A")
        .unwrap()
        .map(|f| f.as_text().unwrap().into_owned())
        .collect();
    assert_eq!(texts, vec!["1", "2", "x", "4"]);
    assert_eq!(stats::mean(&store, "B").unwrap(), 25.0);
}

#[test]
fn test_read_csv_file_with_inference() {
    init_tracing();
    let file = write_temp("height,species,weight\n1.2,cat,4\n0.8,dog,\n");

    // weight has an empty field after a numeral, so it becomes categorical
    let store = csv::read_csv(file.path(), &CsvOptions::default()).unwrap();
    assert_eq!(store.row_count(), 2);
    assert_eq!(store.column_count(), 3);

    let schema = store.schema();
    assert_eq!(schema.find("species").unwrap().width(), 4);
    assert_eq!(schema.find("weight").unwrap().kind(), ColumnKind::Categorical);
    assert_eq!(schema.find("weight").unwrap().width(), 2);
    assert_eq!(store.field(1, "weight").unwrap().raw(), b"\0\0");
    assert_eq!(store.field(1, "height").unwrap().as_f64().unwrap(), 0.8);
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = csv::read_csv(dir.path().join("absent.csv"), &CsvOptions::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_explicit_schema_scenario() {
    let schema = Schema::from_columns(vec![
        Column::quantitative("x", ColumnRole::Explanatory, NumericType::F64),
        Column::categorical("name", ColumnRole::Response, 8),
    ])
    .unwrap();
    let file = write_temp("x,name\n1.5,bob\n2.5,al\n");

    let store = csv::read_csv_with_schema(file.path(), schema, &CsvOptions::default()).unwrap();
    assert_eq!(store.row_count(), 2);
    assert_eq!(store.field(0, "x").unwrap().as_f64().unwrap(), 1.5);
    assert_eq!(store.field(0, "name").unwrap().raw(), b"bob\0\0\0\0\0");
    assert_eq!(stats::mean(&store, "x").unwrap(), 2.0);
    assert_eq!(stats::variance(&store, "x").unwrap(), 0.5);
}

#[test]
fn test_csv_round_trip_with_same_schema() {
    init_tracing();
    let schema = Schema::from_columns(vec![
        Column::quantitative("id", ColumnRole::Other, NumericType::I64),
        Column::quantitative("score", ColumnRole::Response, NumericType::F64),
        Column::categorical("label", ColumnRole::Explanatory, 6),
    ])
    .unwrap();
    let source = "id,score,label\n1,0.1,red\n2,-3.25e2,green\n3,1e-7,blue\n";
    let original =
        csv::decode(Cursor::new(source), schema.clone(), &CsvOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    csv::write_csv(&original, &path, &CsvOptions::new().trim_padding(true)).unwrap();
    let reread = csv::read_csv_with_schema(&path, schema, &CsvOptions::default()).unwrap();

    assert_eq!(reread.row_count(), original.row_count());
    for i in 0..original.row_count() {
        assert_eq!(reread.row(i).unwrap().as_bytes(), original.row(i).unwrap().as_bytes());
    }
}

#[test]
fn test_inferred_round_trip_keeps_padding() {
    let text = "k,v\naa,1\nb,2\n";
    let store = csv::load(Cursor::new(text), &CsvOptions::default()).unwrap();

    let mut out = Vec::new();
    csv::encode(&store, &mut out, &CsvOptions::default()).unwrap();
    let again = csv::decode(
        Cursor::new(out),
        store.schema().clone(),
        &CsvOptions::new().oversize(OversizePolicy::Reject),
    )
    .unwrap();
    assert_eq!(again, store);
}

#[test]
fn test_schema_template_file() {
    let file = write_temp("n,word\n1,one\n2,three\n");
    let store = csv::read_csv(file.path(), &CsvOptions::new().numeric(NumericType::I32)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("schema.json");
    store.schema().save(&template).unwrap();

    let loaded = Schema::load(&template).unwrap();
    assert_eq!(&loaded, store.schema());
    let again = csv::read_csv_with_schema(file.path(), loaded, &CsvOptions::default()).unwrap();
    assert_eq!(again, store);
}
