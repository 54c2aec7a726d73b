//! End-to-end fetches through the in-memory driver

use std::sync::Arc;

use pretty_assertions::assert_eq;
use zero_rowset::error::{DriverError, Error};
use zero_rowset::memory::MemorySource;
use zero_rowset::source::Operation;
use zero_rowset::value::{Decimal, NaiveDate, NaiveDateTime, NaiveTime};
use zero_rowset::{ResultDescriptor, ResultSet, RowSource, Value, ValueType};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

fn people() -> Vec<Vec<Option<Value>>> {
    (1..=5)
        .map(|id| {
            vec![
                Some(Value::Integer(id)),
                Some(Value::from(format!("person {id}"))),
                (id % 2 == 0).then(|| Value::Double(f64::from(id) * 1.5)),
            ]
        })
        .collect()
}

fn people_descriptor() -> Arc<ResultDescriptor> {
    Arc::new(
        ResultDescriptor::builder()
            .column("id", ValueType::Integer, 1)
            .column("name", ValueType::String, 2)
            .column("score", ValueType::Double, 3)
            .computed("rank", ValueType::Integer)
            .build(),
    )
}

#[test]
fn fetch_all_rows() {
    init_tracing();
    let mut rs = ResultSet::new(MemorySource::new(people()), people_descriptor());
    let rows: Vec<_> = rs.rows().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 5);

    let second = &rows[1];
    assert_eq!(second.get(1), Some(&Value::Integer(2)));
    assert_eq!(second.get_by_name("name"), Some(&Value::from("person 2")));
    assert_eq!(second.get(3), Some(&Value::Double(3.0)));
    assert_eq!(second.get(4), None);

    // odd ids have a NULL score, read as 0.0 by the driver and discarded
    assert_eq!(rows[0].get(3), None);
    rs.close().unwrap();
}

#[test]
fn example_integer_string_date_row() {
    let desc = Arc::new(
        ResultDescriptor::builder()
            .column("colA", ValueType::Integer, 1)
            .column("colB", ValueType::String, 2)
            .column("colC", ValueType::Date, 3)
            .build(),
    );
    let source = MemorySource::new(vec![vec![
        Some(Value::Integer(5)),
        Some(Value::from("x")),
        None,
    ]]);
    let mut rs = ResultSet::new(source, desc);
    let row = rs.fetch().unwrap().unwrap();
    assert_eq!(
        row.into_values(),
        vec![Some(Value::Integer(5)), Some(Value::from("x")), None]
    );
    assert!(rs.fetch().unwrap().is_none());
}

#[test]
fn max_rows_limits_and_zero_lifts_limit() {
    let mut rs = ResultSet::new(MemorySource::new(people()), people_descriptor());
    rs.set_max_rows(2).unwrap();
    assert!(rs.fetch().unwrap().is_some());
    assert!(rs.fetch().unwrap().is_some());
    assert!(rs.fetch().unwrap().is_none());

    rs.set_max_rows(0).unwrap();
    let rest: Vec<_> = rs.rows().map(Result::unwrap).collect();
    assert_eq!(rest.len(), 3);
    assert_eq!(rest[0].get(1), Some(&Value::Integer(3)));
}

#[test]
fn row_position_is_one_based() {
    let mut rs = ResultSet::new(MemorySource::new(people()), people_descriptor());
    assert_eq!(rs.row_position().unwrap(), 0);
    rs.fetch().unwrap();
    assert_eq!(rs.row_position().unwrap(), 1);
    rs.fetch().unwrap();
    assert_eq!(rs.row_position().unwrap(), 2);
}

#[test]
fn unsupported_operations_are_translated() {
    let source = MemorySource::new(people())
        .without(Operation::SetRowLimit)
        .without(Operation::CurrentRowPosition);
    let mut rs = ResultSet::new(source, people_descriptor());

    assert!(matches!(
        rs.set_max_rows(1).unwrap_err(),
        Error::CannotSetMaxRows(DriverError::Unsupported(Operation::SetRowLimit))
    ));
    assert!(matches!(
        rs.row_position().unwrap_err(),
        Error::CannotGetRowPosition(DriverError::Unsupported(_))
    ));
    // fetching still works
    assert!(rs.fetch().unwrap().is_some());
}

#[test]
fn type_mismatch_fails_the_row() {
    let desc = Arc::new(
        ResultDescriptor::builder()
            .column("id", ValueType::Integer, 1)
            .column("born", ValueType::Timestamp, 2)
            .build(),
    );
    let date = NaiveDate::from_ymd_opt(1990, 5, 17).unwrap();
    let source = MemorySource::new(vec![vec![Some(Value::Integer(1)), Some(Value::Date(date))]]);
    let mut rs = ResultSet::new(source, desc);
    let err = rs.fetch().unwrap_err();
    assert!(matches!(
        err,
        Error::CannotGetColumnValue {
            value_type: ValueType::Timestamp,
            position: 2,
            source: DriverError::Failed(_),
        }
    ));
}

#[test]
fn timestamps_round_trip_through_driver() {
    let desc = Arc::new(
        ResultDescriptor::builder()
            .column("at", ValueType::Timestamp, 1)
            .build(),
    );
    let ts = NaiveDateTime::parse_from_str("2022-11-30 08:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let source = MemorySource::new(vec![vec![Some(Value::Timestamp(ts))], vec![None]]);
    let mut rs = ResultSet::new(source, desc);
    assert_eq!(rs.fetch().unwrap().unwrap().get(1), Some(&Value::Timestamp(ts)));
    assert_eq!(rs.fetch().unwrap().unwrap().get(1), None);
}

#[test]
fn close_releases_driver() {
    let mut source = MemorySource::new(people());
    {
        let rs = ResultSet::new(&mut source, people_descriptor());
        rs.close().unwrap();
    }
    assert!(source.is_closed());
    // a closed driver refuses to produce rows
    assert!(source.advance().is_err());
}

#[test]
fn dropping_closes_driver() {
    let mut source = MemorySource::new(people());
    {
        let mut rs = ResultSet::new(&mut source, people_descriptor());
        rs.fetch().unwrap();
    }
    assert!(source.is_closed());
}

#[test]
fn decimals_and_times_read_through_driver() {
    let desc = Arc::new(
        ResultDescriptor::builder()
            .column("price", ValueType::Decimal, 1)
            .column("opens", ValueType::Time, 2)
            .build(),
    );
    let price = Decimal::new(1999, 2);
    let opens = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    let source = MemorySource::new(vec![
        vec![Some(Value::from(price)), Some(Value::from(opens))],
        vec![None, Some(Value::from(price))],
    ]);
    let mut rs = ResultSet::new(source, desc);
    let row = rs.fetch().unwrap().unwrap();
    assert_eq!(row.get(1).and_then(Value::as_decimal), Some(price));
    assert_eq!(row.get(2).and_then(Value::as_time), Some(opens));

    // a decimal stored where a time is declared fails the row
    assert!(matches!(
        rs.fetch().unwrap_err(),
        Error::CannotGetColumnValue {
            value_type: ValueType::Time,
            position: 2,
            ..
        }
    ));
}
