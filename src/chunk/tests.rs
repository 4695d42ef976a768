use serde_json::json;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn date_pair() -> Vec<DatePair> {
    vec![DatePair::new("date_from", "date_to")]
}

#[test]
fn one_year_range_splits_into_twelve_configs() {
    let config: QueryConfig = [("date_from", "01/01/2020"), ("date_to", "01/01/2021")]
        .into_iter()
        .collect();

    let configs = RangeChunker::new(180, 31)
        .expect("valid parameters")
        .split(&config, &date_pair())
        .expect("splits");

    assert_eq!(configs.len(), 12);
    assert_eq!(configs[0].get_str("date_from"), Some("01/01/2020"));
    assert_eq!(configs[0].get_str("date_to"), Some("02/01/2020"));
    assert_eq!(configs[11].get_str("date_from"), Some("12/07/2020"));
    assert_eq!(configs[11].get_str("date_to"), Some("01/01/2021"));
}

#[test]
fn consecutive_windows_advance_by_chunk_size() {
    let config: QueryConfig = [("date_from", "2019-03-15"), ("date_to", "2020-02-01")]
        .into_iter()
        .collect();

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("splits");

    assert!(configs.len() >= 2);
    let starts: Vec<NaiveDate> = configs
        .iter()
        .map(|c| parse_query_date(c.get_str("date_from").expect("from")).expect("date"))
        .collect();
    for window in starts.windows(2) {
        assert_eq!((window[1] - window[0]).num_days(), DEFAULT_CHUNK_SIZE_DAYS);
    }
    assert_eq!(starts[0], date(2019, 3, 15));
    assert_eq!(
        configs.last().and_then(|c| c.get_str("date_to")),
        Some("02/01/2020")
    );
}

#[test]
fn narrow_range_returns_original_config() {
    let config: QueryConfig = [
        ("date_from", json!("01/01/2020")),
        ("date_to", json!("06/28/2020")),
        ("case_type", json!("cv")),
    ]
    .into_iter()
    .collect();

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("no split");

    assert_eq!(configs, vec![config]);
}

#[test]
fn gap_equal_to_max_gap_is_split() {
    let from = date(2020, 1, 1);
    let to = from + TimeDelta::days(180);
    let config: QueryConfig = [
        ("date_from", format_wire_date(from)),
        ("date_to", format_wire_date(to)),
    ]
    .into_iter()
    .collect();

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("splits");
    assert_eq!(configs.len(), 6);
}

#[test]
fn other_fields_are_preserved_in_every_chunk() {
    let config: QueryConfig = [
        ("date_from", json!("01/01/2020")),
        ("date_to", json!("01/01/2021")),
        ("case_type", json!("cv")),
        ("nature_of_suit", json!(["440", "442"])),
    ]
    .into_iter()
    .collect();

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("splits");

    for chunk in &configs {
        assert_eq!(chunk.len(), 4);
        assert_eq!(chunk.get("case_type"), Some(&json!("cv")));
        assert_eq!(chunk.get("nature_of_suit"), Some(&json!(["440", "442"])));
    }
}

#[test]
fn only_first_qualifying_pair_is_split() {
    let config: QueryConfig = [
        ("filed_from", "01/01/2020"),
        ("filed_to", "03/01/2020"),
        ("terminated_from", "01/01/2018"),
        ("terminated_to", "01/01/2020"),
        ("last_entry_from", "01/01/2010"),
        ("last_entry_to", "01/01/2020"),
    ]
    .into_iter()
    .collect();
    let pairs = vec![
        DatePair::new("filed_from", "filed_to"),
        DatePair::new("terminated_from", "terminated_to"),
        DatePair::new("last_entry_from", "last_entry_to"),
    ];

    let configs = RangeChunker::default()
        .split(&config, &pairs)
        .expect("splits");

    assert!(configs.len() > 2);
    for chunk in &configs {
        assert_eq!(chunk.get_str("filed_from"), Some("01/01/2020"));
        assert_eq!(chunk.get_str("filed_to"), Some("03/01/2020"));
        assert_eq!(chunk.get_str("last_entry_from"), Some("01/01/2010"));
        assert_eq!(chunk.get_str("last_entry_to"), Some("01/01/2020"));
    }
    assert_eq!(configs[0].get_str("terminated_from"), Some("01/01/2018"));
    assert_eq!(
        configs.last().and_then(|c| c.get_str("terminated_to")),
        Some("01/01/2020")
    );
}

#[test]
fn missing_from_field_skips_pair() {
    let config: QueryConfig = [("date_from", json!(null)), ("date_to", json!("01/01/2021"))]
        .into_iter()
        .collect();

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("nothing to split");
    assert_eq!(configs, vec![config]);
}

#[test]
fn open_ended_range_runs_to_today() {
    let config: QueryConfig = [("date_from", "01/01/2020")].into_iter().collect();

    let configs = RangeChunker::default()
        .split_with_today(&config, &date_pair(), date(2020, 12, 31))
        .expect("splits");

    assert_eq!(configs.len(), 12);
    assert_eq!(
        configs.last().and_then(|c| c.get_str("date_to")),
        Some("12/31/2020")
    );
}

#[test]
fn inverted_range_is_rejected() {
    let config: QueryConfig = [("date_from", "06/01/2020"), ("date_to", "05/31/2020")]
        .into_iter()
        .collect();

    let err = RangeChunker::default()
        .split(&config, &date_pair())
        .unwrap_err();
    assert!(matches!(
        err,
        ChunkError::InvalidRange { from, to } if from == date(2020, 6, 1) && to == date(2020, 5, 31)
    ));
}

#[test]
fn inverted_later_pair_is_rejected_when_checked() {
    let config: QueryConfig = [
        ("filed_from", "01/01/2020"),
        ("filed_to", "01/02/2020"),
        ("terminated_from", "01/01/2021"),
        ("terminated_to", "01/01/2020"),
    ]
    .into_iter()
    .collect();
    let pairs = vec![
        DatePair::new("filed_from", "filed_to"),
        DatePair::new("terminated_from", "terminated_to"),
    ];

    let err = RangeChunker::default().split(&config, &pairs).unwrap_err();
    assert!(matches!(err, ChunkError::InvalidRange { .. }));
}

#[test]
fn unparseable_and_non_string_dates_are_errors() {
    let garbled: QueryConfig = [("date_from", "sometime")].into_iter().collect();
    assert!(matches!(
        RangeChunker::default().split(&garbled, &date_pair()),
        Err(ChunkError::InvalidDate { field, .. }) if field == "date_from"
    ));

    let numeric: QueryConfig = [("date_from", json!(20200101))].into_iter().collect();
    assert!(matches!(
        RangeChunker::default().split(&numeric, &date_pair()),
        Err(ChunkError::NonStringDate { .. })
    ));
}

#[test]
fn chunker_parameters_must_be_positive() {
    assert!(matches!(
        RangeChunker::new(0, 31),
        Err(ChunkError::InvalidParameters(_))
    ));
    assert!(matches!(
        RangeChunker::new(180, 0),
        Err(ChunkError::InvalidParameters(_))
    ));
}

#[test]
fn chunk_range_final_window_may_be_short() {
    let ranges = chunk_range(date(2020, 1, 1), date(2020, 3, 10), 31).expect("chunks");

    assert_eq!(
        ranges,
        vec![
            DateRange {
                start: date(2020, 1, 1),
                end: date(2020, 2, 1),
            },
            DateRange {
                start: date(2020, 2, 1),
                end: date(2020, 3, 3),
            },
            DateRange {
                start: date(2020, 3, 3),
                end: date(2020, 3, 10),
            },
        ]
    );
}

#[test]
fn parse_query_date_accepts_known_forms() {
    assert_eq!(parse_query_date("01/02/2020"), Some(date(2020, 1, 2)));
    assert_eq!(parse_query_date(" 01/02/20 "), Some(date(2020, 1, 2)));
    assert_eq!(parse_query_date("2020-01-02"), Some(date(2020, 1, 2)));
    assert_eq!(parse_query_date("13/40/2020"), None);
    assert_eq!(parse_query_date("yesterday"), None);
}

#[test]
fn split_configs_keep_source_field_order() {
    let config: QueryConfig = serde_json::from_str(
        r#"{"case_type":"cv","date_to":"01/01/2021","date_from":"01/01/2020","court":"ilnd"}"#,
    )
    .expect("config parses");

    let configs = RangeChunker::default()
        .split(&config, &date_pair())
        .expect("splits");

    let fields: Vec<&str> = configs[0].fields().map(|(field, _)| field).collect();
    assert_eq!(fields, vec!["case_type", "date_to", "date_from", "court"]);
    let json = serde_json::to_string(&configs[0]).expect("serializes");
    assert!(json.starts_with(r#"{"case_type":"cv","date_to":"02/01/2020""#));
}
