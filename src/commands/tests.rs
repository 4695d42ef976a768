use crate::cli::SchemaArgs;
use crate::commands::extract::parse_want;
use crate::commands::split_query::parse_date_pair;

#[test]
fn parse_want_splits_line_and_document_ids() {
    let (line_no, ids) = parse_want("3:0, 1,2").expect("valid entry");
    assert_eq!(line_no, "3");
    assert_eq!(ids, vec!["0", "1", "2"]);

    assert!(parse_want("3").is_err());
    assert!(parse_want(":1").is_err());
    assert!(parse_want("3:").is_err());
}

#[test]
fn parse_date_pair_requires_both_fields() {
    let pair = parse_date_pair("filed_from:filed_to").expect("valid pair");
    assert_eq!(pair.from_field, "filed_from");
    assert_eq!(pair.to_field, "filed_to");

    assert!(parse_date_pair("filed_from").is_err());
    assert!(parse_date_pair("filed_from:").is_err());
}

#[test]
fn schema_args_build_default_and_custom_codecs() {
    let default = SchemaArgs {
        godls_name: "goDLS".to_string(),
        godls_args: Vec::new(),
    };
    let codec = default.codec().expect("default codec");
    assert_eq!(codec.schema().arity(), 8);

    let custom = SchemaArgs {
        godls_name: "goDoc".to_string(),
        godls_args: vec!["action".to_string(), " seq ".to_string()],
    };
    let codec = custom.codec().expect("custom codec");
    assert_eq!(codec.schema().arg_names(), ["action", "seq"]);

    let broken = SchemaArgs {
        godls_name: "goDLS".to_string(),
        godls_args: vec!["hash".to_string()],
    };
    assert!(broken.codec().is_err());
}
