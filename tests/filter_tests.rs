use oapi_diff::filter::{filter_records, FilterConfig, PathPattern, PatternSegment, RecordFilter};
use oapi_diff::{compare, parse_yaml, Category, ChangeRecord};

fn sample_records() -> Vec<ChangeRecord> {
    let old = parse_yaml(
        r#"
openapi: 3.0.0
info:
  version: 1.0.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
  /owners:
    get: {}
components:
  schemas:
    Pet:
      properties:
        name:
          type: string
"#,
    )
    .unwrap();
    let new = parse_yaml(
        r#"
openapi: 3.0.0
info:
  version: 1.1.0
paths:
  /pets:
    get:
      responses:
        "200":
          description: Success
  /stores:
    get: {}
components:
  schemas:
    Pet:
      properties:
        name:
          type: string
          description: The pet name
"#,
    )
    .unwrap();
    compare(&old, &new).unwrap().records
}

#[test]
fn test_pattern_parse() {
    let pattern = PathPattern::parse("components.*.**");
    assert_eq!(
        pattern.segments,
        vec![
            PatternSegment::Literal("components".to_string()),
            PatternSegment::SingleWildcard,
            PatternSegment::DoubleWildcard,
        ]
    );
}

#[test]
fn test_pattern_literal_and_wildcards() {
    assert!(PathPattern::parse("info.version").matches_locator("info.version"));
    assert!(!PathPattern::parse("info.version").matches_locator("info.title"));
    assert!(PathPattern::parse("info.*").matches_locator("info.title"));
    assert!(!PathPattern::parse("info.*").matches_locator("info"));
    assert!(PathPattern::parse("**.description").matches_locator("a.b.c.description"));
    assert!(PathPattern::parse("**").matches_locator("/pets.get"));
}

#[test]
fn test_pattern_over_media_type_segments() {
    let pattern = PathPattern::parse("/pets.get.responses.*.content.application/json.**");
    assert!(pattern.matches_locator("/pets.get.responses.200.content.application/json.schema"));
    assert!(!pattern.matches_locator("/pets.get.responses.200.content.application/xml"));
}

#[test]
fn test_no_filters_keeps_everything() {
    let records = sample_records();
    let kept = filter_records(&records, &FilterConfig::new());
    assert_eq!(kept, records);
}

#[test]
fn test_record_filter_modes() {
    let records = sample_records();

    let breaking = filter_records(
        &records,
        &FilterConfig::new().with_record_filter(RecordFilter::Breaking),
    );
    assert_eq!(breaking.len(), 1);
    assert_eq!(breaking[0].path, "/owners");

    let added = filter_records(
        &records,
        &FilterConfig::new().with_record_filter(RecordFilter::Added),
    );
    assert!(added.iter().all(|r| r.category() == Category::Added));
    assert_eq!(added.len(), 1);

    let modified = filter_records(
        &records,
        &FilterConfig::new().with_record_filter(RecordFilter::Modified),
    );
    assert_eq!(modified.len(), 3);
}

#[test]
fn test_ignore_and_only_patterns() {
    let records = sample_records();

    let without_info = filter_records(&records, &FilterConfig::new().ignore("info.**"));
    assert!(without_info.iter().all(|r| !r.path.starts_with("info")));
    assert_eq!(without_info.len(), records.len() - 1);

    let components = filter_records(&records, &FilterConfig::new().only("components.**"));
    assert_eq!(components.len(), 1);
    assert_eq!(components[0].label(), "Schema Property Description Changed");

    let combined = filter_records(
        &records,
        &FilterConfig::new()
            .only("/pets.**")
            .only("/owners")
            .only("/stores")
            .ignore("/owners")
            .with_record_filter(RecordFilter::All),
    );
    let paths: Vec<&str> = combined.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/pets.get.responses.200", "/stores"]);
}

#[test]
fn test_filter_preserves_order_and_ids() {
    let records = sample_records();
    let kept = filter_records(
        &records,
        &FilterConfig::new().with_record_filter(RecordFilter::Modified),
    );
    let sequences: Vec<u64> = kept.iter().map(|r| r.sequence).collect();
    let mut sorted = sequences.clone();
    sorted.sort();
    assert_eq!(sequences, sorted);
}
