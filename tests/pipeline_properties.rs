// End-to-end properties of the report pipeline
use reportql::engine::{ChainMode, ColumnProjector, FilterEvaluator, Paginator, SortComparator};
use reportql::query::{FilterOperator, ReportFilter, ReportSort};
use reportql::{Dataset, EngineOptions, JsonRecord, ReportExecutor, ReportRequest, Value, Voter};
use serde_json::json;

fn scored(name: &str, score: i64) -> JsonRecord {
    JsonRecord::new().with("name", name).with("score", score)
}

fn example_records() -> Vec<JsonRecord> {
    vec![scored("Ana", 10), scored("Bo", 5), scored("Cy", 10)]
}

fn names(records: &[&JsonRecord]) -> Vec<String> {
    records.iter().map(|r| r.0["name"].as_str().unwrap_or_default().to_string()).collect()
}

#[test]
fn test_sort_by_score_desc_then_name() {
    let records = example_records();
    let refs: Vec<&JsonRecord> = records.iter().collect();
    let sorted = SortComparator::sort(&refs, &[ReportSort::desc("score"), ReportSort::asc("name")]);
    assert_eq!(names(&sorted), vec!["Ana", "Cy", "Bo"]);
}

#[test]
fn test_between_is_inclusive() {
    let records = example_records();
    let passed = FilterEvaluator::apply(
        &records,
        &[ReportFilter::between("score", 5, 10)],
        ChainMode::Standard,
    )
    .unwrap();
    assert_eq!(passed.len(), 3);
}

#[test]
fn test_paginate_twenty_five_records() {
    let records: Vec<usize> = (0..25).collect();
    let page = Paginator::paginate(&records, 3, 10).unwrap();
    assert_eq!(page.data.len(), 5);
    assert_eq!(page.meta.total_pages, 3);
}

#[test]
fn test_is_empty_on_email() {
    let blank = JsonRecord::new().with("email", "");
    let filled = JsonRecord::new().with("email", "x@y.com");
    let filter = ReportFilter::unary("email", FilterOperator::IsEmpty);
    assert!(FilterEvaluator::evaluate(&blank, &filter));
    assert!(!FilterEvaluator::evaluate(&filled, &filter));
}

#[test]
fn test_empty_filters_are_identity() {
    let records = example_records();
    for mode in [ChainMode::Standard, ChainMode::Legacy] {
        let passed = FilterEvaluator::apply(&records, &[], mode).unwrap();
        assert_eq!(passed.len(), records.len());
        assert!(passed.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }
}

#[test]
fn test_greater_than_and_less_or_equal_partition_numeric_records() {
    let records: Vec<JsonRecord> = (0..20).map(|i| scored(&format!("v{i}"), (i * 7) % 13)).collect();
    for threshold in [0, 5, 6, 12, 13] {
        let above = FilterEvaluator::apply(
            &records,
            &[ReportFilter::new("score", FilterOperator::GreaterThan, threshold)],
            ChainMode::Standard,
        )
        .unwrap();
        let at_most = FilterEvaluator::apply(
            &records,
            &[ReportFilter::new("score", FilterOperator::LessThanOrEqual, threshold)],
            ChainMode::Standard,
        )
        .unwrap();
        assert_eq!(above.len() + at_most.len(), records.len());
        assert!(above.iter().all(|a| !at_most.iter().any(|b| std::ptr::eq(*a, *b))));
    }
}

#[test]
fn test_pages_cover_sorted_result() {
    let records: Vec<JsonRecord> = (0..37).map(|i| scored(&format!("v{i:02}"), i % 4)).collect();
    let refs: Vec<&JsonRecord> = records.iter().collect();
    let sorted = SortComparator::sort(&refs, &[ReportSort::asc("score")]);

    for per_page in [1, 5, 10, 37, 50] {
        let total_pages = Paginator::paginate(&sorted, 1, per_page).unwrap().meta.total_pages;
        let mut concatenated = Vec::new();
        for page in 1..=total_pages {
            concatenated.extend(Paginator::paginate(&sorted, page, per_page).unwrap().data);
        }
        assert_eq!(names(&concatenated), names(&sorted));
    }
}

#[test]
fn test_or_chaining_modes_differ() {
    // [fail, OR pass]: standard passes on the second group, legacy requires the first filter
    let record = scored("Ana", 10);
    let filters = [
        ReportFilter::new("name", FilterOperator::Equals, "Bo"),
        ReportFilter::new("score", FilterOperator::Equals, 10).or(),
    ];
    assert!(FilterEvaluator::matches(&record, &filters, ChainMode::Standard));
    assert!(!FilterEvaluator::matches(&record, &filters, ChainMode::Legacy));

    // [pass, OR fail]: legacy lets the failing filter through
    let filters = [
        ReportFilter::new("name", FilterOperator::Equals, "Ana"),
        ReportFilter::new("score", FilterOperator::Equals, 99).or(),
    ];
    assert!(FilterEvaluator::matches(&record, &filters, ChainMode::Standard));
    assert!(FilterEvaluator::matches(&record, &filters, ChainMode::Legacy));
}

#[test]
fn test_projection_is_ordered_subset() {
    let record = JsonRecord::new().with("name", "Ana").with("score", 10).with("city", "Natal");
    let columns = vec!["city".to_string(), "missing".to_string(), "name".to_string()];
    let row = ColumnProjector::project_one(&record, &columns);
    assert_eq!(row.columns().collect::<Vec<_>>(), vec!["city", "name"]);
}

#[test]
fn test_voter_dataset_report() {
    let dataset: Dataset<Voter> = Dataset::from_json_str(
        "campaign",
        &json!({
            "voters": [
                {"name": "Ana", "age": 34, "city": "Recife", "supportLevel": "strongSupport", "tags": ["donor"]},
                {"name": "Bo", "age": 61, "city": "Natal", "supportLevel": "undecided"},
                {"name": "Cy", "age": 22, "city": "Recife", "tags": ["volunteer", "donor"]},
                {"name": "Di", "city": "Recife"}
            ]
        })
        .to_string(),
    )
    .unwrap();

    let request = ReportRequest::from_json(
        r#"{
            "filters": [
                {"field": "city", "operator": "equals", "value": "Recife"},
                {"field": "tags", "operator": "in", "value": ["donor"]}
            ],
            "sorting": [{"field": "age", "direction": "desc"}],
            "columns": ["name", "age", "tags"],
            "page": 1,
            "perPage": 10
        }"#,
    )
    .unwrap();

    let response = ReportExecutor::run(&dataset.records, &request, &EngineOptions::default()).unwrap();
    assert_eq!(response.meta.total, 2);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json["data"],
        json!([
            {"name": "Ana", "age": 34, "tags": ["donor"]},
            {"name": "Cy", "age": 22, "tags": ["volunteer", "donor"]}
        ])
    );
    assert_eq!(json["meta"], json!({"page": 1, "perPage": 10, "total": 2, "totalPages": 1}));
}

#[test]
fn test_missing_sort_values_go_last() {
    let dataset: Dataset<Voter> = Dataset::from_json_str(
        "ages",
        r#"[{"name": "NoAge"}, {"name": "Old", "age": 80}, {"name": "Young", "age": 19}]"#,
    )
    .unwrap();
    let request = ReportRequest {
        sorting: vec![ReportSort::desc("age")],
        columns: vec!["name".into()],
        ..ReportRequest::default()
    };
    let response = ReportExecutor::run(&dataset.records, &request, &EngineOptions::default()).unwrap();
    let order: Vec<&Value> = response.data.iter().filter_map(|row| row.get("name")).collect();
    assert_eq!(
        order,
        vec![&Value::from("Old"), &Value::from("Young"), &Value::from("NoAge")]
    );
}
