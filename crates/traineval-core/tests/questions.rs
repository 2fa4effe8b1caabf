use traineval_core::error::CoreError;
use traineval_core::models::questions::{Q24_COLUMN, Q25_COLUMN, QuestionSet};
use traineval_core::models::table::{CellValue, EvaluationTable};

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn survey_table() -> EvaluationTable {
    EvaluationTable::new(
        headers(&[
            "Respondent",
            "Q18: Relevance",
            "Q17: Trainer",
            "Q19: Materials",
            "Q20: Pace",
            "Q21: Venue",
            "Q22: Overall",
            "Q23: Department",
            Q24_COLUMN,
            Q25_COLUMN,
        ]),
        vec![],
    )
}

#[test]
fn resolves_rating_columns_in_table_order() {
    let resolved = QuestionSet::default().resolve(&survey_table()).unwrap();

    let names: Vec<_> = resolved.ratings.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Q18: Relevance",
            "Q17: Trainer",
            "Q19: Materials",
            "Q20: Pace",
            "Q21: Venue",
            "Q22: Overall",
        ]
    );
    assert_eq!(resolved.ratings[0].question_id, "Q18");
    assert_eq!(resolved.ratings[0].index, 1);
    assert!(resolved.unmatched_ratings.is_empty());
}

#[test]
fn resolves_open_text_columns_in_question_order() {
    let resolved = QuestionSet::default().resolve(&survey_table()).unwrap();

    assert_eq!(resolved.open_text.len(), 2);
    assert_eq!(resolved.open_text[0].question_id, "Q24");
    assert_eq!(resolved.open_text[0].index, 8);
    assert_eq!(resolved.open_text[1].question_id, "Q25");
    assert_eq!(resolved.open_text[1].index, 9);
}

#[test]
fn missing_open_text_column_is_an_error() {
    let table = EvaluationTable::new(headers(&["Q17: Trainer", Q24_COLUMN]), vec![]);

    match QuestionSet::default().resolve(&table) {
        Err(CoreError::MissingColumn(column)) => assert_eq!(column, Q25_COLUMN),
        other => panic!("expected missing column, got {other:?}"),
    }
}

#[test]
fn unmatched_rating_prefixes_are_reported() {
    let table = EvaluationTable::new(
        headers(&["Q17: Trainer", "Q22: Overall", Q24_COLUMN, Q25_COLUMN]),
        vec![],
    );

    let resolved = QuestionSet::default().resolve(&table).unwrap();
    assert_eq!(resolved.ratings.len(), 2);
    assert_eq!(resolved.unmatched_ratings, vec!["Q18", "Q19", "Q20", "Q21"]);
}

#[test]
fn empty_rating_list_is_rejected() {
    let set = QuestionSet {
        ratings: vec![],
        ..QuestionSet::default()
    };

    assert!(matches!(
        set.resolve(&survey_table()),
        Err(CoreError::NoRatingQuestions)
    ));
}

#[test]
fn headers_are_made_unique() {
    let table = EvaluationTable::new(
        headers(&["Q17", "", "Q17", "  ", "Q17"]),
        vec![vec![CellValue::Number(1.0)]],
    );

    assert_eq!(
        table.columns(),
        &["Q17", "Unnamed: 1", "Q17.1", "Unnamed: 3", "Q17.2"]
    );
    // short rows are padded to the table width
    assert_eq!(table.get(0, "Q17.2"), Some(&CellValue::Empty));
}

#[test]
fn numeric_coercion_skips_non_numbers() {
    assert_eq!(CellValue::Number(4.5).as_number(), Some(4.5));
    assert_eq!(CellValue::Text(" 3 ".to_string()).as_number(), Some(3.0));
    assert_eq!(CellValue::Bool(true).as_number(), Some(1.0));
    assert_eq!(CellValue::Text("x".to_string()).as_number(), None);
    assert_eq!(CellValue::Text("NaN".to_string()).as_number(), None);
    assert_eq!(CellValue::Empty.as_number(), None);
}
