use super::*;

#[test]
fn test_markdown_table_with_prose_and_br() {
    let text = "# Senate\n\nSome prose.\n\n| Name | Pulse<br>Asia |\n| :--- | ---: |\n| A | 1% |\n\n| B | 2% |\nTrailing prose.\n";
    let table = parse_markdown_table(text.as_bytes()).unwrap();
    assert_eq!(table.headers, vec!["Name", "Pulse Asia"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].line, 7);
    assert_eq!(table.rows[1].cells, vec!["B", "2%"]);
}

#[test]
fn test_markdown_rows_padded_and_truncated() {
    let text = "| a | b | c |\n|---|---|---|\n| 1 |\n| 1 | 2 | 3 | 4 |\n";
    let table = parse_markdown_table(text.as_bytes()).unwrap();
    assert_eq!(table.rows[0].cells, vec!["1", "", ""]);
    assert_eq!(table.rows[1].cells, vec!["1", "2", "3"]);
}

#[test]
fn test_markdown_without_separator_is_error() {
    let text = "| a | b |\n| 1 | 2 |\n";
    assert!(matches!(
        parse_markdown_table(text.as_bytes()),
        Err(InputError::Parse(_))
    ));
    assert!(matches!(
        parse_markdown_table("| a | b |\n".as_bytes()),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_markdown_no_table_is_error() {
    let err = parse_markdown_table("just text\n".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("no markdown table"));
}

#[test]
fn test_delimited_trims_and_skips_blank_records() {
    let text = "Station\t Candidate \tPercentage\nA\t One \t 50%\n\t\t\nB\tTwo\n";
    let table = parse_delimited(text.as_bytes(), b'\t').unwrap();
    assert_eq!(table.headers, vec!["Station", "Candidate", "Percentage"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells, vec!["A", "One", "50%"]);
    assert_eq!(table.rows[1].cells, vec!["B", "Two", ""]);
    assert_eq!(table.rows[1].line, 4);
}

#[test]
fn test_column_lookup_is_case_insensitive_in_preference_order() {
    let table = Table {
        headers: vec!["candidate".into(), "Standardized Name".into()],
        rows: Vec::new(),
    };
    assert_eq!(table.column(&["Standardized Name", "Candidate"]), Some(1));
    assert_eq!(table.column(&["CANDIDATE"]), Some(0));
    assert_eq!(table.column(&["Votes"]), None);
}

#[test]
fn test_detect_format() {
    assert_eq!(detect_format(Path::new("a.md")).unwrap(), TableFormat::Markdown);
    assert_eq!(detect_format(Path::new("a.CSV.gz")).unwrap(), TableFormat::Csv);
    assert_eq!(detect_format(Path::new("dir/a.tsv")).unwrap(), TableFormat::Tsv);
    assert!(detect_format(Path::new("a.json")).is_err());
}
