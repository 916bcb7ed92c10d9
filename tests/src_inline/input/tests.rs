use super::*;
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("pollscore_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const RESULTS_MD: &str = "\
Official canvass, partial.

| Rank | Candidate Name | Number of Votes |
|------|----------------|-----------------|
| 2 | TULFO, ERWIN | 17,118,881 |
| 1 | GO, BONG GO | 27,121,073 |
| 3 | AQUINO, BAM | 20,971,899 |
";

const POLLS_MD: &str = "\
| Candidate | Party | Pulse<br>Asia | SWS |
|---|---|---|---|
| Erwin Tulfo | Lakas | 62.8% | 58% |
| Bong Go | PDP | 61.1% | - |
| Bam Aquino | KANP | **35.0%** | 40% |
";

fn paths(dir: &Path, aliases: Option<PathBuf>) -> InputPaths {
    InputPaths {
        results: dir.join("results.md"),
        polls: dir.join("polls.md"),
        aliases,
        builtin_aliases: true,
    }
}

#[test]
fn test_load_input_markdown() {
    let dir = make_temp_dir();
    fs::write(dir.join("results.md"), RESULTS_MD).unwrap();
    fs::write(dir.join("polls.md"), POLLS_MD).unwrap();

    let bundle = load_input(&paths(&dir, None)).unwrap();
    let names: Vec<&str> = bundle.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["GO, BONG GO", "AQUINO, BAM", "TULFO, ERWIN"]);
    assert_eq!(bundle.results[0].votes, Some(27_121_073));

    assert_eq!(bundle.poll_layout, PollLayout::Wide);
    assert_eq!(bundle.polls.len(), 2);
    assert_eq!(bundle.polls[0].station, "Pulse Asia");
    assert_eq!(bundle.polls[0].standings.len(), 3);
    // SWS has no figure for Bong Go
    assert_eq!(bundle.polls[1].station, "SWS");
    assert_eq!(bundle.polls[1].standings.len(), 2);
    assert_eq!(bundle.polls[1].standings[0].name, "Erwin Tulfo");
    assert!(bundle.aliases.is_empty());
}

#[test]
fn test_load_input_gz_and_aliases() {
    let dir = make_temp_dir();
    let gz = fs::File::create(dir.join("results.csv.gz")).unwrap();
    let mut enc = GzEncoder::new(gz, Compression::default());
    enc.write_all(b"Candidate Name,Votes\nBam Aquino,\"20,971,899\"\nBong Go,\"27,121,073\"\n")
        .unwrap();
    enc.finish().unwrap();
    fs::write(dir.join("polls.md"), POLLS_MD).unwrap();
    fs::write(
        dir.join("aliases.csv"),
        "Alias,Canonical\nBenhur Abalos,Benjamin Abalos\n,Nobody\n",
    )
    .unwrap();

    let mut p = paths(&dir, Some(dir.join("aliases.csv")));
    p.results = dir.join("results.csv.gz");
    let bundle = load_input(&p).unwrap();
    assert_eq!(bundle.results[0].name, "Bong Go");
    assert_eq!(bundle.aliases.len(), 1);
    assert_eq!(bundle.aliases[0].canonical, "Benjamin Abalos");
}

#[test]
fn test_load_input_missing_file_is_fatal() {
    let dir = make_temp_dir();
    fs::write(dir.join("polls.md"), POLLS_MD).unwrap();
    let err = load_input(&paths(&dir, None)).unwrap_err();
    match err {
        Error::Load { path, source } => {
            assert!(path.ends_with("results.md"));
            assert!(matches!(source, InputError::MissingInput(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_input_rejects_unknown_extension() {
    let dir = make_temp_dir();
    fs::write(dir.join("results.xlsx"), "x").unwrap();
    fs::write(dir.join("polls.md"), POLLS_MD).unwrap();
    let mut p = paths(&dir, None);
    p.results = dir.join("results.xlsx");
    let err = load_input(&p).unwrap_err();
    assert!(err.to_string().contains("unsupported table format"));
}

#[test]
fn test_load_input_empty_results_is_fatal() {
    let dir = make_temp_dir();
    fs::write(
        dir.join("results.md"),
        "| Candidate Name | Number of Votes |\n|---|---|\n",
    )
    .unwrap();
    fs::write(dir.join("polls.md"), POLLS_MD).unwrap();
    let err = load_input(&paths(&dir, None)).unwrap_err();
    assert!(err.to_string().contains("no candidates"));
}

#[test]
fn test_parse_percentage() {
    assert_eq!(parse_percentage("34.5%"), Some(34.5));
    assert_eq!(parse_percentage("**34.5%**"), Some(34.5));
    assert_eq!(parse_percentage(" 12 "), Some(12.0));
    assert_eq!(parse_percentage("-"), None);
    assert_eq!(parse_percentage("n/a"), None);
    assert_eq!(parse_percentage(""), None);
    assert_eq!(parse_percentage("inf"), None);
}

#[test]
fn test_parse_votes_separators() {
    use crate::input::results::parse_votes;
    assert_eq!(parse_votes("27,121,073"), Some(27_121_073));
    assert_eq!(parse_votes("1 234"), Some(1234));
    assert_eq!(parse_votes(""), None);
    assert_eq!(parse_votes("12.5"), None);
}

#[test]
fn test_long_layout_groups_by_station() {
    use crate::input::polls::parse_polls;
    use crate::input::table::parse_delimited;

    let csv = "Station,Rank,Candidate,Percentage\n\
               B,2,Two,40%\n\
               A,1,One,50%\n\
               B,1,One,55%\n\
               A,2,Two,30%\n";
    let table = parse_delimited(csv.as_bytes(), b',').unwrap();
    let (layout, records) = parse_polls(&table).unwrap();
    assert_eq!(layout, PollLayout::Long);
    let stations: Vec<&str> = records.iter().map(|r| r.station.as_str()).collect();
    assert_eq!(stations, vec!["B", "A"]);
    assert_eq!(records[0].standings[0].name, "One");
    assert_eq!(records[0].standings[0].percentage, Some(55.0));
}

#[test]
fn test_long_layout_bad_rank_is_error() {
    use crate::input::polls::parse_polls;
    use crate::input::table::parse_delimited;

    let csv = "Station,Rank,Candidate\nA,first,One\n";
    let table = parse_delimited(csv.as_bytes(), b',').unwrap();
    assert!(matches!(parse_polls(&table), Err(InputError::Parse(_))));
}

#[test]
fn test_results_without_votes_use_rank() {
    use crate::input::results::parse_results;
    use crate::input::table::parse_delimited;

    let csv = "Rank,Name\n3,C\n1,A\n,D\n2,B\n";
    let table = parse_delimited(csv.as_bytes(), b',').unwrap();
    let rows = parse_results(&table).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
}

#[test]
fn test_results_invalid_votes_is_error() {
    use crate::input::results::parse_results;
    use crate::input::table::parse_delimited;

    let csv = "Candidate Name,Votes\nA,lots\n";
    let table = parse_delimited(csv.as_bytes(), b',').unwrap();
    assert!(matches!(parse_results(&table), Err(InputError::Parse(_))));
}

#[test]
fn test_alias_table_requires_columns() {
    use crate::input::aliases::parse_aliases;
    use crate::input::table::parse_delimited;

    let table = parse_delimited("From,To\na,b\n".as_bytes(), b',').unwrap();
    assert!(matches!(
        parse_aliases(&table),
        Err(InputError::InvalidInput(_))
    ));
}
