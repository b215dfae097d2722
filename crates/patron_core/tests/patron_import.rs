use patron_core::{new_registry, ImportError, PatronValidationError, SkipReason, SkippedLine};
use rust_decimal::Decimal;
use std::io::{self, BufReader, Cursor, Read, Write};
use std::str::FromStr;
use tempfile::NamedTempFile;

fn import_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn import_skips_malformed_and_unparsable_lines() {
    let file = import_file(
        "1234567-Jane-123 Main St-10.00\nbad-line\n7654321-Tom-456 Oak St-abc\n",
    );
    let mut controller = new_registry();

    assert_eq!(controller.import_from_file(file.path()), 1);

    let all = controller.list_patrons();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), "1234567");
    assert_eq!(all[0].fine(), Decimal::from_str("10.00").unwrap());
}

#[test]
fn import_skips_ids_already_registered() {
    let file = import_file("1234567-Jane-Main-1\n2345678-Tom-Oak-2\n");
    let mut controller = new_registry();
    controller.add_patron("1234567", "Existing", "Elm", Decimal::ZERO);

    assert_eq!(controller.import_from_file(file.path()), 1);
    assert_eq!(controller.search_by_id("1234567").unwrap().name(), "Existing");
    assert!(controller.search_by_id("2345678").is_some());
}

#[test]
fn import_trims_fields_and_tolerates_trailing_separator() {
    let mut controller = new_registry();
    let report =
        controller.import_from_reader(Cursor::new(" 1234567 - Jane - Main St - 12.345 -\r\n"));

    assert_eq!(report.imported, 1);
    let patron = controller.search_by_id("1234567").unwrap();
    assert_eq!(patron.name(), "Jane");
    assert_eq!(patron.address(), "Main St");
    assert_eq!(patron.fine().to_string(), "12.35");
}

#[test]
fn import_report_records_each_skip_reason() {
    let input = "\
1234567-Jane-Main-10
short-line
2345678-Tom-Oak-ten
3456789--Elm-5
1234567-Dup-Main-1
4567890-Mary-Jane-Pine-1
";
    let mut controller = new_registry();
    let report = controller.import_from_reader(Cursor::new(input));

    assert_eq!(report.imported, 1);
    assert!(report.read_error.is_none());

    let reasons = report
        .skipped
        .iter()
        .map(|skip| (skip.line_number, skip.reason.clone()))
        .collect::<Vec<_>>();
    assert_eq!(reasons.len(), 5);
    assert_eq!(reasons[0], (2, SkipReason::MalformedLine { field_count: 2 }));
    assert!(matches!(reasons[1], (3, SkipReason::UnparsableFine(_))));
    assert_eq!(
        reasons[2],
        (4, SkipReason::Rejected(PatronValidationError::InvalidName))
    );
    assert_eq!(
        reasons[3],
        (5, SkipReason::DuplicateId("1234567".to_string()))
    );
    assert_eq!(reasons[4], (6, SkipReason::MalformedLine { field_count: 5 }));
}

#[test]
fn import_rejects_out_of_range_fine() {
    let mut controller = new_registry();
    let report = controller.import_from_reader(Cursor::new("1234567-Jane-Main-251\n"));

    assert_eq!(report.imported, 0);
    assert!(matches!(
        report.skipped[0].reason,
        SkipReason::Rejected(PatronValidationError::InvalidFine(_))
    ));
}

#[test]
fn missing_file_yields_zero_and_leaves_repository_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let mut controller = new_registry();
    controller.add_patron("1234567", "Jane", "Main", Decimal::ONE);

    assert_eq!(controller.import_from_file(&missing), 0);
    assert_eq!(controller.list_patrons().len(), 1);

    let err = controller.import_report_from_file(&missing).unwrap_err();
    assert!(matches!(err, ImportError::FileUnreadable { ref path, .. } if *path == missing));
}

#[test]
fn invalid_utf8_line_does_not_stop_import() {
    let bytes = b"1234567-Jos\xe9-Main-1\n2345678-Tom-Oak-2\n3456789-Ann-Elm-3\n".to_vec();
    let mut controller = new_registry();
    let report = controller.import_from_reader(Cursor::new(bytes));

    assert_eq!(report.imported, 3);
    assert!(report.read_error.is_none());
    assert_eq!(
        controller.search_by_id("1234567").unwrap().name(),
        "Jos\u{FFFD}"
    );
    assert!(controller.search_by_id("3456789").is_some());
}

#[test]
fn fine_with_digit_separator_is_unparsable() {
    let mut controller = new_registry();
    let report = controller.import_from_reader(Cursor::new("1234567-Jane-Main-1_0\n"));

    assert_eq!(report.imported, 0);
    assert!(matches!(
        report.skipped[0],
        SkippedLine {
            line_number: 1,
            reason: SkipReason::UnparsableFine(_),
        }
    ));
    assert!(controller.list_patrons().is_empty());
}

struct BrokenSource;

impl Read for BrokenSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unavailable"))
    }
}

#[test]
fn read_failure_keeps_records_imported_before_it() {
    let source = Cursor::new(b"1234567-Jane-Main-1\n".to_vec()).chain(BrokenSource);
    let mut controller = new_registry();
    let report = controller.import_from_reader(BufReader::new(source));

    assert_eq!(report.imported, 1);
    assert_eq!(report.read_error.as_deref(), Some("device unavailable"));
    assert!(controller.search_by_id("1234567").is_some());
}
