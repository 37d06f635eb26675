use super::*;

#[test]
fn parse_import_items_drops_whitespace_and_repeats() {
    assert_eq!(parse_import_items(" 你好\n你 世界\t好 "), vec!["你", "好", "世", "界"]);
}

#[test]
fn parse_import_items_empty_text() {
    assert!(parse_import_items("  \n\t ").is_empty());
    assert!(parse_import_items("").is_empty());
}

#[test]
fn parse_import_items_keeps_non_cjk_for_server_to_skip() {
    assert_eq!(parse_import_items("a你a"), vec!["a", "你"]);
}

#[test]
fn validate_dictionary_name_trims() {
    assert_eq!(validate_dictionary_name("  HSK 1 "), Ok("HSK 1".to_owned()));
    assert!(validate_dictionary_name("   ").is_err());
}

#[test]
fn import_summary_reports_counts() {
    let result = ImportResult { imported: 3, skipped: 1 };
    assert_eq!(import_summary(result), "Imported 3, skipped 1.");
}

#[test]
fn parse_visibility_defaults_to_private() {
    assert_eq!(parse_visibility("public"), Visibility::Public);
    assert_eq!(parse_visibility("shared"), Visibility::Shared);
    assert_eq!(parse_visibility("bogus"), Visibility::Private);
}
