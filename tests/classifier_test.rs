//! Tests for locating the device argument in balena CLI command lines

use rstest::rstest;

use balena_wrap::domain::{locate_identifier_slot, DomainError};

#[rstest]
#[case::device_info(&["device", "abc123"], 1)]
#[case::device_rename(&["device", "rename", "abc123", "new-name"], 2)]
#[case::device_reboot_with_flag(&["device", "reboot", "--force", "abc123"], 3)]
#[case::device_public_url(&["device", "public-url", "abc123", "--enable"], 2)]
#[case::device_os_update(&["device", "os-update", "kitchen", "--version", "2.x"], 2)]
#[case::ssh(&["ssh", "abc123"], 1)]
#[case::ssh_with_flag(&["ssh", "--port", "abc123"], 2)]
#[case::tunnel(&["tunnel", "abc123", "-p", "22222:22222"], 1)]
#[case::logs(&["logs", "kitchen", "--tail"], 1)]
#[case::device_flag(&["env", "add", "--device", "abc123", "KEY", "VAL"], 3)]
#[case::device_flag_last_value(&["tags", "--device", "abc123"], 2)]
fn given_device_command_when_locating_then_identifier_index(
    #[case] tokens: &[&str],
    #[case] expected: usize,
) {
    assert_eq!(locate_identifier_slot(tokens).unwrap(), Some(expected));
}

#[rstest]
#[case::empty(&[])]
#[case::login(&["login"])]
#[case::devices_list(&["devices", "--fleet", "myfleet"])]
#[case::push(&["push", "myfleet", "--source", "."])]
#[case::help(&["--help"])]
fn given_non_device_command_when_locating_then_none(#[case] tokens: &[&str]) {
    assert_eq!(locate_identifier_slot(tokens).unwrap(), None);
}

#[rstest]
#[case::bare_device(&["device"])]
#[case::device_flags_only(&["device", "--help"])]
#[case::rename_without_device(&["device", "rename"])]
#[case::ssh_without_device(&["ssh"])]
#[case::logs_flags_only(&["logs", "--tail"])]
#[case::device_flag_at_end(&["env", "add", "--device"])]
fn given_missing_identifier_when_locating_then_error_names_command(#[case] tokens: &[&str]) {
    let err = locate_identifier_slot(tokens).unwrap_err();

    match err {
        DomainError::MissingIdentifierArgument(command) => assert_eq!(command, tokens[0]),
        other => panic!("expected MissingIdentifierArgument, got {:?}", other),
    }
}

#[test]
fn given_owned_tokens_when_locating_then_same_result_as_borrowed() {
    let tokens: Vec<String> = ["device", "rename", "abc123", "x"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(locate_identifier_slot(&tokens).unwrap(), Some(2));
}
