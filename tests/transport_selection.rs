// tests/transport_selection.rs

use std::path::PathBuf;

use croncape::errors::CroncapeError;
use croncape::fs::FileSystem;
use croncape::fs::mock::MockFileSystem;
use croncape::notify::selector::{candidates, select};
use croncape::types::{TransportKind, TransportPolicy};

#[test]
fn auto_with_only_sendmail_selects_sendmail() {
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/sbin/sendmail");

    let transport = select(TransportPolicy::Auto, &fs).unwrap();
    assert_eq!(transport.kind, TransportKind::Sendmail);
    assert_eq!(transport.path, PathBuf::from("/usr/sbin/sendmail"));
}

#[test]
fn auto_with_only_mail_selects_mail() {
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/bin/mail");

    let transport = select(TransportPolicy::Auto, &fs).unwrap();
    assert_eq!(transport.kind, TransportKind::Mail);
    assert_eq!(transport.path, PathBuf::from("/usr/bin/mail"));
}

#[test]
fn auto_with_nothing_installed_is_unavailable() {
    let fs = MockFileSystem::new();

    match select(TransportPolicy::Auto, &fs) {
        Err(CroncapeError::NoTransport(policy)) => assert_eq!(policy, TransportPolicy::Auto),
        other => panic!("Expected NoTransport, got: {:?}", other),
    }
}

#[test]
fn auto_prefers_sendmail_when_both_families_are_installed() {
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/bin/mail");
    fs.add_executable("/usr/sbin/sendmail");

    let transport = select(TransportPolicy::Auto, &fs).unwrap();
    assert_eq!(transport.kind, TransportKind::Sendmail);
}

#[test]
fn explicit_policy_restricts_the_family() {
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/bin/mail");
    fs.add_executable("/usr/sbin/sendmail");

    let mail = select(TransportPolicy::Mail, &fs).unwrap();
    assert_eq!(mail.kind, TransportKind::Mail);

    let sendmail = select(TransportPolicy::Sendmail, &fs).unwrap();
    assert_eq!(sendmail.kind, TransportKind::Sendmail);
}

#[test]
fn explicit_policy_does_not_fall_back_to_the_other_family() {
    let fs = MockFileSystem::new();
    fs.add_executable("/usr/bin/mail");

    assert!(matches!(
        select(TransportPolicy::Sendmail, &fs),
        Err(CroncapeError::NoTransport(TransportPolicy::Sendmail))
    ));
}

#[test]
fn bare_names_are_resolved_on_the_search_path() {
    let fs = MockFileSystem::new();
    fs.set_search_path(["/opt/mta/bin", "/usr/bin"]);
    fs.add_executable("/opt/mta/bin/sendmail");

    let transport = select(TransportPolicy::Sendmail, &fs).unwrap();
    assert_eq!(transport.path, PathBuf::from("/opt/mta/bin/sendmail"));

    // Not on the search path and not at the well-known location.
    let fs = MockFileSystem::new();
    fs.set_search_path(["/usr/bin"]);
    fs.add_executable("/opt/mta/bin/sendmail");
    assert_eq!(fs.resolve_program("sendmail"), None);
}

#[test]
fn candidate_order_is_fixed() {
    let names: Vec<&str> = candidates(TransportPolicy::Auto)
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(
        names,
        vec!["sendmail", "/usr/sbin/sendmail", "mail", "/usr/bin/mail"]
    );
}

#[cfg(unix)]
#[test]
fn real_filesystem_checks_absolute_paths_for_executability() {
    use croncape::fs::RealFileSystem;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("not-executable");
    std::fs::write(&plain, "#!/bin/sh\n").unwrap();
    let mut perms = std::fs::metadata(&plain).unwrap().permissions();
    perms.set_mode(0o644);
    std::fs::set_permissions(&plain, perms).unwrap();

    let fs = RealFileSystem;
    assert_eq!(fs.resolve_program(plain.to_str().unwrap()), None);
    assert_eq!(
        fs.resolve_program(dir.path().join("missing").to_str().unwrap()),
        None
    );
}
