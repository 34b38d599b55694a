use std::time::{Duration, SystemTime};

use berthplan_sync::{
    archive::{Archive, ArchiveKind},
    settings::ArchiveSettings,
};
use chrono::{Local, TimeZone};

use crate::helper::archived_in;

static DAY: Duration = Duration::from_secs(24 * 60 * 60);

fn archive(directory: &std::path::Path) -> Archive {
    Archive::new(&ArchiveSettings {
        directory: directory.to_string_lossy().into_owned(),
        retention: DAY * 30,
    })
}

#[tokio::test]
async fn test_store_names_file_after_kind_and_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive(&dir.path().join("SOAP_Archive"));
    let at = Local.with_ymd_and_hms(2025, 6, 1, 10, 15, 7).unwrap();

    let bp = archive
        .store(ArchiveKind::BerthPlan, "<bp/>", at)
        .await
        .unwrap();
    let etc = archive.store(ArchiveKind::Etc, "<etc/>", at).await.unwrap();

    assert_eq!(
        archived_in(archive.directory()),
        vec!["APMT_BP_20250601_101507.xml", "APMT_ETC_20250601_101507.xml"]
    );
    assert_eq!(std::fs::read_to_string(bp).unwrap(), "<bp/>");
    assert_eq!(std::fs::read_to_string(etc).unwrap(), "<etc/>");
}

#[tokio::test]
async fn test_prune_removes_only_expired_xml_files() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive(dir.path());
    for name in ["APMT_BP_20250101_000000.xml", "legacy.XML", "notes.txt"] {
        std::fs::write(dir.path().join(name), "x").unwrap();
    }
    std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

    let removed = archive.prune(SystemTime::now()).await.unwrap();
    assert_eq!(removed, 0);
    assert_eq!(archived_in(dir.path()).len(), 4);

    let removed = archive.prune(SystemTime::now() + DAY * 31).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(archived_in(dir.path()), vec!["nested.xml", "notes.txt"]);
}

#[tokio::test]
async fn test_prune_of_missing_directory_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let archive = archive(&dir.path().join("missing"));

    assert_eq!(archive.prune(SystemTime::now()).await.unwrap(), 0);
}
