use planwright_core::{init_tracing, LogFile, PlanConfig, PlanError};
use std::fs;
use std::io::Write;
use tracing_subscriber::fmt::MakeWriter;

fn write_line(log: &LogFile, line: &str) {
    let mut writer = log.make_writer();
    writeln!(writer, "{line}").unwrap();
    writer.flush().unwrap();
}

fn scoped_subscriber(log: &LogFile) -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

// ── Open / close ─────────────────────────────────────────────────

#[test]
fn new_log_file_is_closed() {
    let log = LogFile::new();
    assert!(!log.is_open());
    assert!(log.path().is_none());
}

#[test]
fn open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("plan.log");
    let log = LogFile::new();

    log.open(&path).unwrap();
    write_line(&log, "first");

    assert!(log.is_open());
    assert_eq!(log.path().as_deref(), Some(path.as_path()));
    assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
}

#[test]
fn open_appends_to_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.log");
    fs::write(&path, "earlier\n").unwrap();

    let log = LogFile::new();
    log.open(&path).unwrap();
    write_line(&log, "later");

    assert_eq!(fs::read_to_string(&path).unwrap(), "earlier\nlater\n");
}

#[test]
fn close_discards_further_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.log");
    let log = LogFile::new();
    log.open(&path).unwrap();
    write_line(&log, "kept");

    log.close().unwrap();
    write_line(&log, "dropped");

    assert!(!log.is_open());
    assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
}

#[test]
fn close_without_file_is_ok() {
    LogFile::new().close().unwrap();
}

#[test]
fn open_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "").unwrap();

    let log = LogFile::new();
    assert!(log.open(blocker.join("plan.log")).is_err());
    assert!(!log.is_open());
}

// ── Redirect ─────────────────────────────────────────────────────

#[test]
fn redirect_switches_files() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");
    let log = LogFile::new();

    log.redirect(first.to_str().unwrap()).unwrap();
    write_line(&log, "one");
    log.redirect(second.to_str().unwrap()).unwrap();
    write_line(&log, "two");

    assert_eq!(fs::read_to_string(&first).unwrap(), "one\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "two\n");
    assert_eq!(log.path().as_deref(), Some(second.as_path()));
}

#[test]
fn redirect_to_empty_closes() {
    let dir = tempfile::tempdir().unwrap();
    let log = LogFile::new();
    log.open(dir.path().join("plan.log")).unwrap();

    log.redirect("").unwrap();
    assert!(!log.is_open());
    assert!(log.path().is_none());
}

#[test]
fn clones_share_the_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.log");
    let log = LogFile::new();
    let subscriber_side = log.clone();

    log.open(&path).unwrap();
    write_line(&subscriber_side, "shared");
    log.close().unwrap();

    assert!(!subscriber_side.is_open());
    assert_eq!(fs::read_to_string(&path).unwrap(), "shared\n");
}

// ── Tracing integration ──────────────────────────────────────────

#[test]
fn tracing_events_reach_the_file_until_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.log");
    let log = LogFile::new();
    log.open(&path).unwrap();
    let _guard = scoped_subscriber(&log);

    tracing::info!("solver started");
    log.close().unwrap();
    tracing::info!("after close");

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("solver started"));
    assert!(!contents.contains("after close"));
}

#[test]
fn init_tracing_rejects_bad_configured_filter() {
    let config = PlanConfig {
        log_filter: "planwright=loud".to_string(),
        ..PlanConfig::default()
    };
    let err = init_tracing(&LogFile::new(), &config).unwrap_err();
    assert!(matches!(err, PlanError::Logging(_)));
    assert_eq!(err.status_code(), 6);
}
