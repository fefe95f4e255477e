//! End-to-end runs of the migration against a mock Clerk API

use crate::mock_server::MockServerFixture;
use async_trait::async_trait;
use homeowner_migration::transport::{SubmissionOutcome, UserSink};
use homeowner_migration::{
    Error, Migration, MigrationOptions, RunOutcome, Shutdown, UserPayload,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct CountingSink {
    calls: AtomicUsize,
}

#[async_trait]
impl UserSink for CountingSink {
    async fn create_user(&self, _payload: &UserPayload) -> SubmissionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SubmissionOutcome::Created(serde_json::json!({ "id": "user_x" }))
    }
}

#[tokio::test]
async fn test_full_run_creates_valid_users_only() {
    let mut fixture = MockServerFixture::new().await;
    fixture.write_export(&[
        r#"Acme Rentals LLC,15%,"a@x.com, b@x.com",https://drive/1,12 Main St"#,
        r#",,ghost@x.com,,3 Oak Ave"#,
        r#"Ann Lee,20%,,https://drive/2,4 Elm St"#,
        r#"Bo Chen,18%,bo@x.com,https://drive/3,"5 Pine Rd, 6 Pine Rd""#,
    ]);
    let acme = fixture.mock_user_created("Acme Rentals", "user_acme").await;
    let bo = fixture.mock_user_rejected("Bo", 422).await;

    let config = fixture.config();
    let lock_file = config.lock_file.clone();
    Migration::new(config)
        .unwrap()
        .run(&MigrationOptions::default())
        .await
        .expect("per-user failures must not fail the run");

    acme.assert_async().await;
    bo.assert_async().await;
    assert!(!lock_file.exists(), "lock file must be released");
}

#[tokio::test]
async fn test_existing_lock_prevents_any_request() {
    let fixture = MockServerFixture::new().await;
    fixture.write_export(&[r#"Ann Lee,20%,ann@x.com,https://drive/2,4 Elm St"#]);
    let config = fixture.config();
    std::fs::write(&config.lock_file, "31337").unwrap();

    let sink = Arc::new(CountingSink::default());
    let err = Migration::with_sink(config.clone(), sink.clone())
        .run(&MigrationOptions::default())
        .await
        .unwrap_err();

    match err {
        Error::Startup { message, context } => {
            assert!(message.contains("migrations.lock"), "{message}");
            assert!(context.details.unwrap_or_default().contains("31337"));
        }
        other => panic!("expected startup error, got {other}"),
    }
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    assert_eq!(std::fs::read_to_string(&config.lock_file).unwrap(), "31337");
}

#[tokio::test]
async fn test_missing_export_fails_before_any_request() {
    let fixture = MockServerFixture::new().await;
    let config = fixture.config();
    let sink = Arc::new(CountingSink::default());

    let err = Migration::with_sink(config.clone(), sink.clone())
        .run(&MigrationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Input { .. }), "{err}");
    assert!(err.to_string().contains("All Homeowners"));
    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    assert!(!config.lock_file.exists());
}

#[tokio::test]
async fn test_skip_users_sends_nothing() {
    let fixture = MockServerFixture::new().await;
    let sink = Arc::new(CountingSink::default());

    Migration::with_sink(fixture.config(), sink.clone())
        .run(&MigrationOptions { skip_users: true })
        .await
        .unwrap();

    assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_interrupt_mid_batch_releases_lock() {
    let fixture = MockServerFixture::new().await;
    let rows: Vec<String> = (0..60)
        .map(|i| format!("Owner {i},10%,owner{i}@x.com,https://drive/{i},{i} Main St"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    fixture.write_export(&rows);
    let config = fixture.config();
    let sink = Arc::new(CountingSink::default());

    // 60 users over a 20-per-10s quota: one request every 500ms.
    let shutdown = async {
        tokio::time::sleep(Duration::from_millis(1200)).await;
        Shutdown::Terminate
    };
    let outcome = Migration::with_sink(config.clone(), sink.clone())
        .run_until(&MigrationOptions::default(), shutdown)
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Interrupted(Shutdown::Terminate));
    assert_eq!(sink.calls.load(Ordering::SeqCst), 3);
    assert!(!config.lock_file.exists(), "lock file must be released");
}

#[tokio::test(start_paused = true)]
async fn test_timeout_drop_releases_lock() {
    let fixture = MockServerFixture::new().await;
    let rows: Vec<String> = (0..30)
        .map(|i| format!("Owner {i},10%,owner{i}@x.com,https://drive/{i},{i} Main St"))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    fixture.write_export(&rows);
    let config = fixture.config();
    let sink = Arc::new(CountingSink::default());
    let migration = Migration::with_sink(config.clone(), sink.clone());

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        migration.run(&MigrationOptions::default()),
    )
    .await;

    assert!(result.is_err(), "run should still be pacing requests");
    let calls = sink.calls.load(Ordering::SeqCst);
    assert!(calls >= 1 && calls < 30, "{calls}");
    assert!(!config.lock_file.exists(), "lock file must be released");
}

#[tokio::test]
async fn test_run_until_reports_completion() {
    let fixture = MockServerFixture::new().await;
    fixture.write_export(&[r#"Ann Lee,20%,ann@x.com,https://drive/2,4 Elm St"#]);
    let config = fixture.config();
    let sink = Arc::new(CountingSink::default());

    let outcome = Migration::with_sink(config.clone(), sink.clone())
        .run_until(&MigrationOptions::default(), std::future::pending())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    assert!(!config.lock_file.exists());
}
