use std::time::{SystemTime, UNIX_EPOCH};

use storefront_core::Error;
use storefront_store::{StoreOptions, connect};

fn missing_db_path() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "storefront-missing-{}-{nanos}.db",
        std::process::id()
    ));
    path.display().to_string()
}

#[tokio::test]
async fn missing_directory_is_a_connection_failure() {
    let err = connect("sqlite:///nonexistent_dir/a.db", &StoreOptions::default())
        .await
        .expect_err("parent directory does not exist");
    assert!(matches!(err, Error::ConnectionFailure(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn missing_file_without_create_is_a_connection_failure() {
    let path = missing_db_path();
    let opts = StoreOptions {
        create_if_missing: false,
        ..StoreOptions::default()
    };
    let err = connect(&format!("sqlite://{path}"), &opts)
        .await
        .expect_err("file must not be created");
    assert!(matches!(err, Error::ConnectionFailure(_)), "unexpected error: {err}");
    assert!(!std::path::Path::new(&path).exists());
}

#[tokio::test]
async fn other_engines_are_rejected_with_redacted_url() {
    let err = connect("postgres://u:p@h/db", &StoreOptions::default())
        .await
        .expect_err("only sqlite is supported");
    let Error::ConnectionFailure(message) = &err else {
        panic!("expected a connection failure, got {err}");
    };
    assert!(message.contains("postgres://u:***@h/db"), "{message}");
    assert!(!message.contains(":p@"), "{message}");
}
