use cdesk_database::*;

async fn memory_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://")
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = memory_db().await;

    let session = db.session();
    session.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));

    let err = Database::builder().url("mem://").init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn sessions_are_numbered_per_database() {
    let db = memory_db().await;

    let first = db.session();
    let second = db.session();
    assert!(second.id() > first.id());
    drop(first);

    let third = db.clone().session();
    assert!(third.id() > second.id());
}

#[tokio::test]
async fn active_sessions_track_live_handles() {
    let db = memory_db().await;
    assert_eq!(db.active_sessions(), 0);

    let first = db.session();
    let second = db.clone().session();
    assert_eq!(db.active_sessions(), 2);

    drop(first);
    assert_eq!(db.active_sessions(), 1);

    {
        let _scoped = db.session();
        assert_eq!(db.active_sessions(), 2);
    }
    drop(second);
    assert_eq!(db.active_sessions(), 0);
}

#[tokio::test]
async fn migrations_are_applied_once() {
    let db = memory_db().await;

    let report = db.migrate().await.expect("second migration run");
    assert!(report.applied.is_empty(), "nothing should be re-applied");
    assert!(report.skipped.iter().any(|m| m.version == "0001_contacts"));
}

#[tokio::test]
async fn contact_schema_rejects_empty_fields() {
    let db = memory_db().await;
    let session = db.session();

    let result = session
        .query("CREATE contact:1 CONTENT { name: '', email: 'a@x.com', message: 'hi' }")
        .await
        .expect("query is sent")
        .check();
    assert!(result.is_err(), "empty name must violate the schema");
}
