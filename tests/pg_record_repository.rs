//! Postgres repository tests. Run with a reachable `DATABASE_URL` and
//! `cargo test -- --ignored`.

use lora_ingest_service::{
    db::{PgRecordRepository, RecordRepository},
    records::{translator::PayloadTranslator, SensorRecord, SensorType},
};
use sqlx::PgPool;

fn record(sensor_type: SensorType, value: f64) -> SensorRecord {
    SensorRecord {
        device_id: "0018B2000000ABCD".to_owned(),
        owner: "acme".to_owned(),
        stream_id: "1".to_owned(),
        stream_unit: "lux".to_owned(),
        stream_value_time: 1_690_000_000_000,
        sensor_value: value,
        sensor_type,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_returns_inserted_record(pool: PgPool) {
    let repo = PgRecordRepository::new(pool.clone());
    let r = record(SensorType::Light, 42.5);

    let saved = repo.save(r.clone()).await.unwrap();
    assert_eq!(saved, r);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM sensor_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn sensor_type_is_stored_as_enum(pool: PgPool) {
    let repo = PgRecordRepository::new(pool.clone());
    repo.save(record(SensorType::Humidity, 61.0)).await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT sensor_type::text FROM sensor_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "humidity");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn converted_gateway_payload_is_persisted(pool: PgPool) {
    let repo = PgRecordRepository::new(pool.clone());
    let raw = r#"{
        "deviceId": "0018B2000000ABCD",
        "streamValueTime": 1690000000000,
        "streamDescription": "Outdoor temperature",
        "temperatureValue": "18.75"
    }"#;

    let r = PayloadTranslator::new().parse_reading(raw).unwrap();
    let saved = repo.save(r).await.unwrap();
    assert_eq!(saved.sensor_type, SensorType::Temperature);
    assert_eq!(saved.sensor_value, 18.75);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn save_fails_once_pool_is_closed(pool: PgPool) {
    let repo = PgRecordRepository::new(pool.clone());
    pool.close().await;

    assert!(repo.save(record(SensorType::Battery, 3.6)).await.is_err());
}
