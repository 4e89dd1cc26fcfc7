//! Data-access contract checks through the public API.

use kih_core::entities::{CourseInstitution, KosHomestay};
use kih_core::enums::KosType;
use kih_db::{Direction, DocumentStore, KihDb, PortalService, Query};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn fetch_by_id_for_missing_record_is_absent() {
    let svc = PortalService::new_local(":memory:").await.unwrap();
    assert!(svc.get_kos("no-such-id").await.unwrap().is_none());
    assert!(svc.get_course("no-such-id").await.unwrap().is_none());
    assert!(svc.get_post("no-such-id").await.unwrap().is_none());
}

#[tokio::test]
async fn records_written_raw_are_readable_typed() {
    let db = KihDb::open_local(":memory:").await.unwrap();
    let id = db
        .add(
            "kosHomestay",
            object(json!({
                "name": "Kos Melati",
                "pricePerMonth": 400000,
                "type": "kos"
            })),
        )
        .await
        .unwrap();

    let svc = PortalService::new(db);
    let kos: KosHomestay = svc.get_kos(&id).await.unwrap().unwrap();
    assert_eq!(kos.name, "Kos Melati");
    assert_eq!(kos.kind, KosType::Kos);
    assert!(kos.facilities.is_empty());
    assert!(kos.created_at.is_some());
}

#[tokio::test]
async fn malformed_record_surfaces_as_error_not_panic() {
    let db = KihDb::open_local(":memory:").await.unwrap();
    db.add("kosHomestay", object(json!({"name": "Broken", "type": "castle"})))
        .await
        .unwrap();
    let svc = PortalService::new(db);
    assert!(svc.list_kos().await.is_err());
}

#[tokio::test]
async fn query_by_array_membership_and_order() {
    let svc = PortalService::new_local(":memory:").await.unwrap();
    for (name, rating) in [("Elfast", 4.2), ("Mahesa", 4.8), ("Kresna", 3.9)] {
        let course = CourseInstitution {
            name: name.into(),
            programs: vec!["Speaking".into()],
            average_rating: rating,
            ..CourseInstitution::default()
        };
        svc.create_course(&course).await.unwrap();
    }

    let docs = svc
        .store()
        .get_by_query(
            "courseInstitutions",
            &Query::new()
                .array_contains("programs", "Speaking")
                .order_by("averageRating", Direction::Desc)
                .limit(2),
        )
        .await
        .unwrap();
    let names: Vec<&str> = docs
        .iter()
        .filter_map(|d| d.data.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(names, vec!["Mahesa", "Elfast"]);
}
