use chrono::NaiveDate;
use todo_core::{decode_collection, encode_collection, Priority, TodoRecord};

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let due = NaiveDate::from_ymd_opt(2026, 10, 19);
    let mut record = TodoRecord::new("Walk the dog", Priority::High, due).unwrap();
    record.toggle();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["text"], "Walk the dog");
    assert_eq!(json["priority"], "high");
    assert_eq!(json["dueDate"], "2026-10-19");
    assert_eq!(json["completed"], true);

    let decoded: TodoRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn strict_deserialize_rejects_blank_text() {
    let value = serde_json::json!({
        "text": "   ",
        "priority": "low",
        "dueDate": null,
        "completed": false
    });

    let err = serde_json::from_value::<TodoRecord>(value).unwrap_err();
    assert!(
        err.to_string().contains("todo text cannot be empty"),
        "unexpected error: {err}"
    );
}

#[test]
fn decode_reproduces_encoded_collection_field_for_field() {
    let mut done = TodoRecord::new("Pay rent", Priority::High, NaiveDate::from_ymd_opt(2026, 11, 1))
        .unwrap();
    done.toggle();
    let records = vec![
        TodoRecord::new("Buy milk", Priority::Low, None).unwrap(),
        done,
        TodoRecord::new("Buy milk", Priority::Low, None).unwrap(),
    ];

    let decoded = decode_collection(&encode_collection(&records).unwrap()).unwrap();
    assert_eq!(decoded.skipped, 0);
    assert_eq!(decoded.records, records);
}

#[test]
fn decode_accepts_payload_written_by_older_widget() {
    let decoded =
        decode_collection(r#"[{"text":"Buy milk","completed":false},{"text":"Call mom","completed":true}]"#)
            .unwrap();

    assert_eq!(decoded.records.len(), 2);
    assert!(decoded
        .records
        .iter()
        .all(|record| record.priority() == Priority::Low && record.due_date().is_none()));
    assert!(decoded.records[1].is_completed());
}
