use super::*;

fn sample() -> Preferences {
    Preferences {
        url: "https://draft.test".to_owned(),
        iframe_url: "https://loaded.test".to_owned(),
        iframe_message: "{action: 'open_project'}".to_owned(),
    }
}

#[test]
fn envelope_uses_camel_case_state_and_version() {
    let raw = encode_record(&sample());
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 0);
    assert_eq!(value["state"]["url"], "https://draft.test");
    assert_eq!(value["state"]["iframeUrl"], "https://loaded.test");
    assert_eq!(value["state"]["iframeMessage"], "{action: 'open_project'}");
}

#[test]
fn decode_reads_back_encoded_record() {
    assert_eq!(decode_record(&encode_record(&sample())), Some(sample()));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let prefs = decode_record(r#"{"state":{"iframeUrl":"https://x.test"},"version":0}"#).unwrap();
    assert_eq!(prefs.iframe_url, "https://x.test");
    assert!(prefs.url.is_empty());
    assert!(prefs.iframe_message.is_empty());
}

#[test]
fn corrupt_records_are_rejected() {
    assert_eq!(decode_record("not json"), None);
    assert_eq!(decode_record(r#"{"version":0}"#), None);
    assert_eq!(decode_record(r#"{"state":"oops","version":0}"#), None);
}

#[test]
fn foreign_version_is_rejected() {
    assert_eq!(decode_record(r#"{"state":{"url":"a"},"version":7}"#), None);
}

#[test]
fn off_browser_store_is_empty() {
    let store = LocalStorageStore;
    store.save(&sample());
    assert_eq!(store.load(), None);
}
