#![cfg(feature = "serde")]

use ndsfnt::formats::fnt::{Fnt, Folder};

#[test]
fn key_order_and_omitted_lists() {
    let mut sub = Folder::new(1);
    sub.files.push("b.bin".into());
    let mut root = Folder::new(0);
    root.files.push("a.bin".into());
    root.folders.insert("sub".into(), sub);

    let json = serde_json::to_string(&Fnt { root }).unwrap();
    assert_eq!(
        json,
        r#"{"first_id":0,"files":["a.bin"],"folders":{"sub":{"first_id":1,"files":["b.bin"]}}}"#
    );
}

#[test]
fn empty_root_has_only_first_id() {
    let json = serde_json::to_string(&Fnt { root: Folder::new(3) }).unwrap();
    assert_eq!(json, r#"{"first_id":3}"#);
}

#[test]
fn folder_order_follows_document() {
    let fnt: Fnt = serde_json::from_str(
        r#"{"first_id": 0, "folders": {"b": {"first_id": 0}, "a": {"first_id": 2, "files": ["x"]}}}"#,
    )
    .unwrap();
    let keys: Vec<_> = fnt.root.folders.keys().cloned().collect();
    assert_eq!(keys, ["b", "a"]);

    let back = Fnt::from_bytes(&fnt.to_bytes().unwrap()).unwrap();
    assert_eq!(back, fnt);
    assert_eq!(back.get_file_id("a/x"), Some(2));
}

#[test]
fn first_id_is_required() {
    assert!(serde_json::from_str::<Fnt>(r#"{"files": ["a"]}"#).is_err());
    assert!(serde_json::from_str::<Fnt>(r#"{"first_id": 70000}"#).is_err());
}
