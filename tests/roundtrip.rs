use ndsfnt::formats::fnt::{Fnt, Folder};
use proptest::prelude::*;

fn name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.\u{e0}-\u{ff}]{1,24}"
}

fn folder() -> impl Strategy<Value = Folder> {
    let leaf = (any::<u16>(), prop::collection::vec(name(), 0..6)).prop_map(|(first_file_id, files)| {
        Folder {
            first_file_id,
            files,
            ..Folder::default()
        }
    });
    leaf.prop_recursive(5, 96, 5, |inner| {
        (
            any::<u16>(),
            prop::collection::vec(name(), 0..5),
            prop::collection::vec((name(), inner), 0..5),
        )
            .prop_map(|(first_file_id, files, subfolders)| Folder {
                first_file_id,
                files,
                folders: subfolders.into_iter().collect(),
            })
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(root in folder()) {
        let fnt = Fnt { root };
        let bytes = fnt.to_bytes().unwrap();
        let back = Fnt::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&back, &fnt);
        prop_assert_eq!(back.folder_count(), fnt.folder_count());
    }

    #[test]
    fn encoding_is_canonical(root in folder()) {
        let bytes = Fnt { root }.to_bytes().unwrap();
        prop_assert_eq!(Fnt::from_bytes(&bytes).unwrap().to_bytes().unwrap(), bytes);
    }
}

#[test]
fn order_is_preserved() {
    let mut root = Folder::new(0);
    for name in ["zeta", "alpha", "mid"] {
        root.files.push(format!("{name}.bin"));
        root.folders.insert(name.to_owned(), Folder::new(0));
    }
    let fnt = Fnt { root };
    let back = Fnt::from_bytes(&fnt.to_bytes().unwrap()).unwrap();

    assert_eq!(back.root.files, ["zeta.bin", "alpha.bin", "mid.bin"]);
    let keys: Vec<_> = back.root.folders.keys().map(String::as_str).collect();
    assert_eq!(keys, ["zeta", "alpha", "mid"]);
}

#[test]
fn deep_nesting() {
    let mut folder = Folder::new(7);
    folder.files.push("leaf".into());
    for depth in 0..200 {
        let mut parent = Folder::new(0);
        parent.folders.insert(format!("d{depth}"), folder);
        folder = parent;
    }
    let fnt = Fnt { root: folder };
    let back = Fnt::from_bytes(&fnt.to_bytes().unwrap()).unwrap();
    assert_eq!(back.folder_count(), 201);
    assert!(back.files().any(|f| f.path.ends_with("/d0/leaf") && f.id == 7));
}
