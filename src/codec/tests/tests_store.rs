#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::super::*;
use crate::model::{ClassDescriptor, LibraryOrigin, Location, MethodDescriptor, Visibility};

fn methods() -> Vec<MethodDescriptor> {
    vec![
        MethodDescriptor::new(
            ClassDescriptor::new("ActiveSupport::Inflector", Some(LibraryOrigin::new("activesupport", "5.1.4"))),
            "pluralize",
            Visibility::Public,
            Some(Location::new("/gems/activesupport/inflector.rb", 12)),
        ),
        MethodDescriptor::new(ClassDescriptor::local("User"), "secret", Visibility::Private, None),
    ]
}

#[test]
fn test_store_header() {
    let store = ContractStore::with_methods(WireLayout::Tagged, methods());
    let bytes = store.to_bytes().unwrap();
    assert_eq!(&bytes[..4], b"TTCS");
    assert_eq!(bytes[4], 2);
    assert_eq!(&bytes[5..9], &[0, 0, 0, 2]);

    let legacy = ContractStore::with_methods(WireLayout::Legacy, methods());
    assert_eq!(legacy.to_bytes().unwrap()[4], 1);
}

#[test]
fn test_store_round_trip_keeps_layout() {
    for layout in [WireLayout::Legacy, WireLayout::Tagged] {
        let store = ContractStore::with_methods(layout, methods());
        let decoded = ContractStore::from_bytes(&store.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.layout(), layout);
        assert_eq!(decoded, store);
    }
}

#[test]
fn test_empty_store() {
    let store = ContractStore::new(WireLayout::Tagged);
    let decoded = ContractStore::from_bytes(&store.to_bytes().unwrap()).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_store_rejects_bad_magic_and_version() {
    let mut bytes = ContractStore::with_methods(WireLayout::Tagged, methods())
        .to_bytes()
        .unwrap();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'X';
    assert!(matches!(ContractStore::from_bytes(&bad_magic), Err(DecodeError::BadMagic)));

    bytes[4] = 9;
    assert!(matches!(
        ContractStore::from_bytes(&bytes),
        Err(DecodeError::UnsupportedVersion(9))
    ));
}

#[test]
fn test_store_rejects_truncation_and_overcount() {
    let bytes = ContractStore::with_methods(WireLayout::Tagged, methods())
        .to_bytes()
        .unwrap();

    assert!(ContractStore::from_bytes(&bytes[..bytes.len() - 1]).is_err());

    let mut overcount = bytes.clone();
    overcount[8] = 3;
    assert!(matches!(
        ContractStore::from_bytes(&overcount),
        Err(DecodeError::UnexpectedEof { .. })
    ));

    let mut undercount = bytes;
    undercount[8] = 1;
    assert!(matches!(
        ContractStore::from_bytes(&undercount),
        Err(DecodeError::TrailingBytes(_))
    ));
}

#[test]
fn test_store_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contracts.db");

    let store = ContractStore::with_methods(WireLayout::Legacy, methods());
    store.save(&path).unwrap();

    let loaded = ContractStore::load(&path).unwrap();
    assert_eq!(loaded, store);
}

#[test]
fn test_store_write_to_and_read_from() {
    let store = ContractStore::with_methods(WireLayout::Tagged, methods());
    let mut buffer = Vec::new();
    store.write_to(&mut buffer).unwrap();

    let loaded = ContractStore::read_from(buffer.as_slice()).unwrap();
    assert_eq!(loaded.into_methods(), methods());
}
