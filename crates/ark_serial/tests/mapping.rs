use std::collections::{BTreeMap, HashMap};

use ark_reflect::derive::Record;
use ark_serial::{MappingError, ProfileSerializer, TypeProfile};

// -----------------------------------------------------------------------------
// Nested records

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Inner {
    property_b: i32,
    field_b: i32,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Middle {
    property_a: i32,
    field_a: i32,
    embedded_b: Option<Inner>,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Outer {
    property: i32,
    field: i32,
    embedded_a: Option<Middle>,
}

impl Outer {
    fn sample() -> Self {
        Self {
            property: 2018,
            field: 0,
            embedded_a: Some(Middle {
                property_a: 100,
                field_a: 0,
                embedded_b: Some(Inner {
                    property_b: 200,
                    field_b: 0,
                }),
            }),
        }
    }
}

fn nested_serializer() -> ProfileSerializer {
    let mut profile = TypeProfile::of::<Outer>();
    profile.map::<i32>("property").unwrap();
    profile
        .map::<i32>("embedded_a.embedded_b.property_b")
        .unwrap()
        .as_type::<i16>()
        .unwrap();

    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();
    serializer
}

#[test]
fn nested_members_round_trip() {
    let serializer = nested_serializer();
    let bytes = serializer.to_bytes(&mut Outer::sample()).unwrap();
    assert_eq!(bytes, [0xE2, 0x07, 0x00, 0x00, 0xC8, 0x00]);

    // Only mapped members travel, intermediates come from their constructors.
    let decoded: Outer = serializer.from_bytes(&bytes).unwrap();
    let inner = decoded.embedded_a.as_ref().unwrap().embedded_b.as_ref().unwrap();
    assert_eq!(inner.property_b, 200);
    assert_eq!(decoded.property, 2018);
    assert_eq!(decoded.embedded_a.as_ref().unwrap().property_a, 0);
}

#[test]
fn deserializing_into_an_empty_record_creates_intermediates() {
    let serializer = nested_serializer();
    let bytes = serializer.to_bytes(&mut Outer::sample()).unwrap();

    let mut target = Outer::default();
    assert!(target.embedded_a.is_none());
    serializer
        .deserialize_into(&mut bytes.as_slice(), &mut target)
        .unwrap();
    assert_eq!(
        target.embedded_a.unwrap().embedded_b,
        Some(Inner {
            property_b: 200,
            field_b: 0,
        }),
    );
}

#[test]
fn serializing_creates_intermediates() {
    let serializer = nested_serializer();
    let mut record = Outer {
        property: 1,
        ..Outer::default()
    };
    let bytes = serializer.to_bytes(&mut record).unwrap();
    assert_eq!(bytes, [1, 0, 0, 0, 0, 0]);
    assert_eq!(
        record.embedded_a,
        Some(Middle {
            embedded_b: Some(Inner::default()),
            ..Middle::default()
        }),
    );
}

#[test]
fn existing_intermediates_are_reused() {
    let serializer = nested_serializer();
    let mut target = Outer::sample();
    target.embedded_a.as_mut().unwrap().field_a = 5;

    serializer
        .deserialize_into(&mut [0, 0, 0, 0, 7, 0].as_slice(), &mut target)
        .unwrap();
    let middle = target.embedded_a.unwrap();
    assert_eq!(middle.field_a, 5);
    assert_eq!(middle.property_a, 100);
    assert_eq!(middle.embedded_b.unwrap().property_b, 7);
}

// -----------------------------------------------------------------------------
// Forced width

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Wide {
    value: i32,
    ratio: f64,
}

fn wide_serializer() -> ProfileSerializer {
    let mut profile = TypeProfile::of::<Wide>();
    profile.map::<i32>("value").unwrap().as_type::<i16>().unwrap();
    profile.map::<f64>("ratio").unwrap().as_type::<u8>().unwrap();

    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();
    serializer
}

#[test]
fn forced_width_uses_narrow_converter() {
    let serializer = wide_serializer();
    let mut record = Wide {
        value: -300,
        ratio: 12.0,
    };
    let bytes = serializer.to_bytes(&mut record).unwrap();
    assert_eq!(bytes, [0xD4, 0xFE, 12]);
    assert_eq!(serializer.from_bytes::<Wide>(&bytes).unwrap(), record);
}

#[test]
fn forced_width_truncates_out_of_range_values() {
    let serializer = wide_serializer();
    let mut record = Wide {
        value: 70_000,
        ratio: 300.0,
    };
    let bytes = serializer.to_bytes(&mut record).unwrap();
    // 70_000 as i16 wraps, 300.0 as u8 saturates.
    assert_eq!(bytes, [0x70, 0x11, 0xFF]);

    let decoded: Wide = serializer.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.value, 70_000_i32 as i16 as i32);
    assert_eq!(decoded.ratio, 255.0);
}

// -----------------------------------------------------------------------------
// Indexers

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Scores {
    values: HashMap<String, i32>,
    ranks: BTreeMap<u8, u16>,
    history: Vec<u32>,
}

fn scores_serializer() -> ProfileSerializer {
    let mut profile = TypeProfile::of::<Scores>();
    profile
        .map::<HashMap<String, i32>>("values")
        .unwrap()
        .with_indexer_key("x")
        .unwrap();
    profile
        .map::<BTreeMap<u8, u16>>("ranks")
        .unwrap()
        .with_indexer_key(3_u8)
        .unwrap();
    profile
        .map::<Vec<u32>>("history")
        .unwrap()
        .with_indexer_key(0_usize)
        .unwrap()
        .as_type::<u16>()
        .unwrap();

    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();
    serializer
}

#[test]
fn indexer_key_selects_one_entry() {
    let serializer = scores_serializer();
    let mut record = Scores {
        values: HashMap::from([("x".to_owned(), 5), ("y".to_owned(), 9)]),
        ranks: BTreeMap::from([(1, 10), (3, 30)]),
        history: vec![4, 8],
    };
    let bytes = serializer.to_bytes(&mut record).unwrap();
    assert_eq!(bytes, [5, 0, 0, 0, 30, 0, 4, 0]);

    let decoded: Scores = serializer.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.values, HashMap::from([("x".to_owned(), 5)]));
    assert_eq!(decoded.ranks, BTreeMap::from([(3, 30)]));
    assert_eq!(decoded.history, [4]);
}

#[test]
fn absent_indexer_key_fails_without_writing() {
    let serializer = scores_serializer();
    let mut record = Scores {
        values: HashMap::from([("y".to_owned(), 9)]),
        ranks: BTreeMap::from([(3, 30)]),
        history: vec![1],
    };
    let mut out: Vec<u8> = Vec::new();
    let err = serializer.serialize(&mut out, &mut record).unwrap_err();
    assert!(matches!(err, MappingError::IndexerKeyAbsent { .. }));
    assert!(out.is_empty());
}

#[test]
fn indexer_key_must_match_the_container() {
    let mut profile = TypeProfile::of::<Scores>();
    let err = profile
        .map::<BTreeMap<u8, u16>>("ranks")
        .unwrap()
        .with_indexer_key("x")
        .unwrap_err();
    assert!(matches!(err, MappingError::NoIndexer { .. }));
    assert!(err.is_configuration());
    assert!(profile.is_empty());

    let mut profile = TypeProfile::of::<Wide>();
    let err = profile
        .map::<i32>("value")
        .and_then(|member| member.with_indexer_key(0_usize))
        .unwrap_err();
    assert!(matches!(err, MappingError::NoIndexer { ty: "i32", .. }));
    assert_eq!(profile.len(), 0);

    // The rejected member is not serialized.
    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();
    let mut record = Wide {
        value: 7,
        ratio: 0.0,
    };
    assert!(serializer.to_bytes(&mut record).unwrap().is_empty());
}

// -----------------------------------------------------------------------------
// Transforms

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Named {
    name: String,
    tags: Vec<String>,
}

#[test]
fn map_by_adapts_values() {
    let mut profile = TypeProfile::of::<Named>();
    profile
        .map::<String>("name")
        .unwrap()
        .map_by(
            |name: &String| u8::try_from(name.len()).unwrap_or(u8::MAX),
            |name: &mut String, len: u8| *name = "?".repeat(usize::from(len)),
        )
        .unwrap();
    profile
        .map::<Vec<String>>("tags")
        .unwrap()
        .map_by(
            |tags: &Vec<String>| tags.len() as u32,
            |_: &mut Vec<String>, _: u32| {},
        )
        .unwrap();

    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();

    let mut record = Named {
        name: "ark".to_owned(),
        tags: vec!["a".to_owned(), "b".to_owned()],
    };
    let bytes = serializer.to_bytes(&mut record).unwrap();
    assert_eq!(bytes, [3, 2, 0, 0, 0]);

    let decoded: Named = serializer.from_bytes(&bytes).unwrap();
    assert_eq!(decoded.name, "???");
    assert!(decoded.tags.is_empty());
}

#[test]
fn containers_need_an_accessor() {
    let mut profile = TypeProfile::of::<Named>();
    profile.map::<Vec<String>>("tags").unwrap();
    let err = ProfileSerializer::new().register_profile(profile).unwrap_err();
    assert!(matches!(err, MappingError::InvalidPath { .. }));
}

// -----------------------------------------------------------------------------
// Boxes

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Leaf {
    depth: u8,
}

#[derive(Record, Default, Debug, PartialEq)]
#[record(default)]
struct Tree {
    left: Option<Box<Leaf>>,
    right: Box<Leaf>,
}

#[test]
fn boxed_members_are_traversed() {
    let mut profile = TypeProfile::of::<Tree>();
    profile.map::<u8>(["left", "depth"]).unwrap();
    profile.map::<u8>(".right.depth").unwrap();

    let mut serializer = ProfileSerializer::new();
    serializer.register_profile(profile).unwrap();

    let decoded: Tree = serializer.from_bytes(&[1, 2]).unwrap();
    assert_eq!(decoded.left, Some(Box::new(Leaf { depth: 1 })));
    assert_eq!(decoded.right.depth, 2);
}
