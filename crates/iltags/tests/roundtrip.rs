//! Property tests over arbitrary tag trees.

use iltags::codec::varint;
use iltags::tags::{
    BigDecimalTag, BigIntTag, Binary128Tag, Binary32Tag, Binary64Tag, BoolTag, ByteArrayTag,
    Int16Tag, Int32Tag, Int64Tag, Int8Tag, NullTag, OidTag, RangeTag, StringTag, TagArrayTag,
    TagSequenceTag, UInt16Tag, UInt32Tag, UInt64Tag, UInt8Tag, VarIntArrayTag, VarIntTag,
    Version, VersionTag,
};
use iltags::{decode_tag, encode_tag, Tag, TagExt};
use num_bigint::BigInt;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Node {
    Null,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    VarInt(u64),
    Float32(f32),
    Float(f64),
    Binary128([u8; 16]),
    Bytes(u64, Vec<u8>),
    Text(String),
    Big(i128),
    Decimal(i128, i32),
    VarInts(Vec<u64>),
    Range(u64, u16),
    Version(i32, i32, i32, i32),
    Oid(Vec<u64>),
    Array(Vec<Node>),
    Sequence(Vec<Node>),
}

impl Node {
    fn build(&self) -> Box<dyn Tag> {
        match self {
            Node::Null => Box::new(NullTag),
            Node::Bool(v) => Box::new(BoolTag::new(*v)),
            Node::Int8(v) => Box::new(Int8Tag::new(*v)),
            Node::UInt8(v) => Box::new(UInt8Tag::new(*v)),
            Node::Int16(v) => Box::new(Int16Tag::new(*v)),
            Node::UInt16(v) => Box::new(UInt16Tag::new(*v)),
            Node::Int32(v) => Box::new(Int32Tag::new(*v)),
            Node::UInt32(v) => Box::new(UInt32Tag::new(*v)),
            Node::Int64(v) => Box::new(Int64Tag::new(*v)),
            Node::UInt64(v) => Box::new(UInt64Tag::new(*v)),
            Node::VarInt(v) => Box::new(VarIntTag::new(*v)),
            Node::Float32(v) => Box::new(Binary32Tag::new(*v)),
            Node::Float(v) => Box::new(Binary64Tag::new(*v)),
            Node::Binary128(v) => Box::new(Binary128Tag::new(*v)),
            Node::Bytes(id, v) => Box::new(ByteArrayTag::with_id(*id, v.clone())),
            Node::Text(v) => Box::new(StringTag::new(v.clone())),
            Node::Big(v) => Box::new(BigIntTag::new(BigInt::from(*v))),
            Node::Decimal(v, scale) => Box::new(BigDecimalTag::new(BigInt::from(*v), *scale)),
            Node::VarInts(v) => Box::new(VarIntArrayTag::new(v.clone())),
            Node::Range(start, count) => Box::new(RangeTag::new(*start, *count)),
            Node::Version(major, minor, revision, build) => {
                Box::new(VersionTag::new(Version::new(*major, *minor, *revision, *build)))
            }
            Node::Oid(v) => Box::new(OidTag::new(v.clone())),
            Node::Array(children) => {
                Box::new(TagArrayTag::new(children.iter().map(Node::build).collect()))
            }
            Node::Sequence(children) => {
                Box::new(TagSequenceTag::new(children.iter().map(Node::build).collect()))
            }
        }
    }
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::Null),
        any::<bool>().prop_map(Node::Bool),
        any::<i8>().prop_map(Node::Int8),
        any::<u8>().prop_map(Node::UInt8),
        any::<i16>().prop_map(Node::Int16),
        any::<u16>().prop_map(Node::UInt16),
        any::<i32>().prop_map(Node::Int32),
        any::<u32>().prop_map(Node::UInt32),
        any::<i64>().prop_map(Node::Int64),
        any::<u64>().prop_map(Node::UInt64),
        any::<u64>().prop_map(Node::VarInt),
        any::<f32>().prop_map(Node::Float32),
        any::<f64>().prop_map(Node::Float),
        any::<[u8; 16]>().prop_map(Node::Binary128),
        (prop_oneof![Just(16u64), 32u64..100_000], prop::collection::vec(any::<u8>(), 0..64))
            .prop_map(|(id, v)| Node::Bytes(id, v)),
        ".{0,40}".prop_map(Node::Text),
        any::<i128>().prop_map(Node::Big),
        (any::<i128>(), any::<i32>()).prop_map(|(v, scale)| Node::Decimal(v, scale)),
        prop::collection::vec(any::<u64>(), 0..16).prop_map(Node::VarInts),
        (any::<u64>(), any::<u16>()).prop_map(|(start, count)| Node::Range(start, count)),
        any::<(i32, i32, i32, i32)>().prop_map(|(a, b, c, d)| Node::Version(a, b, c, d)),
        prop::collection::vec(any::<u64>(), 0..16).prop_map(Node::Oid),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Node::Array),
            prop::collection::vec(inner, 0..8).prop_map(Node::Sequence),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 500, ..ProptestConfig::default() })]

    #[test]
    fn test_tag_tree_roundtrip(node in arb_node()) {
        let tag = node.build();
        let bytes = encode_tag(tag.as_ref()).unwrap();
        prop_assert_eq!(bytes.len() as u64, tag.tag_size());
        let decoded = decode_tag(&bytes).unwrap();
        prop_assert!(decoded == tag);
        prop_assert_eq!(encode_tag(decoded.as_ref()).unwrap(), bytes);
    }

    #[test]
    fn test_decoded_leaf_keeps_its_id(node in arb_node()) {
        let tag = node.build();
        let decoded = decode_tag(&encode_tag(tag.as_ref()).unwrap()).unwrap();
        prop_assert_eq!(decoded.id(), tag.id());
    }

    #[test]
    fn test_truncated_input_never_panics(node in arb_node(), cut in any::<prop::sample::Index>()) {
        let bytes = encode_tag(node.build().as_ref()).unwrap();
        let cut = cut.index(bytes.len());
        prop_assert!(decode_tag(&bytes[..cut]).is_err());
    }

    #[test]
    fn test_garbage_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_tag(&data);
    }

    #[test]
    fn test_varint_size_agrees(value in any::<u64>()) {
        prop_assert_eq!(varint::encode(value).len(), varint::encoded_size(value));
    }
}
