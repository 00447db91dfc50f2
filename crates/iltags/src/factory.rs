//! Tag factory and the recursive decoder.

use std::fmt;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::codec::TagReader;
use crate::error::DecodeError;
use crate::limits::DEFAULT_MAX_DEPTH;
use crate::model::{implicit_value_size, is_implicit, StandardTag, Tag, TagId};
use crate::tags::{create_standard, ByteArrayTag};

/// Builds an empty tag of one kind.
pub type TagConstructor = Box<dyn Fn() -> Box<dyn Tag> + Send + Sync>;

lazy_static! {
    /// Lenient factory with every standard tag registered.
    ///
    /// Never mutated after construction; safe to share between threads.
    pub static ref STANDARD_FACTORY: TagFactory = TagFactoryBuilder::standard().build();
}

/// Maps tag ids to kinds and decodes tags.
///
/// The registry is fixed once built. Strict mode can be toggled between
/// decodes; it needs `&mut self`, so it cannot change under a running decode.
pub struct TagFactory {
    registry: FxHashMap<TagId, TagConstructor>,
    strict_mode: bool,
    max_depth: usize,
}

impl TagFactory {
    /// Creates a lenient factory that knows every standard tag.
    pub fn new() -> Self {
        TagFactoryBuilder::standard().build()
    }

    /// Returns a builder with an empty registry.
    pub fn builder() -> TagFactoryBuilder {
        TagFactoryBuilder::new()
    }

    /// Creates an empty tag for `id`, or `None` if the id is not registered.
    pub fn create(&self, id: TagId) -> Option<Box<dyn Tag>> {
        let tag = self.registry.get(&id).map(|ctor| ctor())?;
        debug_assert_eq!(tag.id(), id, "constructor registered for {} built another id", id);
        Some(tag)
    }

    /// Returns true if unknown tags are rejected.
    pub fn is_strict_mode(&self) -> bool {
        self.strict_mode
    }

    pub fn set_strict_mode(&mut self, strict_mode: bool) {
        self.strict_mode = strict_mode;
    }

    /// Maximum tag nesting depth accepted by [`deserialize`](Self::deserialize).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes the next tag from the reader.
    ///
    /// The value of the tag is read inside a limit of its declared size and
    /// must consume it exactly. Composite kinds call back into this method
    /// for their children.
    ///
    /// Unknown ids fail in strict mode. Otherwise they are kept as an opaque
    /// [`ByteArrayTag`], unless their size cannot be known (implicit ids
    /// without a fixed size).
    ///
    /// After an error the reader is left mid-stream, possibly with limits
    /// still pushed, and should be discarded. Its depth is restored.
    pub fn deserialize(&self, reader: &mut TagReader<'_>) -> Result<Box<dyn Tag>, DecodeError> {
        let id = reader.read_varint()?;
        let size = if is_implicit(id) {
            implicit_value_size(id)
        } else {
            Some(reader.read_varint()?)
        };

        let mut tag = match self.create(id) {
            Some(tag) => tag,
            None if self.strict_mode => {
                log::debug!("rejecting unknown tag {} at offset {}", id, reader.offset());
                return Err(DecodeError::UnknownTag { id });
            }
            None => {
                let Some(size) = size else {
                    return Err(DecodeError::UnknownImplicitTag { id });
                };
                log::debug!("keeping unknown tag {} as {} opaque bytes", id, size);
                Box::new(ByteArrayTag::with_id(id, Vec::new()))
            }
        };

        reader.enter(self.max_depth)?;
        let result = self.read_value(&mut *tag, size, reader);
        reader.leave();
        result?;

        log::trace!("decoded tag {} ending at offset {}", id, reader.offset());
        Ok(tag)
    }

    fn read_value(
        &self,
        tag: &mut dyn Tag,
        size: Option<u64>,
        reader: &mut TagReader<'_>,
    ) -> Result<(), DecodeError> {
        match size {
            Some(size) => {
                reader.push_limit(size)?;
                tag.deserialize_value(self, Some(size), reader)?;
                reader.pop_limit(true)
            }
            None => tag.deserialize_value(self, None, reader),
        }
    }
}

impl Default for TagFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TagFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&TagId> = self.registry.keys().collect();
        ids.sort();
        f.debug_struct("TagFactory")
            .field("registered", &ids)
            .field("strict_mode", &self.strict_mode)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

/// Configures a [`TagFactory`].
pub struct TagFactoryBuilder {
    registry: FxHashMap<TagId, TagConstructor>,
    strict_mode: bool,
    max_depth: usize,
}

impl TagFactoryBuilder {
    /// Creates a builder with no registered kinds.
    pub fn new() -> Self {
        Self {
            registry: FxHashMap::default(),
            strict_mode: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Creates a builder with every standard kind registered.
    pub fn standard() -> Self {
        StandardTag::ALL
            .into_iter()
            .fold(Self::new(), |builder, kind| {
                builder.register(kind.id(), move || create_standard(kind))
            })
    }

    /// Registers a constructor for `id`, replacing any previous one.
    ///
    /// The constructor must build tags that report `id`.
    pub fn register<F>(mut self, id: TagId, ctor: F) -> Self
    where
        F: Fn() -> Box<dyn Tag> + Send + Sync + 'static,
    {
        self.registry.insert(id, Box::new(ctor));
        self
    }

    pub fn strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> TagFactory {
        TagFactory {
            registry: self.registry,
            strict_mode: self.strict_mode,
            max_depth: self.max_depth,
        }
    }
}

impl Default for TagFactoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::TagWriter;
    use crate::model::TagExt;
    use crate::tags::{BoolTag, Int32Tag, NullTag, TagArrayTag, VarIntTag};

    fn encode(tag: &dyn Tag) -> Vec<u8> {
        let mut out = Vec::new();
        tag.serialize(&mut TagWriter::new(&mut out)).unwrap();
        out
    }

    #[test]
    fn test_create_standard() {
        let factory = TagFactory::new();
        for kind in StandardTag::ALL {
            let tag = factory.create(kind.id()).unwrap();
            assert_eq!(tag.id(), kind.id());
        }
        for reserved in [14, 15, 26, 27, 28, 29, 30, 31] {
            assert!(factory.create(reserved).is_none());
        }
        assert!(factory.create(NullTag.id()).unwrap().is::<NullTag>());
        assert!(factory.create(1).unwrap().is::<BoolTag>());
    }

    #[test]
    fn test_strict_mode_toggle() {
        let mut factory = TagFactory::new();
        assert!(!factory.is_strict_mode());
        factory.set_strict_mode(true);
        assert!(factory.is_strict_mode());
        factory.set_strict_mode(false);
        assert!(!factory.is_strict_mode());
        assert!(TagFactory::builder().strict_mode(true).build().is_strict_mode());
    }

    #[test]
    fn test_strict_rejects_unknown() {
        let data = [0xF8, 0x00, 0x02, 0xAA, 0xBB]; // id 248, 2 bytes
        let factory = TagFactoryBuilder::standard().strict_mode(true).build();
        let mut reader = TagReader::new(&data[..]);
        assert!(matches!(
            factory.deserialize(&mut reader),
            Err(DecodeError::UnknownTag { id: 248 })
        ));
    }

    #[test]
    fn test_lenient_keeps_unknown_as_bytes() {
        let data = [0xF8, 0x00, 0x02, 0xAA, 0xBB];
        let factory = TagFactory::new();
        let mut reader = TagReader::new(&data[..]);
        let tag = factory.deserialize(&mut reader).unwrap();
        let opaque = tag.downcast_ref::<ByteArrayTag>().unwrap();
        assert_eq!(opaque.id(), 248);
        assert_eq!(opaque.value(), &[0xAA, 0xBB]);
        assert_eq!(encode(tag.as_ref()), data);
    }

    #[test]
    fn test_lenient_keeps_unknown_fixed_implicit() {
        // No kinds registered: the bool is kept as one opaque byte.
        let factory = TagFactory::builder().build();
        let data = [0x01, 0x01];
        let mut reader = TagReader::new(&data[..]);
        let tag = factory.deserialize(&mut reader).unwrap();
        assert!(tag.is::<ByteArrayTag>());
        assert_eq!(encode(tag.as_ref()), data);
    }

    #[test]
    fn test_unknown_implicit_without_size() {
        let factory = TagFactory::new();
        for id in [14u8, 15] {
            let data = [id, 0x00];
            let mut reader = TagReader::new(&data[..]);
            assert!(matches!(
                factory.deserialize(&mut reader),
                Err(DecodeError::UnknownImplicitTag { .. })
            ));
        }
        // Without a registered varint kind, id 10 cannot be skipped either.
        let factory = TagFactory::builder().build();
        let mut reader = TagReader::new(&[0x0A, 0x05][..]);
        assert!(matches!(
            factory.deserialize(&mut reader),
            Err(DecodeError::UnknownImplicitTag { id: 10 })
        ));
    }

    #[test]
    fn test_varint_tag_is_self_delimiting() {
        let tag = VarIntTag::new(1_000_000);
        let bytes = encode(&tag);
        assert_eq!(bytes[0], 0x0A);
        let mut reader = TagReader::new(bytes.as_slice());
        let decoded = TagFactory::new().deserialize(&mut reader).unwrap();
        assert_eq!(decoded.downcast_ref::<VarIntTag>(), Some(&tag));
        assert!(!reader.is_limited());
    }

    #[test]
    fn test_value_must_fill_declared_size() {
        // Explicit int32 under id 300 declaring 5 bytes.
        let factory = TagFactory::builder()
            .register(300, || Box::new(Int32Tag::with_id(300, 0)))
            .build();
        let mut data = crate::codec::varint::encode(300).to_vec();
        data.extend_from_slice(&[0x05, 0, 0, 0, 1, 0]);
        let mut reader = TagReader::new(data.as_slice());
        assert!(matches!(
            factory.deserialize(&mut reader),
            Err(DecodeError::InvalidValueSize { id: 300, expected: 4, actual: Some(5) })
        ));
    }

    #[test]
    fn test_declared_size_beyond_parent() {
        // Tag array (21) of 3 bytes holding a byte array (16) claiming 10 bytes.
        let data = [21, 3, 1, 16, 10, 0, 0, 0];
        let mut reader = TagReader::new(&data[..]);
        assert!(matches!(
            TagFactory::new().deserialize(&mut reader),
            Err(DecodeError::LimitExceedsParent { size: 10, .. })
        ));
    }

    #[test]
    fn test_max_depth() {
        let mut tag: Box<dyn Tag> = Box::new(NullTag);
        for _ in 0..5 {
            tag = Box::new(TagArrayTag::new(vec![tag]));
        }
        let bytes = encode(tag.as_ref());

        let shallow = TagFactoryBuilder::standard().max_depth(5).build();
        let mut reader = TagReader::new(bytes.as_slice());
        assert!(matches!(
            shallow.deserialize(&mut reader),
            Err(DecodeError::NestingTooDeep { max: 5 })
        ));

        let deep = TagFactoryBuilder::standard().max_depth(6).build();
        let mut reader = TagReader::new(bytes.as_slice());
        let decoded = deep.deserialize(&mut reader).unwrap();
        assert!(*decoded == *tag);
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    fn test_depth_restored_after_error() {
        // Array holding one bool with an invalid byte.
        let data = [21, 3, 1, 0x01, 0x07];
        let mut reader = TagReader::new(&data[..]);
        assert!(matches!(
            TagFactory::new().deserialize(&mut reader),
            Err(DecodeError::InvalidBool { value: 7 })
        ));
        assert_eq!(reader.depth(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "built another id")]
    fn test_create_checks_constructor_id() {
        let factory = TagFactory::builder()
            .register(40, || Box::new(BoolTag::new(true)))
            .build();
        let _ = factory.create(40);
    }

    #[test]
    fn test_shared_standard_factory() {
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                std::thread::spawn(move || {
                    let data = [0x03, i];
                    let mut reader = TagReader::new(&data[..]);
                    STANDARD_FACTORY.deserialize(&mut reader).unwrap().id()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 3);
        }
    }
}
