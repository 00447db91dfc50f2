//! Prints the tag tree of an ILTags file.
//!
//! Usage: `cargo run --example dump_tags -- <file> [--strict]`

use std::fs;

use iltags::tags::{
    BigDecimalTag, BigIntTag, BoolTag, ByteArrayTag, OidTag, RangeTag, StringTag, TagArrayTag,
    TagSequenceTag, VarIntArrayTag, VarIntTag, VersionTag,
};
use iltags::{decode_tags_with, StandardTag, Tag, TagExt, TagFactoryBuilder};

fn describe(tag: &dyn Tag) -> String {
    if let Some(t) = tag.downcast_ref::<BoolTag>() {
        format!("{}", t.value())
    } else if let Some(t) = tag.downcast_ref::<VarIntTag>() {
        format!("{}", t.value())
    } else if let Some(t) = tag.downcast_ref::<StringTag>() {
        let preview: String = t.value().chars().take(60).collect();
        if t.value().chars().count() > 60 {
            format!("\"{}...\"", preview)
        } else {
            format!("\"{}\"", preview)
        }
    } else if let Some(t) = tag.downcast_ref::<ByteArrayTag>() {
        format!("BYTES[{}]", t.value().len())
    } else if let Some(t) = tag.downcast_ref::<BigIntTag>() {
        format!("{}", t.value())
    } else if let Some(t) = tag.downcast_ref::<BigDecimalTag>() {
        format!("{}e-{}", t.unscaled(), t.scale())
    } else if let Some(t) = tag.downcast_ref::<VarIntArrayTag>() {
        format!("{:?}", t.values())
    } else if let Some(t) = tag.downcast_ref::<OidTag>() {
        let arcs: Vec<String> = t.values().iter().map(u64::to_string).collect();
        arcs.join(".")
    } else if let Some(t) = tag.downcast_ref::<RangeTag>() {
        format!("[{}, {})", t.start(), t.end())
    } else if let Some(t) = tag.downcast_ref::<VersionTag>() {
        let v = t.value();
        format!("{}.{}.{}.{}", v.major, v.minor, v.revision, v.build)
    } else {
        format!("{:?}", tag)
    }
}

fn children(tag: &dyn Tag) -> Option<&[Box<dyn Tag>]> {
    tag.downcast_ref::<TagArrayTag>()
        .map(TagArrayTag::values)
        .or_else(|| tag.downcast_ref::<TagSequenceTag>().map(TagSequenceTag::values))
}

fn print_tag(tag: &dyn Tag, indent: usize) {
    let name = StandardTag::from_id(tag.id())
        .map(|kind| format!("{:?}", kind))
        .unwrap_or_else(|| "opaque".to_string());
    let pad = "  ".repeat(indent);
    match children(tag) {
        Some(children) => {
            println!(
                "{}#{} {} ({} bytes, {} children)",
                pad,
                tag.id(),
                name,
                tag.tag_size(),
                children.len()
            );
            for child in children {
                print_tag(child.as_ref(), indent + 1);
            }
        }
        None => println!("{}#{} {} = {}", pad, tag.id(), name, describe(tag)),
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().expect("usage: dump_tags <file> [--strict]");
    let strict = args.any(|arg| arg == "--strict");

    let data = fs::read(&path).expect("Failed to read file");
    println!("Reading: {} ({} bytes)", path, data.len());

    let factory = TagFactoryBuilder::standard().strict_mode(strict).build();
    match decode_tags_with(&factory, &data) {
        Ok(tags) => {
            println!("{} top-level tags", tags.len());
            for tag in &tags {
                print_tag(tag.as_ref(), 0);
            }
        }
        Err(e) => {
            eprintln!("decode failed ({:?}): {}", e.kind(), e);
            std::process::exit(1);
        }
    }
}
