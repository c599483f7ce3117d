//! Parser for SVG source into the shape model

mod reader;

pub use reader::parse;
