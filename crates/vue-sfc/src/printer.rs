//! Serialization back to the `.vue` text format.
//!
//! Output order is fixed: template, script, then styles and custom blocks in
//! the order they were parsed. Blocks are joined with a single newline.

use crate::ast::{Attribute, AttributeValue, Block, SfcDocument};
use std::fmt::{self, Write};

impl SfcDocument {
    /// Prints the document. `serialize(parse(x)) == x` for canonical `x`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SfcDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks = self
            .template
            .iter()
            .chain(self.script.iter())
            .chain(self.blocks.iter());

        for (i, block) in blocks.enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.kind.tag();
        write!(f, "<{tag}")?;
        for attr in &self.attributes {
            write_attribute(f, attr)?;
        }
        write!(f, ">{}</{tag}>", self.content)
    }
}

fn write_attribute(f: &mut fmt::Formatter<'_>, attr: &Attribute) -> fmt::Result {
    match &attr.value {
        AttributeValue::Bool(true) => write!(f, " {}", attr.name),
        AttributeValue::Bool(false) => Ok(()),
        // Keep values that contain a double quote readable by the parser.
        AttributeValue::Text(value) if value.contains('"') && !value.contains('\'') => {
            write!(f, " {}='{}'", attr.name, value)
        }
        AttributeValue::Text(value) => write!(f, " {}=\"{}\"", attr.name, value),
    }
}
