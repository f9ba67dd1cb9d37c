//! Custom block formats for the rich-text widget.
//!
//! A block format is a plain record of capabilities: which tags it owns,
//! which attribute carries its value, how to build a node and how to read
//! the value back. Formats are registered once into a process-wide registry
//! at startup and looked up from there; nothing is re-registered when an
//! editor mounts.

use std::sync::OnceLock;

use smol_str::SmolStr;

use crate::error::FormatError;

/// Framework-neutral description of a block element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub tag: SmolStr,
    pub attributes: Vec<(SmolStr, SmolStr)>,
}

impl BlockNode {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&SmolStr> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attribute(&mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }
}

/// Capability record for one block format.
#[derive(Debug, Clone, Copy)]
pub struct BlockFormat {
    /// Unique format name, as the widget refers to it.
    pub name: &'static str,
    /// Tags this format renders to; the first is used when creating nodes.
    pub tag_names: &'static [&'static str],
    /// Attribute holding the format value.
    pub attribute_name: &'static str,
    pub create_fn: fn(&BlockFormat, &str) -> BlockNode,
    pub format_fn: fn(&BlockFormat, &BlockNode) -> Option<SmolStr>,
}

impl BlockFormat {
    /// Build a node carrying `value`.
    pub fn create(&self, value: &str) -> BlockNode {
        (self.create_fn)(self, value)
    }

    /// Read this format's value back from a node.
    pub fn formats(&self, node: &BlockNode) -> Option<SmolStr> {
        (self.format_fn)(self, node)
    }

    pub fn owns_tag(&self, tag: &str) -> bool {
        self.tag_names.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Node builder for formats that store their value in one attribute.
pub fn create_with_attribute(format: &BlockFormat, value: &str) -> BlockNode {
    let tag = format.tag_names.first().copied().unwrap_or("div");
    let mut node = BlockNode::new(tag);
    node.set_attribute(format.attribute_name, value);
    node
}

/// Value reader matching [`create_with_attribute`].
pub fn read_attribute(format: &BlockFormat, node: &BlockNode) -> Option<SmolStr> {
    if !format.owns_tag(&node.tag) {
        return None;
    }
    node.attribute(format.attribute_name).cloned()
}

/// Heading block: `h1`/`h2` with the level name in `data-heading`.
pub const HEADING: BlockFormat = BlockFormat {
    name: "heading",
    tag_names: &["h1", "h2"],
    attribute_name: "data-heading",
    create_fn: create_with_attribute,
    format_fn: read_attribute,
};

/// Formats available to the widget.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    formats: Vec<BlockFormat>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in formats.
    pub fn with_builtins() -> Self {
        Self {
            formats: vec![HEADING],
        }
    }

    pub fn register(&mut self, format: BlockFormat) -> Result<(), FormatError> {
        if self.lookup(format.name).is_some() {
            return Err(FormatError::Duplicate(SmolStr::new(format.name)));
        }
        tracing::debug!(name = format.name, tags = ?format.tag_names, "registered block format");
        self.formats.push(format);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&BlockFormat> {
        self.formats.iter().find(|f| f.name == name)
    }

    /// First registered format owning `tag`.
    pub fn for_tag(&self, tag: &str) -> Option<&BlockFormat> {
        self.formats.iter().find(|f| f.owns_tag(tag))
    }

    /// Give an owned node its format value if it has none.
    ///
    /// Blocks typed straight into the widget (e.g. a heading picked from the
    /// toolbar) arrive without the attribute; the lowercase tag name becomes
    /// the value. Returns whether the node changed.
    pub fn annotate(&self, node: &mut BlockNode) -> bool {
        let Some(format) = self.for_tag(&node.tag) else {
            return false;
        };
        if node.attribute(format.attribute_name).is_some() {
            return false;
        }
        let value = node.tag.to_ascii_lowercase();
        node.set_attribute(format.attribute_name, value);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockFormat> {
        self.formats.iter()
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

static GLOBAL: OnceLock<FormatRegistry> = OnceLock::new();

/// Install the process-wide registry.
///
/// Only the first call has an effect; later calls return the registry that
/// is already installed and drop `registry`.
pub fn init_global(registry: FormatRegistry) -> &'static FormatRegistry {
    GLOBAL.get_or_init(|| registry)
}

/// The process-wide registry, initialised with the built-ins on first use.
pub fn global() -> &'static FormatRegistry {
    GLOBAL.get_or_init(FormatRegistry::with_builtins)
}
