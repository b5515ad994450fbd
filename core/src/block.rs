use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SECTION_TEXT: &str = "This is a section block with text.";
pub const DEFAULT_IMAGE_TITLE: &str = "Image Title";
pub const DEFAULT_IMAGE_URL: &str =
    "https://api.slack.com/img/blocks/bkb_template_images/palmtree.png";
pub const DEFAULT_IMAGE_ALT_TEXT: &str = "A palm tree";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Section,
    Image,
    Divider,
}

impl BlockKind {
    pub const ALL: [BlockKind; 3] = [BlockKind::Section, BlockKind::Image, BlockKind::Divider];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Section => "section",
            BlockKind::Image => "image",
            BlockKind::Divider => "divider",
        }
    }

    /// Unknown tags map to `None`; callers treat that as a no-op.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let trimmed = tag.trim();
        BlockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == trimmed)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextType {
    #[default]
    Mrkdwn,
    PlainText,
}

impl TextType {
    pub fn as_str(self) -> &'static str {
        match self {
            TextType::Mrkdwn => "mrkdwn",
            TextType::PlainText => "plain_text",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "mrkdwn" => Some(TextType::Mrkdwn),
            "plain_text" => Some(TextType::PlainText),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TextType::Mrkdwn => "Markdown",
            TextType::PlainText => "Plain Text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub text_type: TextType,
    pub text: String,
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: TextType::Mrkdwn,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text_type: TextType::PlainText,
            text: text.into(),
        }
    }
}

/// External form of a block. Field names match the message schema, so this
/// serializes directly into the export array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Section {
        text: TextObject,
    },
    Image {
        title: TextObject,
        image_url: String,
        alt_text: String,
    },
    Divider,
}

impl BlockContent {
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Section => BlockContent::Section {
                text: TextObject::mrkdwn(DEFAULT_SECTION_TEXT),
            },
            BlockKind::Image => BlockContent::Image {
                title: TextObject::plain(DEFAULT_IMAGE_TITLE),
                image_url: DEFAULT_IMAGE_URL.to_string(),
                alt_text: DEFAULT_IMAGE_ALT_TEXT.to_string(),
            },
            BlockKind::Divider => BlockContent::Divider,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            BlockContent::Section { .. } => BlockKind::Section,
            BlockContent::Image { .. } => BlockKind::Image,
            BlockContent::Divider => BlockKind::Divider,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hands out `block-{salt}-{seq}` ids. The sequence never repeats within one
/// generator, which is what keeps ids unique inside a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockIdGen {
    salt: u64,
    next: u64,
}

impl BlockIdGen {
    pub fn new(salt: u64) -> Self {
        Self { salt, next: 0 }
    }

    pub fn next_id(&mut self) -> BlockId {
        let seq = self.next;
        self.next += 1;
        BlockId(format!("block-{:x}-{}", self.salt, seq))
    }
}

impl Default for BlockIdGen {
    fn default() -> Self {
        Self::new(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
}

impl Block {
    pub fn new(kind: BlockKind, id: BlockId) -> Self {
        Self {
            id,
            content: BlockContent::default_for(kind),
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }
}

pub fn create_block(tag: &str, ids: &mut BlockIdGen) -> Option<Block> {
    let kind = BlockKind::from_tag(tag)?;
    Some(Block::new(kind, ids.next_id()))
}
