use crate::block::{BlockContent, TextObject, TextType};

/// A single-field edit. Applying a patch to a block that lacks the field is a
/// no-op, so a stale edit can never change a block's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockPatch {
    SectionText(String),
    SectionTextType(TextType),
    ImageTitle(String),
    ImageUrl(String),
    ImageAltText(String),
}

impl BlockPatch {
    pub fn apply(&self, content: &mut BlockContent) -> bool {
        match (self, content) {
            (BlockPatch::SectionText(value), BlockContent::Section { text }) => {
                replace(&mut text.text, value.clone())
            }
            (BlockPatch::SectionTextType(value), BlockContent::Section { text }) => {
                replace(&mut text.text_type, *value)
            }
            (BlockPatch::ImageTitle(value), BlockContent::Image { title, .. }) => {
                // Image titles are always plain text in the message schema.
                let next = TextObject::plain(value.clone());
                replace(title, next)
            }
            (BlockPatch::ImageUrl(value), BlockContent::Image { image_url, .. }) => {
                replace(image_url, value.clone())
            }
            (BlockPatch::ImageAltText(value), BlockContent::Image { alt_text, .. }) => {
                replace(alt_text, value.clone())
            }
            _ => false,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    SectionText,
    SectionTextType,
    ImageTitle,
    ImageUrl,
    ImageAltText,
}

impl FieldKey {
    pub fn dom_id(self) -> &'static str {
        match self {
            FieldKey::SectionText => "prop-section-text",
            FieldKey::SectionTextType => "prop-section-text-type",
            FieldKey::ImageTitle => "prop-image-title",
            FieldKey::ImageUrl => "prop-image-url",
            FieldKey::ImageAltText => "prop-image-alt-text",
        }
    }

    /// Turns raw control input into a patch. Only the text type select can
    /// reject input.
    pub fn patch(self, raw: String) -> Option<BlockPatch> {
        match self {
            FieldKey::SectionText => Some(BlockPatch::SectionText(raw)),
            FieldKey::SectionTextType => TextType::from_tag(&raw).map(BlockPatch::SectionTextType),
            FieldKey::ImageTitle => Some(BlockPatch::ImageTitle(raw)),
            FieldKey::ImageUrl => Some(BlockPatch::ImageUrl(raw)),
            FieldKey::ImageAltText => Some(BlockPatch::ImageAltText(raw)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldControl {
    TextArea { rows: u32 },
    TextInput,
    Select { options: &'static [TextType] },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyField {
    pub key: FieldKey,
    pub label: &'static str,
    pub value: String,
    pub control: FieldControl,
}

pub const TEXT_TYPE_OPTIONS: &[TextType] = &[TextType::Mrkdwn, TextType::PlainText];

pub fn panel_title(content: &BlockContent) -> &'static str {
    match content {
        BlockContent::Section { .. } => "Section Properties",
        BlockContent::Image { .. } => "Image Properties",
        BlockContent::Divider => "Divider Properties",
    }
}

pub fn fields_for(content: &BlockContent) -> Vec<PropertyField> {
    match content {
        BlockContent::Section { text } => vec![
            PropertyField {
                key: FieldKey::SectionText,
                label: "Text",
                value: text.text.clone(),
                control: FieldControl::TextArea { rows: 4 },
            },
            PropertyField {
                key: FieldKey::SectionTextType,
                label: "Text Type",
                value: text.text_type.as_str().to_string(),
                control: FieldControl::Select {
                    options: TEXT_TYPE_OPTIONS,
                },
            },
        ],
        BlockContent::Image {
            title,
            image_url,
            alt_text,
        } => vec![
            PropertyField {
                key: FieldKey::ImageTitle,
                label: "Title",
                value: title.text.clone(),
                control: FieldControl::TextInput,
            },
            PropertyField {
                key: FieldKey::ImageUrl,
                label: "Image URL",
                value: image_url.clone(),
                control: FieldControl::TextInput,
            },
            PropertyField {
                key: FieldKey::ImageAltText,
                label: "Alt Text",
                value: alt_text.clone(),
                control: FieldControl::TextInput,
            },
        ],
        BlockContent::Divider => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;

    #[test]
    fn section_patch_keeps_other_field() {
        let mut content = BlockContent::default_for(BlockKind::Section);
        assert!(BlockPatch::SectionTextType(TextType::PlainText).apply(&mut content));
        assert!(BlockPatch::SectionText(String::new()).apply(&mut content));
        assert_eq!(
            content,
            BlockContent::Section {
                text: TextObject::plain(""),
            }
        );
    }

    #[test]
    fn mismatched_patch_is_ignored() {
        let mut content = BlockContent::default_for(BlockKind::Divider);
        assert!(!BlockPatch::ImageUrl("x".into()).apply(&mut content));
        assert_eq!(content, BlockContent::Divider);

        let mut section = BlockContent::default_for(BlockKind::Section);
        let before = section.clone();
        assert!(!BlockPatch::ImageAltText("x".into()).apply(&mut section));
        assert_eq!(section, before);
    }

    #[test]
    fn unchanged_value_reports_no_change() {
        let mut content = BlockContent::default_for(BlockKind::Image);
        let patch = BlockPatch::ImageAltText(crate::block::DEFAULT_IMAGE_ALT_TEXT.into());
        assert!(!patch.apply(&mut content));
    }

    #[test]
    fn field_sets_per_kind() {
        let keys = |kind| {
            fields_for(&BlockContent::default_for(kind))
                .into_iter()
                .map(|field| field.key)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            keys(BlockKind::Section),
            vec![FieldKey::SectionText, FieldKey::SectionTextType]
        );
        assert_eq!(
            keys(BlockKind::Image),
            vec![FieldKey::ImageTitle, FieldKey::ImageUrl, FieldKey::ImageAltText]
        );
        assert!(keys(BlockKind::Divider).is_empty());
    }

    #[test]
    fn select_rejects_unknown_text_type() {
        assert_eq!(FieldKey::SectionTextType.patch("html".into()), None);
        assert_eq!(
            FieldKey::SectionTextType.patch("plain_text".into()),
            Some(BlockPatch::SectionTextType(TextType::PlainText))
        );
    }
}
