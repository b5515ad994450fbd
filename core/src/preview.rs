use crate::block::BlockContent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockPreview {
    Section { body: String },
    Image { title: String, caption: String },
    Divider,
}

pub fn preview_for(content: &BlockContent) -> BlockPreview {
    match content {
        BlockContent::Section { text } => BlockPreview::Section {
            body: or_placeholder(&text.text, "Empty section"),
        },
        BlockContent::Image {
            title, alt_text, ..
        } => BlockPreview::Image {
            title: or_placeholder(&title.text, "Image"),
            caption: format!("[Image: {}]", or_placeholder(alt_text, "No alt text")),
        },
        BlockContent::Divider => BlockPreview::Divider,
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

pub fn block_count_label(count: usize) -> String {
    if count == 1 {
        "1 block".to_string()
    } else {
        format!("{count} blocks")
    }
}
