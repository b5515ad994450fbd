use crate::block::BlockKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub kind: BlockKind,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

// Generated from palette/catalog.toml by build.rs.
include!(concat!(env!("OUT_DIR"), "/palette_catalog.rs"));

pub fn palette_entry(kind: BlockKind) -> Option<&'static PaletteEntry> {
    PALETTE.iter().find(|entry| entry.kind == kind)
}

/// Name shown in block headers; falls back to the raw tag.
pub fn display_name(kind: BlockKind) -> &'static str {
    palette_entry(kind)
        .map(|entry| entry.name)
        .unwrap_or_else(|| kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_kind_once() {
        assert_eq!(PALETTE.len(), BlockKind::ALL.len());
        for kind in BlockKind::ALL {
            assert_eq!(PALETTE.iter().filter(|entry| entry.kind == kind).count(), 1);
        }
    }

    #[test]
    fn catalog_order_and_names() {
        let names: Vec<_> = PALETTE.iter().map(|entry| entry.name).collect();
        assert_eq!(names, vec!["Section", "Image", "Divider"]);
        assert_eq!(display_name(BlockKind::Divider), "Divider");
        assert_eq!(
            palette_entry(BlockKind::Image).map(|entry| entry.icon),
            Some("🖼️")
        );
    }
}
