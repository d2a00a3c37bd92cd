//! Static legend and the export stub shown next to the viewer.

use serde::Serialize;

use crate::anatomy::{MAX_DEPTH_TIER, VesselKind};

use super::palette::{base_color, to_hex};

/// File name offered by the browser download.
pub const EXPORT_FILE_NAME: &str = "vascular-model.bin";

const EXPORT_MAGIC: &[u8; 8] = b"VSLPHLDR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub label: &'static str,
    pub kind: VesselKind,
    pub depth_tier: u8,
    pub color: String,
}

const TIER_NAMES: [&str; 5] = ["Great vessels", "Major branches", "Medium branches", "Small branches", "Capillaries"];

/// One swatch per vessel kind and depth tier, arteries first.
#[must_use]
pub fn legend() -> Vec<LegendEntry> {
    [VesselKind::Artery, VesselKind::Vein]
        .into_iter()
        .flat_map(|kind| {
            (0..=MAX_DEPTH_TIER).map(move |tier| LegendEntry {
                label: TIER_NAMES[usize::from(tier)],
                kind,
                depth_tier: tier,
                color: to_hex(base_color(kind, tier)),
            })
        })
        .collect()
}

/// Placeholder download payload. Not a model format: an 8 byte tag followed
/// by the batch names, one per line.
#[must_use]
pub fn export_placeholder<'a>(batch_names: impl IntoIterator<Item = &'a str>) -> Vec<u8> {
    let mut bytes = EXPORT_MAGIC.to_vec();
    for name in batch_names {
        bytes.extend_from_slice(name.as_bytes());
        bytes.push(b'\n');
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_covers_every_tier() {
        let entries = legend();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].kind, VesselKind::Artery);
        assert_eq!(entries[5].kind, VesselKind::Vein);
        assert_eq!(entries[4].label, "Capillaries");
        assert!(entries.iter().all(|e| e.color.starts_with('#') && e.color.len() == 7));
    }

    #[test]
    fn test_export_placeholder() {
        let bytes = export_placeholder(["arteryMajor", "veinSmall"]);
        assert!(bytes.starts_with(b"VSLPHLDR"));
        assert!(bytes.ends_with(b"arteryMajor\nveinSmall\n"));
        assert_eq!(export_placeholder([]), b"VSLPHLDR".to_vec());
    }
}
