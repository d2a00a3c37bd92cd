//! Capillary beds: short fans of arteriole and venule twigs around an anchor.
//!
//! Twig directions follow the golden angle around the anchor so beds look
//! irregular while staying fully deterministic.

use super::SegmentSet;
use super::VesselKind::{Artery, Vein};

/// Shared display name of every capillary twig.
pub const CAPILLARY_LABEL: &str = "Capillary Network";

const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;
const ARTERIOLE_RADIUS: f64 = 0.015;
const VENULE_RADIUS: f64 = 0.018;

struct Bed {
    anchor: [f64; 3],
    spread: f64,
    twigs: usize,
    phase: f64,
    paired: bool,
}

const BEDS: &[Bed] = &[
    // hand
    Bed { anchor: [2.78, 7.85, 0.15], spread: 0.35, twigs: 8, phase: 0.4, paired: true },
    // foot
    Bed { anchor: [0.74, 0.35, 0.55], spread: 0.30, twigs: 8, phase: 1.1, paired: true },
    // kidney
    Bed { anchor: [0.68, 9.42, -0.42], spread: 0.22, twigs: 6, phase: 2.3, paired: true },
    // lung
    Bed { anchor: [0.85, 11.60, 0.00], spread: 0.50, twigs: 10, phase: 0.9, paired: true },
    // cortex
    Bed { anchor: [0.00, 15.35, 0.00], spread: 0.45, twigs: 12, phase: 0.0, paired: false },
    // liver
    Bed { anchor: [0.55, 10.15, 0.20], spread: 0.35, twigs: 8, phase: 1.7, paired: false },
    // myocardium
    Bed { anchor: [0.00, 10.80, 0.30], spread: 0.25, twigs: 6, phase: 3.1, paired: false },
];

pub(super) fn author(set: &mut SegmentSet) {
    for bed in BEDS {
        for j in 0..bed.twigs {
            let points = twig(bed, j);
            // Alternate arterioles and venules within a bed.
            let (kind, radius) = if j % 2 == 0 {
                (Artery, ARTERIOLE_RADIUS)
            } else {
                (Vein, VENULE_RADIUS)
            };
            if bed.paired {
                set.bilateral(kind, 4, radius, CAPILLARY_LABEL, None, &points);
            } else {
                set.add(kind, 4, radius, CAPILLARY_LABEL, &points);
            }
        }
    }
}

fn twig(bed: &Bed, j: usize) -> [[f64; 3]; 3] {
    let jf = j as f64;
    let azimuth = bed.phase + jf * GOLDEN_ANGLE;
    let elevation = (jf * 0.7 + bed.phase).sin() * 0.6;
    let horizontal = (1.0 - elevation * elevation).sqrt();
    let dir = [azimuth.cos() * horizontal, elevation, azimuth.sin() * horizontal];

    let bend = 0.15 * bed.spread * (jf * 1.3).sin();
    let side = [-azimuth.sin() * bend, 0.0, azimuth.cos() * bend];

    let [ax, ay, az] = bed.anchor;
    let s = bed.spread;
    [
        [ax, ay, az],
        [ax + dir[0] * s * 0.5 + side[0], ay + dir[1] * s * 0.5, az + dir[2] * s * 0.5 + side[2]],
        [ax + dir[0] * s - side[0] * 0.5, ay + dir[1] * s, az + dir[2] * s - side[2] * 0.5],
    ]
}
