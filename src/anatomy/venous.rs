//! Venous return: venae cavae, jugular system, limb veins, portal system.

use super::SegmentSet;
use super::VesselKind::Vein;

pub(super) fn author(set: &mut SegmentSet) {
    great_veins(set);
    head_and_neck(set);
    upper_limb(set);
    visceral(set);
    lower_limb(set);
}

fn great_veins(set: &mut SegmentSet) {
    set.vein(0, 0.26, "Superior Vena Cava", &[
        [0.32, 12.60, 0.05],
        [0.30, 12.10, 0.10],
        [0.28, 11.60, 0.15],
        [0.25, 11.20, 0.20],
    ]);
    set.vein(0, 0.28, "Inferior Vena Cava", &[
        [0.25, 11.00, 0.10],
        [0.26, 10.30, -0.10],
        [0.22, 9.50, -0.20],
        [0.20, 8.60, -0.15],
    ]);
    set.vein(1, 0.14, "Azygos Vein", &[
        [0.12, 9.60, -0.45],
        [0.10, 10.40, -0.50],
        [0.12, 11.30, -0.48],
        [0.25, 11.90, -0.20],
        [0.30, 12.20, 0.00],
    ]);
    set.vein(3, 0.045, "Great Cardiac Vein", &[
        [-0.28, 10.35, 0.28],
        [-0.30, 10.70, 0.40],
        [-0.35, 10.95, 0.15],
        [-0.15, 10.85, -0.10],
    ]);
}

fn head_and_neck(set: &mut SegmentSet) {
    set.bilateral(Vein, 1, 0.15, "R. Brachiocephalic Vein", None, &[
        [0.70, 12.95, 0.15],
        [0.50, 12.80, 0.12],
        [0.32, 12.60, 0.05],
    ]);
    set.bilateral(Vein, 1, 0.12, "R. Internal Jugular Vein", None, &[
        [0.60, 14.40, -0.05],
        [0.62, 13.80, 0.05],
        [0.66, 13.30, 0.12],
        [0.70, 12.95, 0.15],
    ]);
    set.bilateral(Vein, 3, 0.05, "R. External Jugular Vein", None, &[
        [0.75, 14.50, 0.10],
        [0.85, 13.90, 0.20],
        [0.92, 13.20, 0.18],
    ]);
    set.bilateral(Vein, 2, 0.07, "R. Sigmoid Sinus", None, &[
        [0.55, 15.20, -0.45],
        [0.62, 14.90, -0.30],
        [0.60, 14.40, -0.05],
    ]);
    set.bilateral(Vein, 2, 0.08, "R. Transverse Sinus", None, &[
        [0.02, 15.30, -0.60],
        [0.30, 15.28, -0.56],
        [0.55, 15.20, -0.45],
    ]);
    set.vein(2, 0.08, "Superior Sagittal Sinus", &[
        [0.00, 15.10, 0.55],
        [0.00, 15.75, 0.30],
        [0.00, 15.90, -0.10],
        [0.00, 15.70, -0.45],
        [0.00, 15.30, -0.60],
    ]);
    set.bilateral(Vein, 3, 0.04, "R. Facial Vein", None, &[
        [0.35, 14.95, 0.52],
        [0.45, 14.65, 0.42],
        [0.58, 14.40, 0.10],
    ]);
}

fn upper_limb(set: &mut SegmentSet) {
    set.bilateral(Vein, 1, 0.11, "R. Subclavian Vein", None, &[
        [1.60, 12.70, 0.08],
        [1.20, 12.95, 0.12],
        [0.70, 12.95, 0.15],
    ]);
    set.bilateral(Vein, 2, 0.09, "R. Axillary Vein", None, &[
        [2.05, 11.70, 0.15],
        [1.85, 12.25, 0.12],
        [1.60, 12.70, 0.08],
    ]);
    set.bilateral(Vein, 2, 0.07, "R. Basilic Vein", None, &[
        [2.50, 8.50, -0.05],
        [2.38, 9.50, -0.05],
        [2.25, 10.60, 0.00],
        [2.05, 11.70, 0.15],
    ]);
    set.bilateral(Vein, 3, 0.05, "R. Cephalic Vein", None, &[
        [2.80, 8.50, 0.20],
        [2.60, 9.60, 0.30],
        [2.40, 10.80, 0.30],
        [2.10, 12.00, 0.30],
        [1.75, 12.60, 0.20],
    ]);
    set.bilateral(Vein, 3, 0.04, "R. Median Cubital Vein", None, &[
        [2.44, 10.20, 0.32],
        [2.34, 10.40, 0.22],
        [2.27, 10.60, 0.02],
    ]);
    set.bilateral(Vein, 3, 0.035, "R. Dorsal Venous Network", None, &[
        [2.58, 8.20, -0.08],
        [2.70, 8.00, 0.00],
        [2.82, 8.15, 0.15],
        [2.80, 8.50, 0.20],
    ]);
}

fn visceral(set: &mut SegmentSet) {
    set.vein(2, 0.08, "Hepatic Portal Vein", &[
        [0.15, 9.20, 0.20],
        [0.30, 9.60, 0.15],
        [0.45, 10.00, 0.10],
    ]);
    set.vein(3, 0.05, "Splenic Vein", &[
        [-0.70, 9.95, -0.10],
        [-0.30, 9.50, 0.05],
        [0.15, 9.20, 0.20],
    ]);
    set.vein(3, 0.05, "Superior Mesenteric Vein", &[
        [0.10, 8.40, 0.35],
        [0.12, 8.80, 0.30],
        [0.15, 9.20, 0.20],
    ]);
    set.vein(2, 0.08, "Hepatic Vein", &[
        [0.60, 10.30, 0.15],
        [0.40, 10.50, 0.10],
        [0.26, 10.60, 0.00],
    ]);
    set.bilateral(Vein, 2, 0.07, "R. Renal Vein", Some("L. Renal Vein"), &[
        [0.62, 9.45, -0.30],
        [0.40, 9.40, -0.22],
        [0.23, 9.35, -0.18],
    ]);
}

fn lower_limb(set: &mut SegmentSet) {
    set.bilateral(Vein, 1, 0.15, "R. Common Iliac Vein", None, &[
        [0.20, 8.60, -0.15],
        [0.45, 8.20, -0.15],
        [0.65, 7.85, -0.10],
    ]);
    set.bilateral(Vein, 1, 0.13, "R. External Iliac Vein", None, &[
        [0.65, 7.85, -0.10],
        [0.78, 7.45, 0.05],
        [0.88, 7.05, 0.12],
    ]);
    set.bilateral(Vein, 2, 0.08, "R. Internal Iliac Vein", None, &[
        [0.65, 7.85, -0.10],
        [0.52, 7.45, -0.35],
        [0.40, 7.15, -0.45],
    ]);
    set.bilateral(Vein, 1, 0.12, "R. Femoral Vein", None, &[
        [0.88, 7.05, 0.12],
        [0.90, 6.30, 0.12],
        [0.88, 5.60, 0.02],
        [0.85, 4.90, -0.12],
    ]);
    set.bilateral(Vein, 2, 0.07, "R. Great Saphenous Vein", None, &[
        [0.72, 0.90, 0.25],
        [0.60, 2.20, 0.10],
        [0.55, 3.60, -0.05],
        [0.62, 4.80, 0.00],
        [0.80, 6.20, 0.22],
        [0.88, 6.90, 0.18],
    ]);
    set.bilateral(Vein, 2, 0.08, "R. Popliteal Vein", None, &[
        [0.82, 4.10, -0.20],
        [0.84, 4.50, -0.25],
        [0.85, 4.90, -0.12],
    ]);
    set.bilateral(Vein, 3, 0.045, "R. Small Saphenous Vein", None, &[
        [0.62, 0.80, -0.15],
        [0.70, 2.20, -0.30],
        [0.80, 3.40, -0.32],
        [0.82, 4.10, -0.20],
    ]);
    set.bilateral(Vein, 3, 0.04, "R. Anterior Tibial Vein", None, &[
        [0.80, 1.00, 0.12],
        [0.84, 2.10, 0.05],
        [0.86, 3.20, 0.00],
        [0.82, 4.10, -0.20],
    ]);
    set.bilateral(Vein, 3, 0.04, "R. Posterior Tibial Vein", None, &[
        [0.60, 0.95, -0.10],
        [0.62, 2.00, -0.24],
        [0.68, 3.20, -0.26],
        [0.80, 4.05, -0.22],
    ]);
    set.bilateral(Vein, 3, 0.035, "R. Dorsal Venous Arch", None, &[
        [0.62, 0.80, -0.15],
        [0.62, 0.35, 0.45],
        [0.74, 0.28, 0.80],
        [0.84, 0.40, 0.55],
        [0.72, 0.90, 0.25],
    ]);
}
