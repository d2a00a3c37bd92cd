//! Arterial tree: aorta, head and neck, upper limbs, viscera, lower limbs.

use super::SegmentSet;
use super::VesselKind::Artery;

pub(super) fn author(set: &mut SegmentSet) {
    great_vessels(set);
    head_and_neck(set);
    upper_limb(set);
    visceral(set);
    lower_limb(set);
}

fn great_vessels(set: &mut SegmentSet) {
    set.artery(0, 0.32, "Ascending Aorta", &[
        [0.05, 10.90, 0.25],
        [0.10, 11.30, 0.30],
        [0.12, 11.70, 0.26],
        [0.08, 12.00, 0.15],
    ]);
    set.artery(0, 0.30, "Aortic Arch", &[
        [0.08, 12.00, 0.15],
        [-0.05, 12.25, 0.05],
        [-0.20, 12.20, -0.15],
        [-0.28, 11.90, -0.30],
    ]);
    set.artery(0, 0.28, "Descending Thoracic Aorta", &[
        [-0.28, 11.90, -0.30],
        [-0.25, 11.20, -0.38],
        [-0.18, 10.50, -0.40],
        [-0.10, 9.90, -0.35],
    ]);
    set.artery(0, 0.24, "Abdominal Aorta", &[
        [-0.10, 9.90, -0.35],
        [-0.06, 9.40, -0.30],
        [-0.04, 8.90, -0.25],
        [0.00, 8.50, -0.20],
    ]);
    set.artery(1, 0.16, "Brachiocephalic Trunk", &[
        [0.02, 12.20, 0.10],
        [0.18, 12.55, 0.12],
        [0.32, 12.85, 0.10],
    ]);
    set.artery(3, 0.045, "Right Coronary Artery", &[
        [0.12, 11.05, 0.38],
        [0.35, 10.90, 0.45],
        [0.48, 10.60, 0.35],
        [0.40, 10.35, 0.10],
    ]);
    set.artery(3, 0.045, "Left Anterior Descending Artery", &[
        [-0.02, 11.10, 0.36],
        [-0.18, 10.85, 0.48],
        [-0.28, 10.55, 0.42],
        [-0.30, 10.30, 0.25],
    ]);
    set.artery(3, 0.04, "Circumflex Artery", &[
        [-0.02, 11.10, 0.36],
        [-0.30, 11.00, 0.20],
        [-0.42, 10.80, -0.05],
    ]);
}

fn head_and_neck(set: &mut SegmentSet) {
    set.bilateral(Artery, 1, 0.11, "R. Common Carotid Artery", None, &[
        [0.30, 12.80, 0.10],
        [0.36, 13.40, 0.15],
        [0.40, 13.90, 0.12],
        [0.42, 14.30, 0.05],
    ]);
    set.bilateral(Artery, 2, 0.08, "R. Internal Carotid Artery", None, &[
        [0.42, 14.30, 0.05],
        [0.45, 14.70, -0.05],
        [0.40, 15.00, -0.02],
        [0.32, 15.15, 0.02],
    ]);
    set.bilateral(Artery, 3, 0.05, "R. External Carotid Artery", None, &[
        [0.42, 14.30, 0.05],
        [0.52, 14.55, 0.22],
        [0.58, 14.85, 0.38],
    ]);
    set.bilateral(Artery, 3, 0.04, "R. Facial Artery", None, &[
        [0.52, 14.55, 0.22],
        [0.48, 14.70, 0.45],
        [0.38, 14.90, 0.55],
    ]);
    set.bilateral(Artery, 3, 0.04, "R. Superficial Temporal Artery", None, &[
        [0.58, 14.85, 0.38],
        [0.66, 15.20, 0.30],
        [0.62, 15.55, 0.15],
    ]);
    set.bilateral(Artery, 3, 0.04, "R. Middle Cerebral Artery", None, &[
        [0.32, 15.15, 0.02],
        [0.50, 15.30, 0.08],
        [0.62, 15.45, 0.02],
        [0.66, 15.60, -0.10],
    ]);
    set.bilateral(Artery, 3, 0.035, "R. Anterior Cerebral Artery", None, &[
        [0.32, 15.15, 0.02],
        [0.12, 15.35, 0.25],
        [0.06, 15.65, 0.20],
        [0.05, 15.85, -0.05],
    ]);
    set.bilateral(Artery, 2, 0.06, "R. Vertebral Artery", None, &[
        [0.55, 12.95, -0.05],
        [0.35, 13.50, -0.20],
        [0.25, 14.20, -0.25],
        [0.10, 14.80, -0.18],
    ]);
    set.artery(2, 0.07, "Basilar Artery", &[
        [0.00, 14.80, -0.16],
        [0.00, 15.00, -0.10],
        [0.00, 15.15, -0.04],
    ]);
}

fn upper_limb(set: &mut SegmentSet) {
    set.bilateral(Artery, 1, 0.12, "R. Subclavian Artery", None, &[
        [0.32, 12.85, 0.10],
        [0.75, 13.00, 0.05],
        [1.20, 12.90, 0.00],
        [1.60, 12.60, -0.05],
    ]);
    set.bilateral(Artery, 2, 0.09, "R. Axillary Artery", None, &[
        [1.60, 12.60, -0.05],
        [1.85, 12.20, 0.00],
        [2.00, 11.70, 0.05],
    ]);
    set.bilateral(Artery, 2, 0.08, "R. Brachial Artery", None, &[
        [2.00, 11.70, 0.05],
        [2.15, 11.00, 0.12],
        [2.28, 10.40, 0.18],
    ]);
    set.bilateral(Artery, 3, 0.05, "R. Deep Brachial Artery", None, &[
        [2.02, 11.55, 0.04],
        [2.20, 11.10, -0.12],
        [2.32, 10.60, -0.10],
    ]);
    set.bilateral(Artery, 3, 0.05, "R. Radial Artery", None, &[
        [2.28, 10.40, 0.18],
        [2.42, 9.70, 0.28],
        [2.58, 9.00, 0.32],
        [2.72, 8.40, 0.30],
    ]);
    set.bilateral(Artery, 3, 0.045, "R. Ulnar Artery", None, &[
        [2.28, 10.40, 0.18],
        [2.30, 9.70, 0.10],
        [2.40, 9.00, 0.05],
        [2.55, 8.40, 0.05],
    ]);
    set.bilateral(Artery, 3, 0.035, "R. Palmar Arch", None, &[
        [2.72, 8.40, 0.30],
        [2.80, 8.10, 0.22],
        [2.75, 7.95, 0.10],
        [2.55, 8.40, 0.05],
    ]);
}

fn visceral(set: &mut SegmentSet) {
    set.artery(2, 0.07, "Celiac Trunk", &[
        [-0.06, 9.70, -0.30],
        [0.00, 9.75, 0.00],
        [0.10, 9.80, 0.20],
    ]);
    set.artery(3, 0.05, "Splenic Artery", &[
        [0.10, 9.80, 0.20],
        [-0.30, 9.90, 0.12],
        [-0.70, 10.00, -0.05],
    ]);
    set.artery(3, 0.05, "Common Hepatic Artery", &[
        [0.10, 9.80, 0.20],
        [0.40, 9.95, 0.18],
        [0.65, 10.10, 0.10],
    ]);
    set.artery(2, 0.08, "Superior Mesenteric Artery", &[
        [-0.05, 9.50, -0.28],
        [0.00, 9.30, 0.05],
        [0.05, 8.90, 0.25],
        [0.02, 8.50, 0.30],
    ]);
    set.artery(3, 0.05, "Inferior Mesenteric Artery", &[
        [-0.03, 8.90, -0.25],
        [-0.20, 8.70, 0.00],
        [-0.35, 8.40, 0.10],
    ]);
    set.bilateral(Artery, 2, 0.07, "R. Renal Artery", Some("L. Renal Artery"), &[
        [0.05, 9.30, -0.30],
        [0.30, 9.35, -0.35],
        [0.60, 9.40, -0.40],
    ]);
}

fn lower_limb(set: &mut SegmentSet) {
    set.bilateral(Artery, 1, 0.15, "R. Common Iliac Artery", None, &[
        [0.00, 8.50, -0.20],
        [0.30, 8.20, -0.15],
        [0.55, 7.90, -0.05],
    ]);
    set.bilateral(Artery, 1, 0.13, "R. External Iliac Artery", None, &[
        [0.55, 7.90, -0.05],
        [0.70, 7.50, 0.10],
        [0.78, 7.10, 0.20],
    ]);
    set.bilateral(Artery, 2, 0.08, "R. Internal Iliac Artery", None, &[
        [0.55, 7.90, -0.05],
        [0.45, 7.50, -0.30],
        [0.35, 7.20, -0.40],
    ]);
    set.bilateral(Artery, 1, 0.12, "R. Femoral Artery", None, &[
        [0.78, 7.10, 0.20],
        [0.80, 6.40, 0.22],
        [0.78, 5.60, 0.12],
        [0.75, 4.90, -0.05],
    ]);
    set.bilateral(Artery, 2, 0.08, "R. Deep Femoral Artery", None, &[
        [0.80, 6.60, 0.20],
        [0.92, 6.10, 0.00],
        [0.95, 5.50, -0.12],
    ]);
    set.bilateral(Artery, 2, 0.08, "R. Popliteal Artery", None, &[
        [0.75, 4.90, -0.05],
        [0.74, 4.50, -0.20],
        [0.72, 4.10, -0.15],
    ]);
    set.bilateral(Artery, 3, 0.05, "R. Anterior Tibial Artery", None, &[
        [0.72, 4.10, -0.15],
        [0.78, 3.20, 0.05],
        [0.76, 2.00, 0.08],
        [0.72, 1.00, 0.15],
    ]);
    set.bilateral(Artery, 3, 0.05, "R. Posterior Tibial Artery", None, &[
        [0.72, 4.10, -0.15],
        [0.68, 3.00, -0.22],
        [0.66, 1.80, -0.20],
        [0.65, 0.90, -0.12],
    ]);
    set.bilateral(Artery, 3, 0.04, "R. Fibular Artery", None, &[
        [0.71, 3.70, -0.18],
        [0.82, 2.70, -0.20],
        [0.84, 1.60, -0.15],
    ]);
    set.bilateral(Artery, 3, 0.035, "R. Dorsalis Pedis Artery", None, &[
        [0.72, 1.00, 0.15],
        [0.74, 0.50, 0.50],
        [0.76, 0.30, 0.90],
    ]);
    set.bilateral(Artery, 3, 0.03, "R. Plantar Arch", None, &[
        [0.65, 0.90, -0.12],
        [0.66, 0.25, 0.20],
        [0.72, 0.15, 0.60],
        [0.76, 0.30, 0.90],
    ]);
}
