//! Scale-profile templates
//!
//! Krumhansl-Kessler tonal profiles for major and natural minor, plus
//! dorian and mixolydian variants derived by re-weighting the single
//! characteristic degree (raised 6th, lowered 7th). Index 0 is the root;
//! each step is one semitone up.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes
//! in Perceived Tonal Organization in a Spatial Representation of Musical
//! Keys. *Psychological Review*, 89(4), 334-368.

use crate::analysis::result::ScaleType;

/// Major (Ionian) profile
pub const MAJOR: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Natural minor (Aeolian) profile
pub const MINOR: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Dorian profile: minor with the 6th-degree weights swapped so the raised
/// 6th outweighs the flat 6th
pub const DORIAN: [f32; 12] = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 2.69, 3.98, 3.34, 3.17,
];

/// Mixolydian profile: major with the 7th-degree weights swapped so the
/// flat 7th outweighs the leading tone
pub const MIXOLYDIAN: [f32; 12] = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.88, 2.29,
];

/// All searched templates with their scale labels
pub const TEMPLATES: [(ScaleType, &[f32; 12]); 4] = [
    (ScaleType::Major, &MAJOR),
    (ScaleType::Minor, &MINOR),
    (ScaleType::Dorian, &DORIAN),
    (ScaleType::Mixolydian, &MIXOLYDIAN),
];
