//! Static glyph-width tables for the DejaVu faces export embeds.
//!
//! Widths are the fonts' `hmtx` advance widths scaled to 1/1000 em for ASCII
//! 0x20..=0x7E. Index = (char as usize) - 32. DejaVu Serif Italic shares the
//! regular serif advances. Anything outside ASCII uses the face's mean
//! advance over Latin-1 and Latin Extended-A letters; wrapping only needs to
//! be close, not exact, because every line keeps a small right-hand slack.

use crate::render::FontFace;

const PT_TO_MM: f32 = 25.4 / 72.0;

#[rustfmt::skip]
const SANS: [u16; 95] = [
    318, 401, 460, 838, 636, 950, 780, 275, 390, 390, 500, 838, 318, 361, 318, 337,
    636, 636, 636, 636, 636, 636, 636, 636, 636, 636,
    337, 337, 838, 838, 838, 531, 1000,
    684, 686, 698, 770, 632, 575, 775, 752, 295, 295, 656, 557, 863,
    748, 787, 603, 787, 695, 635, 611, 732, 684, 989, 685, 611, 685,
    390, 337, 390, 838, 500, 500,
    613, 635, 550, 635, 615, 352, 635, 634, 278, 278, 579, 278, 974,
    634, 612, 635, 635, 411, 521, 392, 634, 592, 818, 592, 592, 525,
    636, 337, 636, 838,
];

#[rustfmt::skip]
const SANS_BOLD: [u16; 95] = [
    348, 456, 521, 838, 696, 1002, 872, 306, 457, 457, 523, 838, 380, 415, 380, 365,
    696, 696, 696, 696, 696, 696, 696, 696, 696, 696,
    400, 400, 838, 838, 838, 580, 1000,
    774, 762, 734, 830, 683, 683, 821, 837, 372, 372, 775, 637, 995,
    837, 850, 733, 850, 770, 720, 682, 812, 774, 1103, 771, 724, 725,
    457, 365, 457, 838, 500, 500,
    675, 716, 593, 716, 678, 435, 716, 712, 343, 343, 665, 343, 1042,
    712, 687, 716, 716, 493, 595, 478, 712, 652, 924, 645, 652, 582,
    712, 365, 712, 838,
];

#[rustfmt::skip]
const SERIF: [u16; 95] = [
    318, 402, 460, 838, 636, 950, 890, 275, 390, 390, 500, 838, 318, 338, 318, 337,
    636, 636, 636, 636, 636, 636, 636, 636, 636, 636,
    337, 337, 838, 838, 838, 536, 1000,
    722, 735, 765, 802, 730, 694, 799, 872, 395, 401, 747, 664, 1024,
    875, 820, 673, 820, 753, 685, 667, 843, 722, 1028, 712, 660, 695,
    390, 337, 390, 838, 500, 500,
    596, 640, 560, 640, 592, 370, 640, 644, 320, 310, 606, 320, 948,
    644, 602, 640, 640, 478, 513, 402, 644, 565, 856, 564, 565, 527,
    636, 337, 636, 838,
];

#[rustfmt::skip]
const SERIF_BOLD: [u16; 95] = [
    348, 439, 521, 838, 696, 950, 903, 306, 473, 473, 523, 838, 348, 415, 348, 365,
    696, 696, 696, 696, 696, 696, 696, 696, 696, 696,
    369, 369, 838, 838, 838, 586, 1000,
    776, 845, 796, 867, 762, 710, 854, 945, 468, 473, 869, 703, 1107,
    914, 871, 752, 871, 831, 722, 744, 872, 776, 1123, 776, 714, 730,
    473, 365, 473, 838, 500, 500,
    648, 699, 609, 699, 636, 430, 699, 727, 380, 362, 693, 380, 1058,
    727, 667, 699, 699, 527, 563, 462, 727, 581, 861, 596, 581, 568,
    643, 364, 643, 838,
];

fn table(face: FontFace) -> (&'static [u16; 95], u16) {
    match face {
        FontFace::Sans => (&SANS, 609),
        FontFace::SansBold => (&SANS_BOLD, 683),
        FontFace::Serif | FontFace::SerifItalic => (&SERIF, 646),
        FontFace::SerifBold => (&SERIF_BOLD, 701),
    }
}

fn char_units(c: char, face: FontFace) -> f32 {
    let (widths, average) = table(face);
    let code = c as usize;
    let units = if (32..=126).contains(&code) {
        widths[code - 32]
    } else {
        average
    };
    units as f32
}

/// Rendered width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(text: &str, face: FontFace, size_pt: f32) -> f32 {
    let units: f32 = text.chars().map(|c| char_units(c, face)).sum();
    units / 1000.0 * size_pt * PT_TO_MM
}

/// Baseline-to-baseline distance for a line set at `size_pt`.
pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_cover_printable_ascii() {
        // Spot checks against the fonts' hmtx tables.
        assert_eq!(SANS['M' as usize - 32], 863);
        assert_eq!(SANS['i' as usize - 32], 278);
        assert_eq!(SERIF['W' as usize - 32], 1028);
        assert_eq!(SERIF_BOLD['a' as usize - 32], 648);
        assert_eq!(SANS_BOLD[0], 348);
    }

    #[test]
    fn test_empty_string_has_zero_width() {
        assert_eq!(text_width_mm("", FontFace::Sans, 10.0), 0.0);
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width_mm("Backend Engineer", FontFace::Sans, 10.0);
        let large = text_width_mm("Backend Engineer", FontFace::Sans, 20.0);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        for (regular, bold) in [
            (FontFace::Sans, FontFace::SansBold),
            (FontFace::Serif, FontFace::SerifBold),
        ] {
            assert!(text_width_mm("Experience", bold, 10.0) > text_width_mm("Experience", regular, 10.0));
        }
    }

    #[test]
    fn test_italic_shares_serif_advances() {
        let text = "shipping payment services for five years";
        assert_eq!(
            text_width_mm(text, FontFace::SerifItalic, 10.0),
            text_width_mm(text, FontFace::Serif, 10.0)
        );
    }

    #[test]
    fn test_non_ascii_uses_face_average() {
        let width = text_width_mm("Ł", FontFace::Sans, 10.0);
        let expected = 609.0 / 1000.0 * 10.0 * PT_TO_MM;
        assert!((width - expected).abs() < 1e-4);
    }
}
