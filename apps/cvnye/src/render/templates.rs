//! Per-template typography. Every visual difference between the four
//! templates lives in this file; `render_document` only decides content.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The four visual templates offered in review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Dark header band, sans-serif, indigo accents.
    #[default]
    Modern,
    /// Centered serif header with rule, traditional.
    Classic,
    /// Single column, light sans-serif, no header chrome.
    Minimal,
    /// Wide-spaced serif on cream, pipe-separated contact line.
    Luxury,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Modern,
        Template::Classic,
        Template::Minimal,
        Template::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Minimal => "minimal",
            Template::Luxury => "luxury",
        }
    }

    /// Separator between contact items on the header line.
    /// `None` puts each item on its own line.
    pub fn contact_separator(&self) -> Option<&'static str> {
        match self {
            Template::Modern => Some("   "),
            Template::Classic => Some("  -  "),
            Template::Minimal => None,
            Template::Luxury => Some("  |  "),
        }
    }

    pub fn tag_separator(&self) -> &'static str {
        match self {
            Template::Luxury | Template::Classic => "  /  ",
            Template::Modern | Template::Minimal => "   ",
        }
    }

    pub fn centered_header(&self) -> bool {
        matches!(self, Template::Classic | Template::Luxury)
    }

    fn sans(&self) -> bool {
        matches!(self, Template::Modern | Template::Minimal)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The embedded faces the export writes with (DejaVu Sans and Serif).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Sans,
    SansBold,
    Serif,
    SerifBold,
    SerifItalic,
}

impl FontFace {
    pub fn is_serif(&self) -> bool {
        matches!(
            self,
            FontFace::Serif | FontFace::SerifBold | FontFace::SerifItalic
        )
    }
}

/// What a block is, independent of how a template draws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Name,
    Contact,
    SectionHeading,
    EntryTitle,
    EntryMeta,
    Body,
    Bullet,
    Tags,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub indent_mm: f32,
    /// Vertical gap above the block.
    pub space_before_mm: f32,
    pub centered: bool,
}

pub fn style_for(template: Template, kind: BlockKind) -> TextStyle {
    let sans = template.sans();
    let regular = if sans { FontFace::Sans } else { FontFace::Serif };
    let bold = if sans { FontFace::SansBold } else { FontFace::SerifBold };

    let base = TextStyle {
        face: regular,
        size_pt: 10.0,
        indent_mm: 0.0,
        space_before_mm: 0.0,
        centered: false,
    };

    match kind {
        BlockKind::Name => TextStyle {
            face: match template {
                Template::Modern => FontFace::SansBold,
                Template::Classic => FontFace::SerifBold,
                Template::Minimal => FontFace::Sans,
                Template::Luxury => FontFace::Serif,
            },
            size_pt: match template {
                Template::Classic => 22.0,
                Template::Minimal => 28.0,
                Template::Modern | Template::Luxury => 26.0,
            },
            centered: template.centered_header(),
            ..base
        },
        BlockKind::Contact => TextStyle {
            face: if template == Template::Classic {
                FontFace::SerifItalic
            } else {
                regular
            },
            size_pt: if template == Template::Minimal { 8.0 } else { 9.0 },
            space_before_mm: 1.5,
            centered: template.centered_header(),
            ..base
        },
        BlockKind::SectionHeading => TextStyle {
            face: bold,
            size_pt: if template == Template::Luxury { 11.0 } else { 9.5 },
            space_before_mm: 7.0,
            ..base
        },
        BlockKind::EntryTitle => TextStyle {
            face: bold,
            size_pt: if template == Template::Luxury { 12.0 } else { 10.5 },
            space_before_mm: 3.5,
            ..base
        },
        BlockKind::EntryMeta => TextStyle {
            size_pt: 8.5,
            space_before_mm: 0.8,
            ..base
        },
        BlockKind::Body => TextStyle {
            face: if template == Template::Luxury {
                FontFace::SerifItalic
            } else {
                regular
            },
            size_pt: if template == Template::Luxury { 11.0 } else { 10.0 },
            space_before_mm: 1.5,
            ..base
        },
        BlockKind::Bullet => TextStyle {
            size_pt: 9.5,
            indent_mm: 4.0,
            space_before_mm: 1.0,
            ..base
        },
        BlockKind::Tags => TextStyle {
            face: bold,
            size_pt: 8.5,
            space_before_mm: 1.5,
            ..base
        },
        BlockKind::Link => TextStyle {
            size_pt: 8.0,
            space_before_mm: 0.8,
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serif_templates_use_serif_faces() {
        for template in [Template::Classic, Template::Luxury] {
            assert!(style_for(template, BlockKind::Body).face.is_serif());
            assert!(style_for(template, BlockKind::SectionHeading).face.is_serif());
        }
        for template in [Template::Modern, Template::Minimal] {
            assert!(!style_for(template, BlockKind::Body).face.is_serif());
        }
    }

    #[test]
    fn test_only_minimal_stacks_contact_items() {
        for template in Template::ALL {
            assert_eq!(
                template.contact_separator().is_none(),
                template == Template::Minimal
            );
        }
    }

    #[test]
    fn test_name_is_the_largest_text() {
        for template in Template::ALL {
            let name = style_for(template, BlockKind::Name).size_pt;
            for kind in [BlockKind::SectionHeading, BlockKind::EntryTitle, BlockKind::Body] {
                assert!(name > style_for(template, kind).size_pt);
            }
        }
    }

    #[test]
    fn test_template_names_round_trip_through_clap() {
        for template in Template::ALL {
            let parsed = Template::from_str(template.as_str(), true).unwrap();
            assert_eq!(parsed, template);
        }
    }
}
