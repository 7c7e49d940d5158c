//! Render — turns a `CvRecord` into a template-styled document.
//!
//! The output is a flat list of blocks in reading order. Export lays them
//! out on pages; the terminal preview prints them as plain text.
//! Record fields are never re-cased or abbreviated here.

pub mod templates;

pub use templates::{style_for, BlockKind, FontFace, Template, TextStyle};

use crate::models::CvRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Text(String),
    /// Items that may share a line but are never split internally.
    Inline {
        items: Vec<String>,
        separator: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: BlockContent,
    pub style: TextStyle,
}

impl Block {
    pub fn text(&self) -> String {
        match &self.content {
            BlockContent::Text(text) => text.clone(),
            BlockContent::Inline { items, separator } => items.join(separator),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub template: Template,
    pub title: String,
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    /// Terminal preview of the document.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            match block.kind {
                BlockKind::SectionHeading => {
                    out.push('\n');
                    out.push_str(&block.text());
                }
                BlockKind::Bullet => {
                    out.push_str("  - ");
                    out.push_str(&block.text());
                }
                _ => out.push_str(&block.text()),
            }
            out.push('\n');
        }
        out
    }
}

struct DocumentBuilder {
    template: Template,
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    fn push_text(&mut self, kind: BlockKind, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            return;
        }
        self.blocks.push(Block {
            kind,
            content: BlockContent::Text(text),
            style: style_for(self.template, kind),
        });
    }

    fn push_inline(&mut self, kind: BlockKind, items: Vec<String>, separator: &'static str) {
        let items: Vec<String> = items
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .collect();
        if items.is_empty() {
            return;
        }
        self.blocks.push(Block {
            kind,
            content: BlockContent::Inline { items, separator },
            style: style_for(self.template, kind),
        });
    }

    fn heading(&mut self, title: &str) {
        self.push_text(BlockKind::SectionHeading, title.to_uppercase());
    }
}

pub fn render_document(record: &CvRecord, template: Template) -> RenderedDocument {
    let info = &record.personal_info;
    let mut doc = DocumentBuilder {
        template,
        blocks: Vec::new(),
    };

    // Header
    doc.push_text(BlockKind::Name, info.full_name.clone());

    let mut contact = vec![info.email.clone(), info.phone.clone(), info.location.clone()];
    contact.extend(info.linkedin.iter().cloned());
    contact.extend(info.website.iter().cloned());
    match template.contact_separator() {
        Some(separator) => doc.push_inline(BlockKind::Contact, contact, separator),
        None => {
            for item in contact {
                doc.push_text(BlockKind::Contact, item);
            }
        }
    }

    doc.heading("Professional Summary");
    doc.push_text(BlockKind::Body, info.summary.clone());

    if !record.experiences.is_empty() {
        doc.heading("Experience");
        for exp in &record.experiences {
            doc.push_text(BlockKind::EntryTitle, exp.position.clone());
            let dates = match (exp.start_date.trim(), exp.end_date.trim()) {
                ("", "") => String::new(),
                (start, "") => start.to_string(),
                ("", end) => end.to_string(),
                (start, end) => format!("{start} - {end}"),
            };
            doc.push_inline(
                BlockKind::EntryMeta,
                vec![exp.company.clone(), exp.location.clone(), dates],
                "  |  ",
            );
            for line in &exp.description {
                doc.push_text(BlockKind::Bullet, line.clone());
            }
        }
    }

    if !record.projects.is_empty() {
        doc.heading("Key Projects");
        for project in &record.projects {
            doc.push_text(BlockKind::EntryTitle, project.name.clone());
            doc.push_text(BlockKind::Body, project.description.clone());
            if let Some(link) = &project.link {
                doc.push_text(BlockKind::Link, link.clone());
            }
        }
    }

    if !record.skills.is_empty() {
        doc.heading("Expertise");
        doc.push_inline(BlockKind::Tags, record.skills.clone(), template.tag_separator());
    }

    if !record.education.is_empty() {
        doc.heading("Education");
        for edu in &record.education {
            doc.push_text(BlockKind::EntryTitle, edu.degree.clone());
            doc.push_inline(
                BlockKind::EntryMeta,
                vec![
                    edu.field.clone(),
                    edu.school.clone(),
                    edu.graduation_date.clone(),
                ],
                "  |  ",
            );
        }
    }

    if !record.languages.is_empty() {
        doc.heading("Languages");
        doc.push_inline(
            BlockKind::Tags,
            record.languages.clone(),
            template.tag_separator(),
        );
    }

    RenderedDocument {
        template,
        title: format!("CV - {}", info.full_name.trim()),
        blocks: doc.blocks,
    }
}
