//! Plain-text rendering of recipes and about sections

use crate::about::AboutDraft;
use crate::models::{image_url, AboutRecord, Resep};
use scraper::{ElementRef, Html, Node};
use std::fmt::Write;

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Tags that start and end a line of their own
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6",
    "blockquote", "section", "article", "table", "tr", "pre",
];

/// Accumulates inline text until a block boundary closes the line
#[derive(Default)]
struct LineCollector {
    lines: Vec<String>,
    current: String,
}

impl LineCollector {
    fn flush(&mut self) {
        let line = normalize(&self.current);
        self.current.clear();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.current.push_str(text),
                Node::Element(el) => {
                    let Some(child_element) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if el.name() == "br" {
                        self.flush();
                    } else if BLOCK_TAGS.contains(&el.name()) {
                        self.flush();
                        self.walk(child_element);
                        self.flush();
                    } else {
                        self.walk(child_element);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Extract display lines from an HTML fragment.
///
/// Every block element (paragraph, list item, heading, ...) becomes one
/// line, in document order; `<br>` also breaks a line. Text without any
/// markup is split on its own line breaks.
pub fn html_to_lines(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();

    let has_markup = root.children().any(|child| child.value().is_element());
    if !has_markup {
        return root
            .text()
            .flat_map(|text| text.lines())
            .map(normalize)
            .filter(|line| !line.is_empty())
            .collect();
    }

    let mut collector = LineCollector::default();
    collector.walk(root);
    collector.flush();
    collector.lines
}

/// Recipe detail as terminal text
pub fn render_resep(resep: &Resep, image_base_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", resep.judul);
    let _ = writeln!(out, "{}", "=".repeat(resep.judul.chars().count().max(1)));
    let _ = writeln!(out, "Time: {}  |  Servings: {}", or_dash(&resep.waktu), or_dash(&resep.porsi));

    let _ = writeln!(out, "\nIngredients");
    for line in html_to_lines(&resep.bahan) {
        let _ = writeln!(out, "  - {}", line);
    }

    let _ = writeln!(out, "\nSteps");
    for (index, line) in html_to_lines(&resep.cara_membuat).iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, line);
    }

    match resep.gambar.as_deref().filter(|g| !g.is_empty()) {
        Some(gambar) => {
            let _ = writeln!(out, "\nImage: {}", image_url(image_base_url, gambar));
        }
        None => {
            let _ = writeln!(out, "\nImage: none");
        }
    }

    out
}

/// One line per section for listings
pub fn render_about_row(record: &AboutRecord) -> String {
    format!("{:>4}  {:<6} {}", record.id, record.layout().as_str(), record.judul)
}

/// About section as terminal text
pub fn render_about(draft: &AboutDraft, image_base_url: &str) -> String {
    let mut out = String::new();

    match draft.id {
        Some(id) => {
            let _ = writeln!(out, "#{} {}", id, draft.judul);
        }
        None => {
            let _ = writeln!(out, "{}", draft.judul);
        }
    }
    let _ = writeln!(out, "Layout: {} ({})", draft.layout, draft.layout.describe());
    if let Some(preview) = draft.image_preview(image_base_url) {
        let _ = writeln!(out, "Image: {}", preview);
    }
    let _ = writeln!(out, "\n{}", draft.deskripsi);

    out
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
