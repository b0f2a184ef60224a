// src/export/pdf.rs

use crate::core::timeline::TimelineView;
use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::Importance;
use crate::ui::messages::info;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Bezier handle length for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

fn importance_rgb(importance: Importance) -> (f32, f32, f32) {
    match importance {
        Importance::High => (0.86, 0.15, 0.15),
        Importance::Medium => (0.96, 0.62, 0.04),
        Importance::Low => (0.06, 0.73, 0.51),
    }
}

/// Helvetica is a WinAnsi font: keep printable ASCII, replace the rest.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c as u8 } else { b'?' })
        .collect()
}

/// Single-page PDF drawing of a serpentine timeline. The page has the size
/// of the layout canvas; canvas y (downwards) is flipped to PDF y (upwards).
pub struct TimelinePdf {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_id: Ref,
    content_id: Ref,
    font_id: Ref,

    page_w: f32,
    page_h: f32,

    font_size: f32,
    title_font_size: f32,
}

impl TimelinePdf {
    pub fn new(page_w: f32, page_h: f32) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let page_id = Ref::new(4);
        let content_id = Ref::new(5);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_id,
            content_id,
            font_id,
            page_w,
            page_h,
            font_size: 10.0,
            title_font_size: 16.0,
        }
    }

    fn flip(&self, y: f64) -> f32 {
        self.page_h - y as f32
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        // Rough centring: Helvetica averages ~0.5em per glyph.
        let width = text.chars().count() as f32 * size * 0.5;
        let bytes = pdf_text(text);

        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x - width / 2.0, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_circle(content: &mut Content, cx: f32, cy: f32, r: f32) {
        let k = r * KAPPA;
        content.move_to(cx + r, cy);
        content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        content.close_path();
    }

    pub fn draw_timeline(&mut self, view: &TimelineView, title: &str) {
        let mut content = Content::new();

        self.draw_text(
            &mut content,
            self.page_w / 2.0,
            self.page_h - 40.0,
            self.title_font_size,
            title,
        );

        // Connecting path
        let path = view.layout().path();
        if let Some((first, rest)) = path.split_first() {
            content.save_state();
            content.set_stroke_rgb(0.66, 0.64, 0.62);
            content.set_line_width(3.0);
            content.move_to(first.x as f32, self.flip(first.y));
            for p in rest {
                content.line_to(p.x as f32, self.flip(p.y));
            }
            content.stroke();
            content.restore_state();
        }

        // Nodes and captions
        for (i, group) in view.groups().iter().enumerate() {
            let Some(rect) = view.node_rect(i) else {
                continue;
            };
            let c = rect.center();
            let r = (rect.width / 2.0) as f32;
            let (red, green, blue) = importance_rgb(group.importance());

            content.save_state();
            content.set_fill_rgb(red, green, blue);
            Self::draw_circle(&mut content, c.x as f32, self.flip(c.y), r);
            content.fill_nonzero();
            content.restore_state();

            if group.is_multi_event() {
                self.draw_text(
                    &mut content,
                    c.x as f32,
                    self.flip(c.y) - 4.0,
                    self.title_font_size,
                    &group.len().to_string(),
                );
            }

            let caption = if group.is_multi_event() {
                format!("{} events", group.len())
            } else {
                group.events[0].title.clone()
            };

            self.draw_text(
                &mut content,
                c.x as f32,
                self.flip(rect.bottom()) - 16.0,
                self.font_size + 1.0,
                &group.date,
            );
            self.draw_text(
                &mut content,
                c.x as f32,
                self.flip(rect.bottom()) - 30.0,
                self.font_size,
                &caption,
            );
        }

        {
            let mut page = self.pdf.page(self.page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
                .contents(self.content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(self.content_id, &content.finish());
    }

    pub fn save(mut self, path: &Path) -> io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        {
            let mut pages = self.pdf.pages(self.pages_id);
            pages.count(1);
            pages.kids([self.page_id]);
        }

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}

pub(crate) fn export_pdf(view: &TimelineView, title: &str, path: &Path) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let layout = view.layout();
    let mut pdf = TimelinePdf::new(layout.container_width as f32, layout.canvas_height as f32);
    pdf.draw_timeline(view, title);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
