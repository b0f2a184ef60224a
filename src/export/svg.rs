// src/export/svg.rs

use crate::core::icons::IconSet;
use crate::core::timeline::TimelineView;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::models::Importance;
use crate::ui::messages::info;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

pub(crate) fn importance_fill(importance: Importance) -> &'static str {
    match importance {
        Importance::High => "#dc2626",
        Importance::Medium => "#f59e0b",
        Importance::Low => "#10b981",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the serpentine timeline as a standalone SVG document.
pub fn render_svg(view: &TimelineView, icons: &IconSet, title: &str) -> String {
    let layout = view.layout();
    let width = layout.container_width;
    let height = layout.canvas_height;

    // `write!` into a String cannot fail.
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="0" y="0" width="{width:.0}" height="{height:.0}" fill="#fafaf9"/>"##
    );
    let _ = writeln!(
        svg,
        r##"  <text x="{:.1}" y="40" text-anchor="middle" font-family="sans-serif" font-size="22" fill="#1c1917">{}</text>"##,
        width / 2.0,
        escape(title)
    );

    if !layout.is_empty() {
        let _ = writeln!(
            svg,
            r##"  <path d="{}" fill="none" stroke="#a8a29e" stroke-width="4" stroke-linejoin="round" stroke-dasharray="10 6"/>"##,
            layout.svg_path_data()
        );
    }

    for (i, group) in view.groups().iter().enumerate() {
        let Some(rect) = view.node_rect(i) else {
            continue;
        };
        let c = rect.center();
        let r = rect.width / 2.0;

        let _ = writeln!(svg, r#"  <g class="node" data-index="{i}">"#);
        let _ = writeln!(
            svg,
            r##"    <circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="#ffffff" stroke-width="3"/>"##,
            c.x,
            c.y,
            r,
            importance_fill(group.importance())
        );
        let _ = writeln!(
            svg,
            r#"    <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" font-size="{:.0}">{}</text>"#,
            c.x,
            c.y,
            r * 0.8,
            escape(icons.for_group(group))
        );

        if group.is_multi_event() {
            let _ = writeln!(
                svg,
                r##"    <circle cx="{:.1}" cy="{:.1}" r="12" fill="#1c1917"/>"##,
                c.x + r * 0.75,
                c.y - r * 0.75
            );
            let _ = writeln!(
                svg,
                r##"    <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="12" fill="#ffffff">{}</text>"##,
                c.x + r * 0.75,
                c.y - r * 0.75,
                group.len()
            );
        }

        let caption = if group.is_multi_event() {
            format!("{} events", group.len())
        } else {
            group.events[0].title.clone()
        };

        let _ = writeln!(
            svg,
            r##"    <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="14" font-weight="bold" fill="#1c1917">{}</text>"##,
            c.x,
            rect.bottom() + 20.0,
            escape(&group.date)
        );
        let _ = writeln!(
            svg,
            r##"    <text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="12" fill="#57534e">{}</text>"##,
            c.x,
            rect.bottom() + 38.0,
            escape(&caption)
        );
        let _ = writeln!(svg, "  </g>");
    }

    svg.push_str("</svg>\n");
    svg
}

pub(crate) fn export_svg(
    view: &TimelineView,
    icons: &IconSet,
    title: &str,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to SVG: {}", path.display()));

    fs::write(path, render_svg(view, icons, title))?;

    notify_export_success("SVG", path);
    Ok(())
}
