//! # Rendering
//!
//! Turns `CmdResult` contents into terminal text. Layout math (widths,
//! truncation, padding) is unicode-aware; colors come from `colored`, which
//! turns itself off when stdout is not a terminal.

use chrono::{DateTime, Utc};
use colored::Colorize;
use prodcat::api::{CatalogStatus, CmdMessage, DisplayProduct, MessageLevel};
use prodcat::error::Result;
use prodcat::model::Product;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const PREVIEW_CHARS: usize = 60;

fn colored_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.dimmed().to_string(),
        MessageLevel::Success => message.content.green().to_string(),
        MessageLevel::Warning => message.content.yellow().to_string(),
    }
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", colored_message(message));
    }
}

/// Like `print_messages`, for commands whose stdout carries data.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", colored_message(message));
    }
}

/// One line per product: position, name, a description preview and age.
pub fn render_product_list(products: &[DisplayProduct]) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::new();
    for dp in products {
        let idx_str = format!("{}. ", dp.index);
        let idx_width = idx_str.width();

        let preview: String = dp
            .product
            .description
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();

        let fixed_width = 4 + idx_width + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let name_display = truncate_to_width(&dp.product.name, available);
        let mut used = name_display.width();
        let preview_display = if used + 1 < available && !preview.is_empty() {
            let shown = truncate_to_width(&preview, available - used - 1);
            used += 1 + shown.width();
            format!(" {}", shown.dimmed())
        } else {
            String::new()
        };
        let padding = " ".repeat(available.saturating_sub(used));

        let time = format_time_ago(dp.product.updated_at.or(dp.product.created_at));

        out.push_str(&format!(
            "    {}{}{}{}  {}\n",
            idx_str.yellow(),
            name_display.bold(),
            preview_display,
            padding,
            time.dimmed()
        ));
    }
    out
}

/// Every field of each product, separated by rules.
pub fn render_full_products(products: &[DisplayProduct]) -> String {
    let mut out = String::new();
    for (i, dp) in products.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        let p = &dp.product;
        out.push_str(&format!(
            "{} {}\n",
            format!("{}.", dp.index).yellow(),
            p.name.bold()
        ));
        out.push_str("--------------------------------\n");
        out.push_str(&format!("{}\n\n", p.description));
        out.push_str(&format!("{}\n{}\n\n", "Usage:".bold(), p.usage_instructions));
        out.push_str(&format!("{} {}\n", "Link:".bold(), p.external_link.underline()));
        out.push_str(&format!("{} {}\n", "Id:".dimmed(), p.id.dimmed()));
        if let Some(created) = p.created_at {
            out.push_str(&format!(
                "{}\n",
                format!("Created {}", created.format("%Y-%m-%d %H:%M UTC")).dimmed()
            ));
        }
        if let Some(updated) = p.updated_at {
            out.push_str(&format!(
                "{}\n",
                format!("Updated {}", updated.format("%Y-%m-%d %H:%M UTC")).dimmed()
            ));
        }
    }
    out
}

pub fn render_status(status: &CatalogStatus) -> String {
    let capacity = if status.can_add_more {
        format!("{} slots free", status.max_products - status.count).green()
    } else {
        "full".red()
    };
    format!(
        "Products: {} / {} ({})\nBackend:  {}\n",
        status.count, status.max_products, capacity, status.backend
    )
}

pub fn render_json(products: &[DisplayProduct]) -> Result<String> {
    let plain: Vec<&Product> = products.iter().map(|dp| &dp.product).collect();
    let mut text = serde_json::to_string_pretty(&plain)?;
    text.push('\n');
    Ok(text)
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    if lines.is_empty() {
        return format!("{}\n", empty_message);
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: Option<DateTime<Utc>>) -> String {
    let Some(timestamp) = timestamp else {
        return " ".repeat(TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcat::model::ProductFormData;

    fn display(index: usize, name: &str, description: &str) -> DisplayProduct {
        let form = ProductFormData::new(name, description, "Use it", "https://e.com");
        DisplayProduct {
            index,
            product: Product::from_form(format!("id-{}", index), &form, Utc::now()),
        }
    }

    #[test]
    fn empty_list_has_placeholder() {
        colored::control::set_override(false);
        assert_eq!(render_product_list(&[]), "No products found.\n");
    }

    #[test]
    fn list_lines_have_fixed_width() {
        colored::control::set_override(false);
        let out = render_product_list(&[
            display(1, "Lamp", "Warm light"),
            display(2, &"Shelf ".repeat(30), "Holds books"),
        ]);

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    1. Lamp Warm light"));
        assert_eq!(lines[0].width(), LINE_WIDTH);
        assert_eq!(lines[1].width(), LINE_WIDTH);
        assert!(lines[1].contains('…'));
    }

    #[test]
    fn full_view_shows_every_field() {
        colored::control::set_override(false);
        let out = render_full_products(&[display(3, "Lamp", "Warm light")]);
        assert!(out.contains("3. Lamp"));
        assert!(out.contains("Warm light"));
        assert!(out.contains("Use it"));
        assert!(out.contains("Link: https://e.com"));
        assert!(out.contains("Id: id-3"));
    }

    #[test]
    fn status_shows_free_slots_or_full() {
        colored::control::set_override(false);
        let mut status = CatalogStatus {
            count: 1,
            max_products: 3,
            can_add_more: true,
            backend: "memory",
        };
        assert!(render_status(&status).contains("1 / 3 (2 slots free)"));

        status.count = 3;
        status.can_add_more = false;
        assert!(render_status(&status).contains("(full)"));
    }

    #[test]
    fn json_output_is_a_plain_product_array() {
        let out = render_json(&[display(1, "Lamp", "Warm light")]).unwrap();
        let parsed: Vec<Product> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0].name, "Lamp");
    }

    #[test]
    fn truncation_respects_wide_characters() {
        let out = truncate_to_width("日本語のテキスト", 7);
        assert!(out.width() <= 7);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn missing_timestamp_renders_blank() {
        assert_eq!(format_time_ago(None), " ".repeat(TIME_WIDTH));
    }
}
