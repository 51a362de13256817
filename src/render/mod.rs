//! Project record sequences into the card view-models the page mounts.
//! Pure: same input sequence, same cards, same order.

pub mod format;

use serde::Serialize;

use crate::data::resolve::{resolve_fields, resolve_note};
use crate::data::search::SourceRecord;
use format::format_inline;

/// Output-only card shape handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardViewModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footnote: Option<String>,
}

/// One card per record that resolves to at least a name or a description;
/// anything else is skipped. Order equals input order.
pub fn render_cards(records: &[SourceRecord], show_category: bool) -> Vec<CardViewModel> {
    records
        .iter()
        .filter_map(|record| render_card(record, show_category))
        .collect()
}

fn render_card(record: &SourceRecord, show_category: bool) -> Option<CardViewModel> {
    let resolved = resolve_fields(&record.fields);
    if resolved.name.is_none() && resolved.description.is_none() {
        return None;
    }
    Some(CardViewModel {
        title: resolved.name.map(str::to_string),
        body_html: format_inline(resolved.description.unwrap_or("")),
        category_tag: if show_category {
            record.category.clone()
        } else {
            None
        },
        footnote: resolve_note(&record.fields).map(str::to_string),
    })
}

/// Containment filter over cards that are already on screen. Operates on
/// the visible text (markup stripped), not on the underlying records, and
/// never reloads anything. A blank query keeps every card.
pub fn local_filter<'a>(cards: &'a [CardViewModel], query: &str) -> Vec<&'a CardViewModel> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return cards.iter().collect();
    }
    cards
        .iter()
        .filter(|card| visible_text(card).to_lowercase().contains(&query))
        .collect()
}

/// Text a reader actually sees on a card: title, markup-stripped body,
/// category tag, footnote.
pub fn visible_text(card: &CardViewModel) -> String {
    let mut text = String::new();
    if let Some(title) = &card.title {
        text.push_str(title);
        text.push('\n');
    }
    text.push_str(&strip_tags(&card.body_html));
    if let Some(tag) = &card.category_tag {
        text.push('\n');
        text.push_str(tag);
    }
    if let Some(footnote) = &card.footnote {
        text.push('\n');
        text.push_str(footnote);
    }
    text
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}
