use crate::models::HeadingLevel;

use super::kinds::{
    Bullet, Callout, Checklist, CodeFence, Divider, Embed, EmbedRef, Heading, Ordered, Quote,
    TableRow, Toggle,
};

/// A recognised block-opening line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    Heading { level: HeadingLevel, text: &'a str },
    Checklist { checked: bool, text: &'a str },
    Bullet { text: &'a str },
    Ordered { text: &'a str },
    Toggle { collapsed: bool, text: &'a str },
    Quote { text: &'a str },
    Divider,
    CodeFence { language: &'a str },
    Embed(EmbedRef<'a>),
    Callout { variant: &'a str, title: &'a str },
    TableRow,
}

/// Matches the indent-stripped remainder of a line against the block
/// openers. First match wins, so the order here is the precedence order.
pub fn try_open(remainder: &str) -> Option<BlockOpen<'_>> {
    if let Some((level, text)) = Heading::open(remainder) {
        return Some(BlockOpen::Heading { level, text });
    }
    if let Some((checked, text)) = Checklist::open(remainder) {
        return Some(BlockOpen::Checklist { checked, text });
    }
    if let Some(text) = Bullet::open(remainder) {
        return Some(BlockOpen::Bullet { text });
    }
    if let Some(text) = Ordered::open(remainder) {
        return Some(BlockOpen::Ordered { text });
    }
    if let Some((collapsed, text)) = Toggle::open(remainder) {
        return Some(BlockOpen::Toggle { collapsed, text });
    }
    if let Some(text) = Quote::strip(remainder) {
        return Some(BlockOpen::Quote { text });
    }
    if Divider::matches(remainder) {
        return Some(BlockOpen::Divider);
    }
    if let Some(language) = CodeFence::open(remainder) {
        return Some(BlockOpen::CodeFence { language });
    }
    if let Some(embed) = Embed::open(remainder) {
        return Some(BlockOpen::Embed(embed));
    }
    if let Some((variant, title)) = Callout::open(remainder) {
        return Some(BlockOpen::Callout { variant, title });
    }
    if TableRow::matches(remainder) {
        return Some(BlockOpen::TableRow);
    }
    None
}
