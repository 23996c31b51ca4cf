// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the fieldseek CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `FIELDSEEK_THEME` first, then `COLORFGBG`, then defaults to dark. Colors are
//! dropped entirely when `NO_COLOR` is set or stdout is not a terminal, so
//! piped output stays plain.
//!
//! # Theme detection order
//!
//! 1. `FIELDSEEK_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. Default to dark theme

use std::sync::OnceLock;

use fieldseek::{Engine, ObjectSearchResult, Record};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

const TEXT_WIDTH: usize = 42;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("FIELDSEEK_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; backgrounds 7 and up (except 8) are light
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221); // #c678dd
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164); // #a626a4
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Truncate to `max_chars` characters, ending in `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    if use_colors() {
        println!("{}│{}{}{}{}│{}", border, RESET, content, " ".repeat(pad), border, RESET);
    } else {
        println!("│{}{}│", content, " ".repeat(pad));
    }
}

fn labeled_rule(left: char, right: char, label: &str) {
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    if use_colors() {
        let border = GRAY();
        println!(
            "{}{}{}{}{}{}{}{}",
            border,
            left,
            RESET,
            label_part,
            border,
            "─".repeat(remaining),
            right,
            RESET
        );
    } else {
        println!("{}{}{}{}", left, label_part, "─".repeat(remaining), right);
    }
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    labeled_rule('┌', '┐', label);
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    labeled_rule('├', '┤', label);
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    if use_colors() {
        println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), RESET);
    } else {
        println!("└{}┘", "─".repeat(BOX_WIDTH));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded match percentage (green=close, yellow=partial, red=loose)
pub fn percentage_colored(pct: f64) -> String {
    let text = format!("{:>6.1}%", pct);
    if pct >= 90.0 {
        themed(GREEN, &[BOLD], &text)
    } else if pct >= 70.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

/// Color-coded score value
pub fn score_value(score: f64) -> String {
    let text = format!("{:>10.3}", score);
    if score >= 100.0 {
        themed(BRIGHT_GREEN, &[], &text)
    } else if score >= 1.0 {
        themed(GREEN, &[], &text)
    } else {
        themed(GRAY, &[], &text)
    }
}

/// Matched field name
pub fn property_label(name: &str) -> String {
    themed(MAGENTA, &[], name)
}

/// One result line: rank, score, percentage, field, matched text.
pub fn result_row(rank: usize, result: &ObjectSearchResult<'_, Record>) -> String {
    format!(
        " {:>3}  {} {}  {}  {}",
        rank,
        score_value(result.score),
        percentage_colored(result.match_percentage),
        pad_right(&property_label(result.matched_property), 10),
        truncate_text(result.matched_text, TEXT_WIDTH),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// VIEWS
// ═══════════════════════════════════════════════════════════════════════════

/// Ranked results table for `search`.
pub fn print_results(
    query: &str,
    results: &[ObjectSearchResult<'_, Record>],
    total: usize,
    elapsed_ms: f64,
) {
    section_top(&format!("RESULTS \"{}\"", truncate_text(query, 40)));
    row(&themed(
        GRAY,
        &[DIM],
        &format!(
            " {} of {} records matched in {:.3} ms",
            results.len(),
            total,
            elapsed_ms
        ),
    ));
    if results.is_empty() {
        row(" no matches");
        section_bot();
        return;
    }
    section_mid("RANKED");
    row(&themed(
        GRAY,
        &[],
        "   #       SCORE   MATCH  FIELD       TEXT",
    ));
    for (i, result) in results.iter().enumerate() {
        row(&result_row(i + 1, result));
    }
    section_bot();
}

/// Field table with indexed value counts for `inspect`.
pub fn print_inspect(engine: &Engine<Record>) {
    section_top("RECORDS");
    row(&format!(" {} records", engine.len()));
    section_mid("FIELDS");
    row(&themed(
        GRAY,
        &[],
        " FIELD           PRIORITY  THRESHOLD  EXACT  INDEXED",
    ));
    for (ordinal, field) in engine.schema().iter().enumerate() {
        let config = field.config();
        row(&format!(
            " {}{:>8}{:>10}%  {:>5}  {}",
            pad_right(&property_label(field.name()), 16),
            config.priority,
            config.match_threshold,
            if config.exact_match_only { "yes" } else { "no" },
            pad_left(&engine.indexed_value_count(ordinal).to_string(), 7),
        ));
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
