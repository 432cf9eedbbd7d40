//! Plain-text rendering of [`Screen`].

use std::fmt::Write;

use assistant_core::view::{Body, ChipGroup, EMPTY_CHIPS, HostCard, Screen, WeatherCard};

pub fn to_text(screen: &Screen) -> String {
    let mut out = String::new();

    if screen.busy {
        out.push_str("Working…\n\n");
    }

    if let Some(alert) = &screen.alert {
        let _ = writeln!(out, "! {}\n  {}\n", alert.title, alert.message);
    }

    match &screen.body {
        Body::Empty(hint) => {
            let _ = writeln!(out, "{hint}");
        }
        Body::Cards { weather, host } => {
            weather_text(&mut out, weather);
            out.push('\n');
            host_text(&mut out, host);
        }
    }

    out
}

fn weather_text(out: &mut String, card: &WeatherCard) {
    match &card.subtitle {
        Some(subtitle) => {
            let _ = writeln!(out, "== {} · {} ==", card.title, subtitle);
        }
        None => {
            let _ = writeln!(out, "== {} ==", card.title);
        }
    }

    if !card.loaded {
        out.push_str("  No forecast loaded.\n");
        return;
    }

    let width = card.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in &card.rows {
        let _ = writeln!(out, "  {:<width$}  {}", row.label, row.value);
    }
}

fn host_text(out: &mut String, card: &HostCard) {
    let _ = writeln!(out, "== {} · {} ==", card.name, card.tagline);

    if card.sections.is_empty() {
        let _ = writeln!(out, "  {EMPTY_CHIPS}");
        return;
    }

    match &card.summary {
        Some(summary) => {
            let _ = writeln!(out, "  {} {}", card.lead, summary);
        }
        None => {
            let _ = writeln!(out, "  {}", card.lead);
        }
    }

    for section in &card.sections {
        let _ = writeln!(out, "\n  {}", section.title);
        for group in &section.groups {
            let _ = writeln!(out, "    {}: {}", group.label, chips(group));
        }
    }
}

fn chips(group: &ChipGroup) -> String {
    if group.items.is_empty() {
        EMPTY_CHIPS.to_string()
    } else {
        group.items.iter().map(|item| format!("[{item}]")).collect::<Vec<_>>().join(" ")
    }
}
