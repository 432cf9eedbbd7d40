//! Pure mapping from a [`Snapshot`] to cards. No I/O, no formatting beyond values.

use crate::{
    model::{Forecast, Payload, Recommendation, RequestStatus},
    orchestrator::Snapshot,
};

pub const EMPTY_HINT: &str = "Enter a city and date, then ask for a recommendation.";
pub const ALERT_TITLE: &str = "Couldn't fetch results";
pub const EMPTY_CHIPS: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// A submission is in flight.
    pub busy: bool,
    pub alert: Option<Alert>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty(&'static str),
    Cards { weather: WeatherCard, host: HostCard },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub title: &'static str,
    pub subtitle: Option<String>,
    /// Empty when no forecast is loaded.
    pub rows: Vec<Row>,
    pub loaded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipGroup {
    pub label: &'static str,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub groups: Vec<ChipGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCard {
    pub name: &'static str,
    pub tagline: &'static str,
    pub lead: String,
    pub summary: Option<String>,
    /// Empty when no recommendation is loaded.
    pub sections: Vec<Section>,
}

pub fn render(snapshot: &Snapshot) -> Screen {
    let busy = snapshot.status.is_loading();

    if let RequestStatus::Error(message) = &snapshot.status {
        return Screen {
            busy,
            alert: Some(Alert { title: ALERT_TITLE, message: message.clone() }),
            body: Body::Empty(EMPTY_HINT),
        };
    }

    let forecast = snapshot.forecast.as_ref();
    let recommendation = snapshot.recommendation.as_ref();
    let body = if forecast.is_none() && recommendation.is_none() {
        Body::Empty(EMPTY_HINT)
    } else {
        Body::Cards { weather: weather_card(forecast), host: host_card(forecast, recommendation) }
    };

    Screen { busy, alert: None, body }
}

fn weather_card(forecast: Option<&Payload<Forecast>>) -> WeatherCard {
    let Some(payload) = forecast else {
        return WeatherCard { title: "Weather", subtitle: None, rows: Vec::new(), loaded: false };
    };
    let Some(f) = payload.parsed() else {
        return WeatherCard { title: "Weather", subtitle: None, rows: Vec::new(), loaded: true };
    };

    let candidates = [
        ("Date", Some(f.date.to_string())),
        ("Condition", Some(f.description.clone())),
        ("Temp", Some(format!("{} °C", f.temperature_c))),
        ("Feels like", f.feels_like_c.map(|t| format!("{t} °C"))),
        ("Humidity", f.humidity_percent.map(|h| format!("{h}%"))),
        ("Wind", f.wind_speed_mps.map(|w| format!("{w} m/s"))),
        ("Precip chance", f.precipitation_probability.map(|p| format!("{}%", (p * 100.0).round()))),
    ];

    let rows = candidates
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|value| Row { label, value }))
        .collect();

    WeatherCard { title: "Weather", subtitle: Some(format!("{} ({})", f.city, f.country)), rows, loaded: true }
}

fn host_card(
    forecast: Option<&Payload<Forecast>>,
    recommendation: Option<&Payload<Recommendation>>,
) -> HostCard {
    let lead = match forecast.and_then(Payload::parsed) {
        Some(f) => format!("{} — {}:", f.city, f.date),
        None => "Today:".to_string(),
    };

    let mut card = HostCard {
        name: "Skye",
        tagline: "Your friendly forecast guide",
        lead,
        summary: None,
        sections: Vec::new(),
    };

    let Some(payload) = recommendation else {
        return card;
    };
    let unreadable = Recommendation::default();
    let r = payload.parsed().unwrap_or(&unreadable);

    let group = |label: &'static str, items: &[String]| ChipGroup { label, items: items.to_vec() };
    card.summary = Some(r.summary.clone()).filter(|s| !s.is_empty());
    card.sections = vec![
        Section {
            title: "How to dress",
            groups: vec![
                group("Top", &r.outfit.top),
                group("Bottom", &r.outfit.bottom),
                group("Shoes", &r.outfit.shoes),
                group("Outerwear", &r.outfit.outerwear),
                group("Accessories / bring", &r.outfit.accessories),
            ],
        },
        Section {
            title: "Best activities",
            groups: vec![group("Outdoor", &r.activities.outdoor), group("Indoor", &r.activities.indoor)],
        },
        Section {
            title: "Warnings & tips",
            groups: vec![group("Warnings", &r.warnings), group("Tips", &r.tips)],
        },
    ];

    card
}
