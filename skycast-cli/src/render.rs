//! Terminal rendering of a weather report: summary cards, per-metric trend
//! charts and a map link. Pure formatting, no return value flows back into
//! the core.

use chrono::{DateTime, FixedOffset};
use skycast_core::{CurrentConditions, ForecastRecord, Location, WeatherReport};

const CHART_WIDTH: usize = 30;

/// Which sections of the report to print. All default on.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Requested number of forecast periods; clipped to what is available.
    pub count: usize,
    pub show_map: bool,
    pub show_humidity: bool,
    pub show_pressure: bool,
    pub show_temperature: bool,
}

pub fn render_report(report: &WeatherReport, opts: &DisplayOptions) -> String {
    let mut out = String::new();

    if let Some(current) = &report.current {
        out.push_str(&current_card(&report.location.city, current));
        out.push('\n');
    }

    let shown = &report.forecast[..opts.count.min(report.forecast.len())];

    out.push_str(&format!(
        "Weather overview for {}: next {} periods\n\n",
        report.location.city,
        shown.len()
    ));
    out.push_str(&forecast_cards(shown));

    if opts.show_temperature {
        out.push('\n');
        out.push_str(&trend_chart("Temperature trend", "C", shown, |r| r.temperature_c));
    }
    if opts.show_humidity {
        out.push('\n');
        out.push_str(&trend_chart("Humidity trend", "%", shown, |r| f64::from(r.humidity_pct)));
    }
    if opts.show_pressure {
        out.push('\n');
        out.push_str(&trend_chart("Pressure trend", "hPa", shown, |r| f64::from(r.pressure_hpa)));
    }

    if opts.show_map {
        out.push('\n');
        out.push_str(&map_marker(&report.location));
    }

    out
}

/// The current-conditions summary card.
pub fn current_card(city: &str, current: &CurrentConditions) -> String {
    let sunrise = local_time(current.sunrise_unix, current.timezone_offset_secs);
    let sunset = local_time(current.sunset_unix, current.timezone_offset_secs);

    format!(
        "Current weather in {city}\n\
         {icon} {desc}\n\
         Temperature: {temp:.1}C (Feels like {feels:.1}C)\n\
         Humidity:    {humidity}%\n\
         Pressure:    {pressure} hPa\n\
         Wind:        {wind:.1} m/s\n\
         Visibility:  {vis:.1} km\n\
         Sunrise:     {sunrise}\n\
         Sunset:      {sunset}\n",
        icon = weather_icon(&current.description),
        desc = capitalize(&current.description),
        temp = current.temperature_c,
        feels = current.feels_like_c,
        humidity = current.humidity_pct,
        pressure = current.pressure_hpa,
        wind = current.wind_speed_mps,
        vis = current.visibility_km,
    )
}

/// One numbered card per forecast period.
pub fn forecast_cards(records: &[ForecastRecord]) -> String {
    let mut out = String::new();

    for (i, rec) in records.iter().enumerate() {
        out.push_str(&format!(
            "{n}. Time: {time}\n   {icon} {desc}\n   Temp: {temp:.1}C | Humidity: {hum}% | Pressure: {pres} hPa\n",
            n = i + 1,
            time = rec.timestamp,
            icon = weather_icon(&rec.description),
            desc = rec.description,
            temp = rec.temperature_c,
            hum = rec.humidity_pct,
            pres = rec.pressure_hpa,
        ));
    }

    out
}

/// Horizontal bar chart, one row per record, all records present.
pub fn trend_chart(
    title: &str,
    unit: &str,
    records: &[ForecastRecord],
    metric: impl Fn(&ForecastRecord) -> f64,
) -> String {
    let values: Vec<f64> = records.iter().map(&metric).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut out = format!("{title}\n");
    for (rec, value) in records.iter().zip(&values) {
        out.push_str(&format!(
            "  {time:<20} {value:>7.1} {unit:<3} {bar}\n",
            time = rec.timestamp,
            bar = bar(*value, min, max),
        ));
    }

    out
}

/// A marker for the resolved coordinates, as an OpenStreetMap link.
pub fn map_marker(location: &Location) -> String {
    format!(
        "Map: https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=12/{lat}/{lon}\n",
        lat = location.latitude,
        lon = location.longitude,
    )
}

/// Coarse icon from the description text. Case-insensitive substring match,
/// first match wins; anything unmatched falls through to rain.
pub fn weather_icon(description: &str) -> &'static str {
    let desc = description.to_lowercase();

    if desc.contains("clear") {
        "\u{2600}\u{fe0f}"
    } else if desc.contains("cloud") {
        "\u{2601}\u{fe0f}"
    } else {
        "\u{1f327}\u{fe0f}"
    }
}

fn bar(value: f64, min: f64, max: f64) -> String {
    let span = max - min;
    let frac = if span.abs() < f64::EPSILON { 1.0 } else { (value - min) / span };
    let filled = (frac * CHART_WIDTH as f64).round() as usize;

    // A zero-length bar would make the row look like missing data.
    "\u{2588}".repeat(filled.clamp(1, CHART_WIDTH))
}

/// Epoch seconds shifted to the location's own clock.
fn local_time(unix: i64, offset_secs: i32) -> String {
    match (FixedOffset::east_opt(offset_secs), DateTime::from_timestamp(unix, 0)) {
        (Some(tz), Some(dt)) => dt.with_timezone(&tz).format("%I:%M %p").to_string(),
        _ => "--:--".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
