use chrono::{DateTime, Local};
use dashboard_core::{CardState, CityCard, ForecastView};

pub fn print_cards(cards: &[CityCard]) {
    for card in cards {
        println!("{}", format_card(card));
    }
}

pub fn format_card(card: &CityCard) -> String {
    match &card.state {
        CardState::Loading => format!("{}: loading...", card.city),
        CardState::Failed(msg) => format!("{}: {}", card.city, msg),
        CardState::Ready(w) => format!(
            "{}, {}: {}°C, {} ({})\n  humidity {}%, wind {} m/s",
            w.city, w.country, w.temperature, w.condition, w.description, w.humidity_pct, w.wind_speed,
        ),
    }
}

pub fn print_forecast(forecast: &ForecastView) {
    println!("{}, {}", forecast.city.name, forecast.city.country);

    for entry in &forecast.list {
        let when = DateTime::from_timestamp(entry.dt, 0)
            .map(|t| t.with_timezone(&Local).format("%a %d %b %H:%M").to_string())
            .unwrap_or_else(|| entry.dt_txt.clone());

        let condition = entry
            .weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("unknown");

        println!(
            "  {when}  {:>5.1}°C  (min {:.1}, max {:.1})  {condition}",
            entry.main.temp, entry.main.temp_min, entry.main.temp_max,
        );
    }
}
