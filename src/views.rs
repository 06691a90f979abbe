//! Server-rendered HTML pages

use crate::models::{ForecastDay, HistoryEntry};

/// Data shown on the results page
#[derive(Debug, Default)]
pub struct ResultsView<'a> {
    pub location: &'a str,
    pub country: &'a str,
    pub forecast: &'a [ForecastDay],
    pub message: Option<&'a str>,
}

/// Escape text for use in HTML bodies and quoted attribute values
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, body_style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body{}>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body_style,
        body
    )
}

#[must_use]
pub fn home_page(background_color: &str, error: Option<&str>) -> String {
    let mut body = String::from("<h1>Weather Forecast</h1>\n");
    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(error)));
    }
    body.push_str(
        "<form action=\"/results\" method=\"post\">\n\
         <input type=\"text\" name=\"location\" placeholder=\"Enter a city\">\n\
         <button type=\"submit\">Get forecast</button>\n\
         </form>\n\
         <a href=\"/history\">Search history</a>",
    );

    let style = format!(" style=\"background-color: {};\"", escape_html(background_color));
    layout("Weather Forecast", &style, &body)
}

#[must_use]
pub fn results_page(view: &ResultsView<'_>) -> String {
    let mut body = format!(
        "<h1>Weather for {}, {}</h1>\n",
        escape_html(view.location),
        escape_html(view.country)
    );
    if let Some(message) = view.message {
        body.push_str(&format!("<p class=\"message\">{}</p>\n", escape_html(message)));
    }

    body.push_str(
        "<table>\n<tr><th>Date</th><th>Day</th><th>Night</th><th>Humidity</th></tr>\n",
    );
    for day in view.forecast {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}&deg;C</td><td>{}&deg;C</td><td>{}%</td></tr>\n",
            escape_html(&day.date),
            day.day_temp,
            day.night_temp,
            day.humidity
        ));
    }
    body.push_str("</table>\n");

    let forecast_json = serde_json::to_string(view.forecast).unwrap_or_else(|_| "[]".into());
    body.push_str(&format!(
        "<form action=\"/save_weather_data\" method=\"post\">\n\
         <input type=\"hidden\" name=\"location\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"country\" value=\"{}\">\n\
         <input type=\"hidden\" name=\"forecast\" value=\"{}\">\n\
         <button type=\"submit\">Save forecast</button>\n\
         </form>\n\
         <a href=\"/\">New search</a>",
        escape_html(view.location),
        escape_html(view.country),
        escape_html(&forecast_json)
    ));

    layout("Weather Results", "", &body)
}

#[must_use]
pub fn history_page(entries: &[HistoryEntry]) -> String {
    let mut body = String::from("<h1>Search History</h1>\n<ul>\n");
    for entry in entries {
        body.push_str(&format!(
            "<li>{} ({}) at {}</li>\n",
            escape_html(&entry.location),
            escape_html(&entry.country),
            escape_html(&entry.timestamp)
        ));
    }
    body.push_str("</ul>\n<a href=\"/\">Back</a>");
    layout("Search History", "", &body)
}
