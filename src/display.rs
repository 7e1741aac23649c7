// ABOUTME: Short text messages for the wearable display built from reports
// ABOUTME: One block per evaluation cycle and one for the daily outfit suggestion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::report::{EnvironmentReport, OutfitSuggestion};
use std::fmt::Write;

/// Text block summarizing one evaluation cycle
#[must_use]
pub fn format_environment_report(report: &EnvironmentReport) -> String {
    let mut text = String::with_capacity(192);
    // Writing to a String cannot fail
    let _ = writeln!(
        text,
        "Temperature: {:.1} °C | Humidity: {:.0} %\n\
         CO2: {:.0} ppm | Air Quality: {}",
        report.reading.temperature, report.reading.humidity, report.reading.co2, report.iaq.label,
    );
    match report.steady_state {
        Some(steady) => {
            let _ = writeln!(
                text,
                "PMV: {:.2}     | PPD: {:.1} %\n\
                 Clothing Predicted: {:.2} clo",
                steady.pmv, steady.ppd, steady.clo,
            );
        }
        None => text.push_str("PMV: n/a     | PPD: n/a\nClothing Predicted: n/a\n"),
    }
    let _ = write!(
        text,
        "Adaptive Comfort Temperature: {:.1} °C",
        report.adaptive.comfort_mid
    );
    if !report.adaptive.acceptable {
        let _ = write!(
            text,
            "\nOutside comfort range {:.1}-{:.1} °C",
            report.adaptive.comfort_low, report.adaptive.comfort_high
        );
    }
    text
}

/// Text block with today's outdoor averages and outfit suggestion
#[must_use]
pub fn format_outfit_suggestion(suggestion: &OutfitSuggestion) -> String {
    format!(
        "Today's average outdoor temperature: {:.1} °C\n\
         Today's average outdoor humidity: {:.1} %\n\
         Suggested indoor outfits: {}\n\
         Suggested outdoor outfits: {}",
        suggestion.outdoor_temperature,
        suggestion.outdoor_humidity,
        suggestion.indoor_label,
        suggestion.outdoor_label,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ieq_intelligence::PopulationType;

    #[test]
    fn test_outfit_message_layout() {
        let suggestion = OutfitSuggestion {
            population: PopulationType::A,
            indoor_label: "Trousers, long-sleeve shirt",
            outdoor_label: "Parka",
            predicted_clo: 0.64,
            indoor_clo: 0.61,
            outdoor_clo: 0.7,
            extra_clo: 0.7,
            iterations: 14,
            outdoor_pmv: -0.18,
            outdoor_temperature: 3.04,
            outdoor_humidity: 81.34,
        };
        let text = format_outfit_suggestion(&suggestion);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Today's average outdoor temperature: 3.0 °C");
        assert_eq!(lines[1], "Today's average outdoor humidity: 81.3 %");
        assert_eq!(lines[3], "Suggested outdoor outfits: Parka");
    }
}
