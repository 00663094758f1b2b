use crate::config::{INSTRUCTIONS_PREVIEW_CHARS, MAX_PREP_TIME_MIN};
use crate::error::ValidationError;
use crate::models::PrepTimeRange;
use once_cell::sync::Lazy;
use regex::Regex;

// Step markers such as "1. " or "12."
static STEP_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s*").unwrap());

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &'static str,
) -> Result<T, ValidationError>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field_name));
    }

    let val = trimmed
        .parse::<T>()
        .map_err(|_| ValidationError::NotANumber(field_name))?;
    if let Some(min_val) = min {
        if val < min_val {
            return Err(ValidationError::BelowMinimum {
                field: field_name,
                min: min_val.to_string(),
            });
        }
    }
    if let Some(max_val) = max {
        if val > max_val {
            return Err(ValidationError::AboveMaximum {
                field: field_name,
                max: max_val.to_string(),
            });
        }
    }
    Ok(val)
}

/// Parse the quantity field of the ingredient form.
pub fn parse_quantity(input: &str) -> Result<f64, ValidationError> {
    let qty: f64 = validate_numeric_input(input, None, None, "Quantity")?;
    if !qty.is_finite() || qty <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(qty)
}

/// Parse an optional prep-time bound. Blank input means no bound.
pub fn parse_prep_bound(input: &str, field_name: &'static str) -> Result<Option<u32>, ValidationError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    validate_numeric_input(input, Some(0), Some(MAX_PREP_TIME_MIN), field_name).map(Some)
}

/// Build a prep-time range from the two filter fields.
pub fn parse_prep_time_range(min_text: &str, max_text: &str) -> Result<PrepTimeRange, ValidationError> {
    let min = parse_prep_bound(min_text, "Minimum prep time")?;
    let max = parse_prep_bound(max_text, "Maximum prep time")?;
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            return Err(ValidationError::InvertedPrepTimeRange);
        }
    }
    Ok(PrepTimeRange { min, max })
}

/// Format a prep time in minutes as "45 min", "1 hr", "2 hrs 5 min".
pub fn format_prep_time(minutes: Option<u32>) -> String {
    let minutes = match minutes {
        Some(m) if m > 0 => m,
        _ => return "N/A".to_string(),
    };
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let rest = minutes % 60;
    let hr = if hours > 1 { "hrs" } else { "hr" };
    if rest == 0 {
        format!("{} {}", hours, hr)
    } else {
        format!("{} {} {} min", hours, hr, rest)
    }
}

/// Shorten recipe instructions for card previews.
pub fn preview_instructions(text: &str) -> String {
    if text.chars().count() > INSTRUCTIONS_PREVIEW_CHARS {
        let cut: String = text.chars().take(INSTRUCTIONS_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Split recipe instructions into steps.
///
/// Numbered steps are split on their numbers. Text with at most one numbered
/// step is split into sentences instead.
pub fn instruction_steps(text: &str) -> Vec<String> {
    let numbered: Vec<String> = STEP_NUMBER_REGEX
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if numbered.len() > 1 {
        return numbered;
    }
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Render a quantity without a trailing ".0" for whole numbers.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

/// "1 ingredient", "3 ingredients".
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_must_be_positive_number() {
        assert_eq!(parse_quantity("2.5"), Ok(2.5));
        assert_eq!(parse_quantity("  3 "), Ok(3.0));
        assert_eq!(parse_quantity("0"), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(parse_quantity("-1"), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(parse_quantity(""), Err(ValidationError::EmptyField("Quantity")));
        assert_eq!(parse_quantity("lots"), Err(ValidationError::NotANumber("Quantity")));
        assert_eq!(parse_quantity("NaN"), Err(ValidationError::NonPositiveQuantity));
    }

    #[test]
    fn prep_range_accepts_blank_bounds() {
        assert_eq!(parse_prep_time_range("", " "), Ok(PrepTimeRange::default()));
        assert_eq!(
            parse_prep_time_range("10", ""),
            Ok(PrepTimeRange { min: Some(10), max: None })
        );
    }

    #[test]
    fn prep_range_rejects_inverted_and_out_of_bounds() {
        assert_eq!(
            parse_prep_time_range("40", "20"),
            Err(ValidationError::InvertedPrepTimeRange)
        );
        assert!(matches!(
            parse_prep_time_range("-5", ""),
            Err(ValidationError::NotANumber(_))
        ));
        assert!(matches!(
            parse_prep_time_range("", "99999"),
            Err(ValidationError::AboveMaximum { .. })
        ));
    }

    #[test]
    fn prep_time_formatting() {
        assert_eq!(format_prep_time(None), "N/A");
        assert_eq!(format_prep_time(Some(0)), "N/A");
        assert_eq!(format_prep_time(Some(45)), "45 min");
        assert_eq!(format_prep_time(Some(60)), "1 hr");
        assert_eq!(format_prep_time(Some(120)), "2 hrs");
        assert_eq!(format_prep_time(Some(125)), "2 hrs 5 min");
        assert_eq!(format_prep_time(Some(75)), "1 hr 15 min");
    }

    #[test]
    fn long_instructions_are_truncated() {
        let long = "a".repeat(200);
        let preview = preview_instructions(&long);
        assert_eq!(preview.len(), 153);
        assert!(preview.ends_with("..."));
        assert_eq!(preview_instructions("Boil water."), "Boil water.");
    }

    #[test]
    fn numbered_instructions_split_on_step_numbers() {
        assert_eq!(
            instruction_steps("1. Boil water. 2. Add pasta. 3.Drain"),
            vec!["Boil water.", "Add pasta.", "Drain"]
        );
    }

    #[test]
    fn unnumbered_instructions_split_into_sentences() {
        assert_eq!(
            instruction_steps("Boil water. Add pasta.  Serve hot."),
            vec!["Boil water", "Add pasta", "Serve hot"]
        );
        // a lone step number is not enough to count as numbered
        assert_eq!(instruction_steps("1. Mix well. Bake"), vec!["1", "Mix well", "Bake"]);
    }

    #[test]
    fn empty_instructions_have_no_steps() {
        assert!(instruction_steps("").is_empty());
        assert!(instruction_steps("  . ").is_empty());
    }

    #[test]
    fn quantities_render_compactly() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(pluralize(1, "recipe"), "1 recipe");
        assert_eq!(pluralize(0, "recipe"), "0 recipes");
    }
}
