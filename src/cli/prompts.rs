//! Interactive prompts used by the menu mode.

use crate::cli::{CommonArgs, ReverseArgs, SearchArgs};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use photon_client::error::Result;
use std::fmt::Display;
use std::str::FromStr;

/// Asks for the query text and the optional forward search filters.
pub fn prompt_search() -> Result<SearchArgs> {
    let text: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Search text")
        .interact_text()?;

    let limit = prompt_optional("Limit (empty for none)")?;
    let lat = prompt_optional("Bias latitude (empty for none)")?;
    let lon = prompt_optional("Bias longitude (empty for none)")?;
    if lat.is_some() != lon.is_some() {
        println!("{}", "Latitude and longitude are only used together; ignoring the bias.".yellow());
    }
    let lang = prompt_optional("Language [en, de, fr, it] (empty for default)")?;
    let bbox = prompt_optional("Bounding box minLon,minLat,maxLon,maxLat (empty for none)")?;
    let layer = prompt_optional("Layer (empty for any)")?;

    Ok(SearchArgs {
        text,
        limit,
        lat,
        lon,
        lang,
        bbox,
        layer,
        common: prompt_common()?,
    })
}

/// Asks for the coordinates and the optional reverse search filters.
pub fn prompt_reverse() -> Result<ReverseArgs> {
    let theme = ColorfulTheme::default();
    let lat: f64 = Input::with_theme(&theme)
        .with_prompt("Latitude")
        .interact_text()?;
    let lon: f64 = Input::with_theme(&theme)
        .with_prompt("Longitude")
        .interact_text()?;

    Ok(ReverseArgs {
        lat,
        lon,
        radius: prompt_optional("Radius in meters (empty for none)")?,
        limit: prompt_optional("Limit (empty for none)")?,
        lang: prompt_optional("Language [en, de, fr, it] (empty for default)")?,
        layer: prompt_optional("Layer (empty for any)")?,
        common: prompt_common()?,
    })
}

fn prompt_common() -> Result<CommonArgs> {
    let insecure = !Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Use https?")
        .default(true)
        .interact()?;

    Ok(CommonArgs {
        insecure,
        json: false,
    })
}

/// Prompts until the answer is empty or parses as `T`.
fn prompt_optional<T>(prompt: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    loop {
        let raw: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        match parse_optional(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => println!("{} {}", "Invalid value:".red(), e),
        }
    }
}

/// Empty (or blank) input means "not set".
fn parse_optional<T>(raw: &str) -> std::result::Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_client::models::{BoundingBox, Language, Layer};

    #[test]
    fn test_parse_optional_empty() {
        assert_eq!(parse_optional::<u32>("").unwrap(), None);
        assert_eq!(parse_optional::<f64>("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_optional_values() {
        assert_eq!(parse_optional::<u32>(" 7 ").unwrap(), Some(7));
        assert_eq!(parse_optional::<Language>("it").unwrap(), Some(Language::It));
        assert_eq!(parse_optional::<Layer>("county").unwrap(), Some(Layer::County));
        assert_eq!(
            parse_optional::<BoundingBox>("1,2,3,4").unwrap(),
            Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn test_parse_optional_invalid() {
        assert!(parse_optional::<u32>("-1").is_err());
        let err = parse_optional::<Language>("xx").unwrap_err();
        assert!(err.contains("Unsupported language"));
    }
}
