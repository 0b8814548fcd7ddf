//! Themes command implementation

use anyhow::{Context, Result};
use showreel::{Config, ThemeRegistry};

/// Run the themes command
pub fn run_themes(config: &Config, json: bool) -> Result<()> {
    let registry = config.registry()?;
    if json {
        println!("{}", themes_json(&registry)?);
    } else {
        print!("{}", themes_table(&registry, &config.default_theme));
    }
    Ok(())
}

/// Every theme record as pretty JSON
pub fn themes_json(registry: &ThemeRegistry) -> Result<String> {
    serde_json::to_string_pretty(registry.themes()).context("Failed to serialize themes")
}

/// One line per theme, default marked with `*`
pub fn themes_table(registry: &ThemeRegistry, default: &str) -> String {
    let width = registry.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    registry
        .themes()
        .iter()
        .map(|theme| {
            let marker = if theme.key.eq_ignore_ascii_case(default) { '*' } else { ' ' };
            format!(
                "{marker} {} {:<width$}  {:<14} {}\n",
                theme.icon, theme.key, theme.display_name, theme.description
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_marks_default() {
        let registry = ThemeRegistry::builtin();
        let table = themes_table(&registry, "crimson");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), registry.len());
        assert!(lines[1].starts_with("* ✦ crimson"));
        assert!(lines[0].starts_with("  ☾ midnight"));
    }

    #[test]
    fn test_json_lists_every_key() {
        let registry = ThemeRegistry::builtin();
        let json = themes_json(&registry).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, registry.keys().collect::<Vec<_>>());
        assert_eq!(value[0]["display_name"], "Midnight");
    }
}
