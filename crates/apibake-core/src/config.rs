use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration, loaded from `apibake-config.json` (or a YAML equivalent).
///
/// Every level is `#[serde(default)]`, so a partial file only overrides the values it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BakeConfig {
    pub output: String,
    pub title: String,
    pub subtitle: String,
    /// When multiple API files are parsed, create a separate schemas section for each.
    pub separate_schemas: bool,
    /// Space separated footer options, see [`FooterOptions`]. Empty turns the footer content off.
    pub footer: String,
    /// Render "Empty body." for bodies without content.
    pub empty_body: bool,
    pub style: Theme,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            output: "output.pdf".to_string(),
            title: "API Spec".to_string(),
            subtitle: String::new(),
            separate_schemas: false,
            footer: FooterOptions::PAGE_NUMBER.to_string(),
            empty_body: false,
            style: Theme::default(),
        }
    }
}

impl BakeConfig {
    pub fn footer_options(&self) -> FooterOptions {
        FooterOptions::parse(&self.footer)
    }
}

/// Recognized footer content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FooterOptions {
    pub page_numbers: bool,
}

impl FooterOptions {
    pub const PAGE_NUMBER: &'static str = "page-number";

    /// Parse a whitespace separated option list. Unknown tokens are logged and ignored.
    pub fn parse(input: &str) -> Self {
        let mut options = FooterOptions::default();
        for token in input.split_whitespace() {
            match token {
                Self::PAGE_NUMBER => options.page_numbers = true,
                other => log::warn!("unknown footer option `{other}`"),
            }
        }
        options
    }
}

/// Visual style of the generated document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub color: ColorTheme,
    pub font: FontTheme,
    pub format: FormatTheme,
}

/// Colors per semantic role, as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColorTheme {
    pub main: String,
    pub secondary: String,
    pub highlight: String,
    pub headers: String,
    pub sub_headers: String,
    pub get_method: String,
    pub put_method: String,
    pub post_method: String,
    pub patch_method: String,
    pub delete_method: String,
    pub other_methods: String,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            main: "#333333".to_string(),
            secondary: "#6B7B8E".to_string(),
            highlight: "#8A3324".to_string(),
            headers: "#2A4D69".to_string(),
            sub_headers: "#4B86B4".to_string(),
            get_method: "#4A90E2".to_string(),
            put_method: "#6B8E23".to_string(),
            post_method: "#D87F0A".to_string(),
            patch_method: "#C2A000".to_string(),
            delete_method: "#D0021B".to_string(),
            other_methods: "#2A4D69".to_string(),
        }
    }
}

impl ColorTheme {
    /// Badge color for an HTTP method, case-insensitive.
    pub fn for_method(&self, method: &str) -> &str {
        match method.to_ascii_lowercase().as_str() {
            "get" => &self.get_method,
            "put" => &self.put_method,
            "post" => &self.post_method,
            "patch" => &self.patch_method,
            "delete" => &self.delete_method,
            _ => &self.other_methods,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontTheme {
    pub base_size: f32,
    pub main: FontFamily,
    pub mono: FontFamily,
}

impl Default for FontTheme {
    fn default() -> Self {
        Self {
            base_size: 10.0,
            main: FontFamily {
                norm: "Helvetica".to_string(),
                bold: "Helvetica-Bold".to_string(),
                italic: "Helvetica-Oblique".to_string(),
            },
            mono: FontFamily {
                norm: "Courier".to_string(),
                bold: "Courier-Bold".to_string(),
                italic: "Courier-Oblique".to_string(),
            },
        }
    }
}

/// Face names of one family, as standard PDF font names. All three faces must be given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFamily {
    pub norm: String,
    pub bold: String,
    pub italic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatTheme {
    pub indent_step: f32,
    pub horizontal_margin: f32,
    pub vertical_margin: f32,
}

impl Default for FormatTheme {
    fn default() -> Self {
        Self {
            indent_step: 12.0,
            horizontal_margin: 70.0,
            vertical_margin: 50.0,
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "apibake-config.json";

/// Load config from a JSON or YAML file, picked by extension. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<BakeConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: BakeConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?,
        _ => serde_json::from_str(&content)
            .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?,
    };
    Ok(Some(config))
}

/// The default configuration as pretty-printed JSON, for editing.
pub fn default_config_content() -> String {
    // A struct of strings, numbers and bools always serializes.
    serde_json::to_string_pretty(&BakeConfig::default()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BakeConfig::default();
        assert_eq!(config.output, "output.pdf");
        assert_eq!(config.title, "API Spec");
        assert!(!config.separate_schemas);
        assert!(!config.empty_body);
        assert!(config.footer_options().page_numbers);
        assert_eq!(config.style.font.base_size, 10.0);
        assert_eq!(config.style.format.indent_step, 12.0);
    }

    #[test]
    fn test_parse_partial_style_override() {
        let json = r##"{
            "title": "Pet Store",
            "style": {
                "color": { "getMethod": "#000000" },
                "font": { "baseSize": 12 }
            }
        }"##;
        let config: BakeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Pet Store");
        assert_eq!(config.style.color.get_method, "#000000");
        // Untouched siblings keep their defaults
        assert_eq!(config.style.color.post_method, "#D87F0A");
        assert_eq!(config.style.font.base_size, 12.0);
        assert_eq!(config.style.font.main.bold, "Helvetica-Bold");
        assert_eq!(config.style.format.horizontal_margin, 70.0);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
output: api.pdf
separateSchemas: true
footer: ""
style:
  format:
    indentStep: 20
"#;
        let config: BakeConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.output, "api.pdf");
        assert!(config.separate_schemas);
        assert!(!config.footer_options().page_numbers);
        assert_eq!(config.style.format.indent_step, 20.0);
        assert_eq!(config.style.format.vertical_margin, 50.0);
    }

    #[test]
    fn test_exported_config_round_trips() {
        let exported = default_config_content();
        let config: BakeConfig = serde_json::from_str(&exported).unwrap();
        assert_eq!(config, BakeConfig::default());
    }

    #[test]
    fn test_footer_options() {
        assert!(FooterOptions::parse("page-number").page_numbers);
        assert!(FooterOptions::parse("  page-number  other").page_numbers);
        assert!(!FooterOptions::parse("").page_numbers);
    }

    #[test]
    fn test_method_colors() {
        let colors = ColorTheme::default();
        assert_eq!(colors.for_method("GET"), "#4A90E2");
        assert_eq!(colors.for_method("delete"), "#D0021B");
        assert_eq!(colors.for_method("OPTIONS"), "#2A4D69");
    }
}
