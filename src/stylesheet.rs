//! Stylesheet system for the host page
//!
//! Rendered fragments only carry class names. A stylesheet maps symbolic
//! color tokens to concrete values and turns them into the CSS that gives
//! those classes their look, so the same output can be viewed with
//! different color schemes.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::encode;
use crate::renderer::svg::CURVE_IDS;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping symbolic colors to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet, used as the page title
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Color mappings: token name -> CSS color
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default color palette
const DEFAULT_PALETTE: &str = r##"
[colors]
# Page
background = "#ffffff"
text = "#1a1a1a"
link = "#1565c0"

# Value markup
empty = "#999999"
code = "#6a1b9a"
table-border = "#cccccc"
box-border = "#2196f3"

# Plot frame
axis = "#333333"
grid = "#e0e0e0"
label = "#666666"

# One color per curve class
curve-0 = "#1f77b4"
curve-1 = "#ff7f0e"
curve-2 = "#2ca02c"
curve-3 = "#d62728"
curve-4 = "#9467bd"
curve-5 = "#8c564b"
curve-6 = "#e377c2"
curve-7 = "#7f7f7f"
curve-8 = "#bcbd22"
curve-9 = "#17becf"
curve-a = "#393b79"
curve-b = "#637939"
curve-c = "#8c6d31"
curve-d = "#843c39"
curve-e = "#7b4173"
curve-f = "#3182bd"
"##;

/// Color for tokens neither the stylesheet nor the default palette defines
const FALLBACK_COLOR: &str = "#1a1a1a";

/// Rules that do not depend on any color token
const LAYOUT_RULES: &str = "\
body { background: var(--background); color: var(--text); font-family: sans-serif; }
a { color: var(--link); }
table.range_content, table.tuple_content, table.single_row { border-collapse: collapse; margin: 0.25em 0; }
table.range_content td, table.tuple_content td { border: 1px solid var(--table-border); padding: 0.2em 0.5em; }
table.single_row td { padding: 0 0.25em; vertical-align: top; }
ol.range_content, ol.tuple_content { margin: 0.25em 0; }
span.empty { color: var(--empty); font-style: italic; }
code.byte, code.pointer { color: var(--code); }
div.box { border: 1px solid var(--box-border); padding: 0.5em; margin: 0.5em 0; }
svg { max-width: 40em; }
.x_grid, .y_grid { stroke: var(--grid); }
.axis_box { stroke: var(--axis); }
.x_labels { fill: var(--label); }
";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a symbolic color token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a symbolic color token with fallback to default palette
    ///
    /// Fallback order:
    /// 1. Check this stylesheet for exact token
    /// 2. Check default palette for exact token
    /// 3. Use the text color
    pub fn resolve_or_default(&self, token: &str) -> String {
        self.resolve_with(&Self::default(), token)
    }

    fn resolve_with(&self, default: &Stylesheet, token: &str) -> String {
        self.resolve(token)
            .or_else(|| default.resolve(token))
            .unwrap_or(FALLBACK_COLOR)
            .to_string()
    }

    /// CSS for every class the renderers emit
    pub fn to_css(&self) -> String {
        let default = Self::default();
        let mut css = String::from(":root {\n");
        for token in default.colors.keys().chain(
            self.colors
                .keys()
                .filter(|token| !default.colors.contains_key(*token)),
        ) {
            let _ = writeln!(css, "  --{}: {};", token, self.resolve_with(&default, token));
        }
        css.push_str("}\n");
        css.push_str(LAYOUT_RULES);
        for id in CURVE_IDS.iter().map(|&b| b as char) {
            let _ = writeln!(
                css,
                "polyline.curve_{id} {{ stroke: var(--curve-{id}); }} circle.curve_{id} {{ fill: var(--curve-{id}); }}"
            );
        }
        css
    }

    /// Wrap rendered fragments in a standalone HTML page using this stylesheet
    pub fn page(&self, body: &str) -> String {
        let title = self.name.as_deref().unwrap_or("pretty-render");
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            encode::escape(title),
            self.to_css(),
            body
        )
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
