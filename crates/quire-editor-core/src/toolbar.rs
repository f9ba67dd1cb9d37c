//! Toolbar feature groups handed to the rich-text widget.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A cluster of related toolbar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarGroup {
    /// Heading level picker (h1, h2, normal).
    Headings,
    /// Font family picker.
    Font,
    /// Bold, italic, underline, strike.
    InlineStyles,
    /// Ordered and bullet lists.
    Lists,
    /// Link and image insertion.
    LinksImages,
    /// Remove formatting.
    CleanFormatting,
    /// Code block toggle.
    CodeBlock,
}

impl ToolbarGroup {
    pub const ALL: [ToolbarGroup; 7] = [
        ToolbarGroup::Headings,
        ToolbarGroup::Font,
        ToolbarGroup::InlineStyles,
        ToolbarGroup::Lists,
        ToolbarGroup::LinksImages,
        ToolbarGroup::CleanFormatting,
        ToolbarGroup::CodeBlock,
    ];

    /// The widget's toolbar row for this group.
    pub fn to_widget_row(self) -> Value {
        match self {
            ToolbarGroup::Headings => json!([{ "header": [1, 2, false] }]),
            ToolbarGroup::Font => json!([{ "font": [] }]),
            ToolbarGroup::InlineStyles => json!(["bold", "italic", "underline", "strike"]),
            ToolbarGroup::Lists => json!([{ "list": "ordered" }, { "list": "bullet" }]),
            ToolbarGroup::LinksImages => json!(["link", "image"]),
            ToolbarGroup::CleanFormatting => json!(["clean"]),
            ToolbarGroup::CodeBlock => json!(["code-block"]),
        }
    }
}

/// Ordered set of toolbar groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolbarConfig {
    pub groups: Vec<ToolbarGroup>,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            groups: ToolbarGroup::ALL.to_vec(),
        }
    }
}

impl ToolbarConfig {
    /// Render the widget `modules` option (`{"toolbar": [...]}`).
    ///
    /// Duplicate groups are emitted once, at their first position.
    pub fn to_widget_modules(&self) -> Value {
        let mut seen = Vec::with_capacity(self.groups.len());
        let rows: Vec<Value> = self
            .groups
            .iter()
            .filter(|g| {
                if seen.contains(*g) {
                    false
                } else {
                    seen.push(**g);
                    true
                }
            })
            .map(|g| g.to_widget_row())
            .collect();
        json!({ "toolbar": rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modules() {
        let modules = ToolbarConfig::default().to_widget_modules();
        insta::assert_snapshot!(
            serde_json::to_string(&modules).unwrap(),
            @r#"{"toolbar":[[{"header":[1,2,false]}],[{"font":[]}],["bold","italic","underline","strike"],[{"list":"ordered"},{"list":"bullet"}],["link","image"],["clean"],["code-block"]]}"#
        );
    }

    #[test]
    fn test_subset_and_duplicates() {
        let config = ToolbarConfig {
            groups: vec![
                ToolbarGroup::CodeBlock,
                ToolbarGroup::Lists,
                ToolbarGroup::CodeBlock,
            ],
        };
        assert_eq!(
            config.to_widget_modules(),
            json!({ "toolbar": [["code-block"], [{ "list": "ordered" }, { "list": "bullet" }]] })
        );
    }

    #[test]
    fn test_config_serde_names() {
        let config: ToolbarConfig =
            serde_json::from_str(r#"["headings", "inline-styles", "links-images"]"#).unwrap();
        assert_eq!(
            config.groups,
            vec![
                ToolbarGroup::Headings,
                ToolbarGroup::InlineStyles,
                ToolbarGroup::LinksImages
            ]
        );
    }
}
