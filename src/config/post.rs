//! `[post]` section configuration.
//!
//! Controls the front matter and which cells end up in the post body.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slug generation mode for post file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Transliterate to a lowercase ASCII slug (default).
    #[default]
    On,
    /// Only drop characters unsafe in file names; keep the rest as-is.
    Safe,
    /// Use the notebook file name unchanged.
    No,
}

/// `[post]` section in nbpost.toml.
///
/// # Example
/// ```toml
/// [post]
/// layout = "notebook"
/// remove_tags = ["remove_cell", "hide"]
///
/// [post.extra]
/// comments = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct PostConfig {
    /// Emit a `---` front matter block before the body.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub front_matter: bool,

    /// Layout name written into the front matter (empty: no layout key).
    #[serde(default = "defaults::post::layout")]
    #[educe(Default = defaults::post::layout())]
    pub layout: String,

    /// Leave the title/date cell out of the body.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub skip_header_cell: bool,

    /// How the notebook file name becomes the post slug.
    #[serde(default = "defaults::post::slug")]
    #[educe(Default = defaults::post::slug())]
    pub slug: SlugMode,

    /// Cells carrying any of these tags are not rendered.
    #[serde(default = "defaults::post::remove_tags")]
    #[educe(Default = defaults::post::remove_tags())]
    pub remove_tags: Vec<String>,

    /// Language class for code cells, overriding the notebook kernel.
    #[serde(default = "defaults::post::code_language")]
    #[educe(Default = defaults::post::code_language())]
    pub code_language: Option<String>,

    /// Additional front matter fields.
    #[serde(default)]
    pub extra: BTreeMap<String, toml::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_config_defaults() {
        let config = PostConfig::default();
        assert!(config.front_matter);
        assert_eq!(config.layout, "post");
        assert!(config.skip_header_cell);
        assert_eq!(config.slug, SlugMode::On);
        assert_eq!(config.remove_tags, vec!["remove_cell".to_string()]);
        assert!(config.code_language.is_none());
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_post_config_extra_fields() {
        let config: PostConfig = toml::from_str(
            r#"
            layout = "notebook"
            slug = "safe"

            [extra]
            comments = true
            category = "data"
            "#,
        )
        .unwrap();

        assert_eq!(config.layout, "notebook");
        assert_eq!(config.slug, SlugMode::Safe);
        assert_eq!(config.extra.get("comments"), Some(&toml::Value::Boolean(true)));
        assert_eq!(
            config.extra.get("category"),
            Some(&toml::Value::String("data".into()))
        );
    }
}
