//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use crate::config::HeaderPolicy;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn notebooks() -> String {
        "notebooks/*.ipynb".into()
    }

    pub fn output() -> PathBuf {
        "_posts".into()
    }

    pub fn extension() -> String {
        "html".into()
    }

    pub fn on_missing_header() -> HeaderPolicy {
        HeaderPolicy::default()
    }

    pub fn nbformat() -> u32 {
        crate::notebook::NBFORMAT_VERSION
    }
}

// ============================================================================
// [post] Section Defaults
// ============================================================================

pub mod post {
    use crate::config::SlugMode;

    pub fn layout() -> String {
        "post".into()
    }

    pub fn slug() -> SlugMode {
        SlugMode::default()
    }

    pub fn remove_tags() -> Vec<String> {
        vec!["remove_cell".into()]
    }

    pub fn code_language() -> Option<String> {
        None
    }
}
