//! Character metadata extraction
//!
//! The export header names the character as `<class>="<name>"` and declares
//! the active specialization with `spec=<spec>`. Both are looked up
//! independently; a missing one does not affect the other.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Class, name and spec of the exported character
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterMetadata {
    pub class_name: Option<String>,
    pub character_name: Option<String>,
    pub spec: Option<String>,
}

fn class_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^(\w+)="(\w+)"\r?$"#).expect("class line regex must compile")
    })
}

fn spec_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?m)^spec="?(\w+)"?"#).expect("spec line regex must compile"))
}

/// Extract character metadata from a full export
///
/// The first matching class line and the first matching spec line win.
/// The class token is passed through as written, recognized or not.
pub fn extract_metadata(text: &str) -> CharacterMetadata {
    let mut metadata = CharacterMetadata::default();

    if let Some(caps) = class_line_re().captures(text) {
        metadata.class_name = Some(caps[1].to_string());
        metadata.character_name = Some(caps[2].to_string());
    }

    if let Some(caps) = spec_line_re().captures(text) {
        metadata.spec = Some(caps[1].to_string());
    }

    metadata
}
