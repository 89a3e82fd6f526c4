use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type MemberID = String;

pub const IMAGE_FILE_NAME: &str = "img.png";
pub const TITLE_SUFFIX: &str = "Member Real Dev Squad";

const UNTITLED_CONTRIBUTION: &str = "Untitled contribution";

/// Member metadata as returned by the members API. Only the name parts are
/// read directly, everything else is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributions {
    #[serde(default)]
    pub noteworthy: Vec<Value>,
    #[serde(default)]
    pub all: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub url: String,
}

impl User {
    pub fn display_title(&self) -> String {
        format!(
            "{} {} | {TITLE_SUFFIX}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
        )
    }

    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A non-empty string-valued field outside of the name parts.
    pub fn text_field(&self, key: &str) -> Option<&str> {
        self.rest
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn social_links(&self) -> Vec<SocialLink> {
        [
            ("GitHub", "github_id", "https://github.com/"),
            ("Twitter", "twitter_id", "https://twitter.com/"),
            ("LinkedIn", "linkedin_id", "https://www.linkedin.com/in/"),
        ]
        .into_iter()
        .filter_map(|(label, key, prefix)| {
            self.text_field(key).map(|handle| SocialLink {
                label,
                url: format!("{prefix}{}", urlencoding::encode(handle)),
            })
        })
        .collect()
    }
}

impl Contributions {
    pub fn noteworthy_titles(&self) -> Vec<String> {
        self.noteworthy.iter().map(contribution_title).collect()
    }

    pub fn all_titles(&self) -> Vec<String> {
        self.all.iter().map(contribution_title).collect()
    }
}

// contributions are opaque records, so look in the places the API usually puts a title
pub fn contribution_title(contribution: &Value) -> String {
    contribution
        .pointer("/task/title")
        .or_else(|| contribution.get("title"))
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_CONTRIBUTION)
        .to_owned()
}
