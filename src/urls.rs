use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    // url resolves `.`/`..` even when percent-encoded, so they can't be a segment
    #[error("{0:?} is not a usable path segment")]
    DotSegment(String),
}

/// Builds the backend and static asset URLs for a member.
#[derive(Debug, Clone)]
pub struct Urls {
    api_base: Url,
    image_base: Url,
}

impl Urls {
    pub fn new(api_base: Url, image_base: Url) -> Self {
        Urls {
            api_base,
            image_base,
        }
    }

    pub fn member_data_url(&self, member_id: &str) -> Result<Url, UrlError> {
        join(&self.api_base, &["users", member_id])
    }

    pub fn contributions_url(&self, member_id: &str) -> Result<Url, UrlError> {
        join(&self.api_base, &["contributions", member_id])
    }

    pub fn image_url(&self, member_id: &str, file_name: &str) -> Result<Url, UrlError> {
        join(&self.image_base, &[member_id, file_name])
    }
}

pub fn is_dot_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c == '.')
}

fn join(base: &Url, segments: &[&str]) -> Result<Url, UrlError> {
    if let Some(segment) = segments.iter().find(|segment| is_dot_segment(segment)) {
        return Err(UrlError::DotSegment((*segment).to_owned()));
    }

    let path = segments
        .iter()
        .map(|segment| urlencoding::encode(segment))
        .collect::<Vec<_>>()
        .join("/");

    Ok(Url::parse(&format!(
        "{}/{path}",
        base.as_str().trim_end_matches('/')
    ))?)
}
