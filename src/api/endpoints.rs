//! Request targets on the Backstage Stories REST surface.

use url::Url;

/// Resource path segments plus query parameters, resolved against the API
/// base URL when the request is sent. Segments are percent-encoded on
/// resolve, so a value can never add or climb path levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub segments: Vec<String>,
    pub query: Vec<(&'static str, String)>,
}

impl Target {
    /// `path` is a fixed route such as `/api/posts`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
        }
    }

    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string());
        self
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append `page` (zero-based on the wire) and `size` for a one-based UI
    /// page number.
    pub fn paged(self, ui_page: u32, size: u32) -> Self {
        self.param("page", ui_page.saturating_sub(1))
            .param("size", size)
    }

    /// Unencoded path, for logs and assertions.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn resolve(&self, base_url: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

pub fn login() -> Target {
    Target::new("/api/auth/login")
}

pub fn sign_up() -> Target {
    Target::new("/api/auth/signup")
}

pub fn performance(id: i64) -> Target {
    Target::new("/api/performances").segment(id)
}

pub fn post(id: i64) -> Target {
    Target::new("/api/posts").segment(id)
}

pub fn delete_post(id: i64, author_id: i64) -> Target {
    post(id).param("userId", author_id)
}

pub fn comments_for_post(post_id: i64) -> Target {
    Target::new("/api/comments/post").segment(post_id)
}

pub fn comments() -> Target {
    Target::new("/api/comments")
}

pub fn votes() -> Target {
    Target::new("/api/votes")
}
