//! Photo and post URLs
//!
//! Both URLs are fixed templates with the photo ID substituted:
//! - `<image base>/files/<id>l.jpg`
//! - `<post base>/gallery/photo<id>.html`

use crate::types::PhotoId;

/// URL templates for one pair of hosts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlTemplates {
    image_base: String,
    post_base: String,
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self::new("https://f.hikr.org", "https://www.hikr.org")
    }
}

impl UrlTemplates {
    /// Templates rooted at the given scheme-and-host prefixes
    ///
    /// A trailing slash on either base is ignored.
    pub fn new(image_base: &str, post_base: &str) -> Self {
        Self {
            image_base: image_base.trim_end_matches('/').to_string(),
            post_base: post_base.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the large image for `id`
    #[must_use]
    pub fn image_url(&self, id: PhotoId) -> String {
        format!("{}/files/{}l.jpg", self.image_base, id)
    }

    /// URL of the post page for `id`
    #[must_use]
    pub fn post_url(&self, id: PhotoId) -> String {
        format!("{}/gallery/photo{}.html", self.post_base, id)
    }
}
