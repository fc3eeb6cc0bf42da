//! Post page fixtures and mock server helpers

use hikr_dl::{PhotoId, UrlTemplates};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Bytes served as the image body
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Post page shaped like a real hikr photo page
pub fn post_page(photo_id: PhotoId, title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title} - hikr.org</title></head>
<body>
<div id="header"><a href="/">hikr</a> <a href="/tour/">Tours</a></div>
<div class="div13">
  <h1><a href="/gallery/photo{photo_id}.html" class="title">{title}</a></h1>
  <div class="user">Photo by <a href="/user/someone/">someone</a></div>
</div>
<div class="footer"><a href="/about/">About</a></div>
</body>
</html>"#
    )
}

/// Path component of a URL produced by the default templates
fn url_path(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    match without_scheme.find('/') {
        Some(pos) => without_scheme[pos..].to_string(),
        None => "/".to_string(),
    }
}

/// Request path for the image of `id`
pub fn image_path(id: PhotoId) -> String {
    url_path(&UrlTemplates::default().image_url(id))
}

/// Request path for the post page of `id`
pub fn post_path(id: PhotoId) -> String {
    url_path(&UrlTemplates::default().post_url(id))
}

/// Serve a complete photo: image and titled post page
pub async fn mount_photo(server: &MockServer, id: PhotoId, title: &str) {
    Mock::given(method("GET"))
        .and(path(image_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(post_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(post_page(id, title)))
        .mount(server)
        .await;
}

/// Serve a photo whose image has been deleted
pub async fn mount_missing_image(server: &MockServer, id: PhotoId, title: &str) {
    Mock::given(method("GET"))
        .and(path(image_path(id)))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(post_path(id)))
        .respond_with(ResponseTemplate::new(200).set_body_string(post_page(id, title)))
        .mount(server)
        .await;
}
