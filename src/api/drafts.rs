use super::{check_slug, slug_path};
use crate::models::{Document, Draft, PublishRequest, PublishResult};
use crate::{Client, Request, Response, Upload};
use http::Method;

/// Draft operations, rooted at `/drafts`.
///
/// # Examples
///
/// ```no_run
/// use issuu_client::{models::Draft, Client, Upload};
///
/// # async fn example(client: Client) {
/// let created = client.drafts().create(&Draft::new().title("Catalogue")).await;
/// let Some(document) = created.data else { return };
///
/// let uploaded = client
///     .drafts()
///     .upload_document_content(&document.slug, Upload::file("catalogue.pdf"), true)
///     .await;
/// assert!(uploaded.is_success());
///
/// let published = client.drafts().publish(&document.slug, Some("Spring Catalogue")).await;
/// if let Some(result) = published.data {
///     println!("live at {}", result.public_location);
/// }
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Drafts<'a> {
    client: &'a Client,
    root: &'a str,
}

impl<'a> Drafts<'a> {
    pub(crate) fn new(client: &'a Client, root: &'a str) -> Self {
        Self { client, root }
    }

    /// Creates a draft. `POST /drafts`
    pub async fn create(&self, draft: &Draft) -> Response<Document> {
        let request = Request::post(self.root, draft);
        self.client.fetch_single(request).await
    }

    /// Deletes a draft. `DELETE /drafts/{slug}`
    pub async fn delete(&self, slug: &str) -> Response<()> {
        if let Some(rejected) = check_slug(self.client, &Method::DELETE, self.root, slug) {
            return rejected;
        }

        let request = Request::delete(slug_path(self.root, slug, None));
        self.client.send(request).await
    }

    /// Fetches a draft. `GET /drafts/{slug}`
    pub async fn get(&self, slug: &str) -> Response<Document> {
        if let Some(rejected) = check_slug(self.client, &Method::GET, self.root, slug) {
            return rejected;
        }

        let request = Request::get(slug_path(self.root, slug, None));
        self.client.fetch_single(request).await
    }

    /// Lists drafts one page at a time. `GET /drafts`
    pub async fn list(&self, page: Option<u32>, size: Option<u32>) -> Response<Vec<Document>> {
        let request = Request::get(self.root).with_paging(page, size);
        self.client.fetch_many(request).await
    }

    /// Publishes a draft. `POST /drafts/{slug}/publish`
    ///
    /// A desired name is turned into a URL-safe slug before it is sent.
    pub async fn publish(&self, slug: &str, desired_name: Option<&str>) -> Response<PublishResult> {
        if let Some(rejected) = check_slug(self.client, &Method::POST, self.root, slug) {
            return rejected;
        }

        let body = PublishRequest {
            desired_name: desired_name.map(slugify).filter(|name| !name.is_empty()),
        };
        let request = Request::post(slug_path(self.root, slug, Some("publish")), body);
        self.client.fetch_single(request).await
    }

    /// Updates a draft. `PATCH /drafts/{slug}`
    pub async fn update(&self, slug: &str, draft: &Draft) -> Response<Document> {
        if let Some(rejected) = check_slug(self.client, &Method::PATCH, self.root, slug) {
            return rejected;
        }

        let request = Request::patch(slug_path(self.root, slug, None), draft);
        self.client.fetch_single(request).await
    }

    /// Uploads the file content of a draft. `PATCH /drafts/{slug}/upload`
    ///
    /// Sent as multipart form data with a `confirmCopyright` field and a
    /// `file` part.
    pub async fn upload_document_content(
        &self,
        slug: &str,
        upload: Upload,
        confirm_copyright: bool,
    ) -> Response<Document> {
        if let Some(rejected) = check_slug(self.client, &Method::PATCH, self.root, slug) {
            return rejected;
        }

        let confirm = if confirm_copyright { "true" } else { "false" };
        let request = Request::new(Method::PATCH, slug_path(self.root, slug, Some("upload")))
            .with_form_field("confirmCopyright", Some(confirm))
            .with_upload(upload)
            .multipart();
        self.client.fetch_single(request).await
    }
}

/// Lowercases `name` and collapses every run of non-alphanumeric characters
/// into a single `-`, with none at either end.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
