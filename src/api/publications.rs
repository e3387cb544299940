use super::{check_slug, slug_path};
use crate::models::{
    AssetResult, AssetType, DisplaySettings, Document, EmbedResult, EmbedSettings,
    QrDisplaySettings, QrShareResult, ShareResult,
};
use crate::query::QueryString;
use crate::{Client, Request, Response};
use http::Method;

/// Publication operations, rooted at `/publications`.
#[derive(Clone, Copy)]
pub struct Publications<'a> {
    client: &'a Client,
    root: &'a str,
}

impl<'a> Publications<'a> {
    pub(crate) fn new(client: &'a Client, root: &'a str) -> Self {
        Self { client, root }
    }

    /// `DELETE /publications/{slug}`
    pub async fn delete(&self, slug: &str) -> Response<()> {
        if let Some(rejected) = check_slug(self.client, &Method::DELETE, self.root, slug) {
            return rejected;
        }

        self.client
            .send(Request::delete(slug_path(self.root, slug, None)))
            .await
    }

    /// `GET /publications/{slug}`
    pub async fn get(&self, slug: &str) -> Response<Document> {
        if let Some(rejected) = check_slug(self.client, &Method::GET, self.root, slug) {
            return rejected;
        }

        self.client
            .fetch_single(Request::get(slug_path(self.root, slug, None)))
            .await
    }

    /// Fetches the assets extracted from a publication.
    /// `GET /publications/{slug}/assets`
    ///
    /// Cover assets come back as a list of lists; only the first inner list is
    /// kept.
    pub async fn assets(
        &self,
        slug: &str,
        asset_type: AssetType,
        document_page_number: Option<u32>,
        page: Option<u32>,
        size: Option<u32>,
    ) -> Response<Vec<AssetResult>> {
        if let Some(rejected) = check_slug(self.client, &Method::GET, self.root, slug) {
            return rejected;
        }

        let query = QueryString::new()
            .add("assetType", asset_type.as_query_value())
            .add_opt("documentPageNumber", document_page_number);
        let request = Request::get(slug_path(self.root, slug, Some("assets")))
            .with_query(query)
            .with_paging(page, size);

        match asset_type {
            AssetType::Cover => self
                .client
                .fetch_many::<_, Vec<Vec<AssetResult>>>(request)
                .await
                .and_then(|lists| lists.into_iter().next()),
            AssetType::Image | AssetType::Text => self.client.fetch_many(request).await,
        }
    }

    /// Fetches embed code for a publication. `GET /publications/{slug}/embed`
    pub async fn embed(
        &self,
        slug: &str,
        settings: Option<EmbedSettings>,
    ) -> Response<EmbedResult> {
        if let Some(rejected) = check_slug(self.client, &Method::GET, self.root, slug) {
            return rejected;
        }

        let settings = settings.unwrap_or_default();
        let query = QueryString::new()
            .add_flag("responsive", settings.responsive)
            .add_opt("width", settings.width)
            .add_opt("height", settings.height)
            .add_flag("hideIssuuLogo", settings.hide_issuu_logo)
            .add_flag("hideShareButton", settings.hide_share_button)
            .add_flag("showOtherPublications", settings.show_other_publications);
        let request = Request::get(slug_path(self.root, slug, Some("embed"))).with_query(query);

        self.client.fetch_single(request).await
    }

    /// Creates a full-screen share link. `POST /publications/{slug}/fullscreen`
    pub async fn fullscreen_share(
        &self,
        slug: &str,
        settings: Option<DisplaySettings>,
    ) -> Response<ShareResult> {
        if let Some(rejected) = check_slug(self.client, &Method::POST, self.root, slug) {
            return rejected;
        }

        let request = Request::post(
            slug_path(self.root, slug, Some("fullscreen")),
            settings.unwrap_or_default(),
        );
        self.client.fetch_single(request).await
    }

    /// `GET /publications/{slug}/reader`
    pub async fn reader_share(&self, slug: &str) -> Response<ShareResult> {
        if let Some(rejected) = check_slug(self.client, &Method::GET, self.root, slug) {
            return rejected;
        }

        self.client
            .fetch_single(Request::get(slug_path(self.root, slug, Some("reader"))))
            .await
    }

    /// Creates a QR code share. `POST /publications/{slug}/qrcode`
    pub async fn qr_code(
        &self,
        slug: &str,
        settings: Option<QrDisplaySettings>,
    ) -> Response<QrShareResult> {
        if let Some(rejected) = check_slug(self.client, &Method::POST, self.root, slug) {
            return rejected;
        }

        let request = Request::post(
            slug_path(self.root, slug, Some("qrcode")),
            settings.unwrap_or_default(),
        );
        self.client.fetch_single(request).await
    }

    /// Lists publications one page at a time. `GET /publications`
    pub async fn list(&self, page: Option<u32>, size: Option<u32>) -> Response<Vec<Document>> {
        let request = Request::get(self.root).with_paging(page, size);
        self.client.fetch_many(request).await
    }
}
