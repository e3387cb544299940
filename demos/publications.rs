//! Walks the drafts and publications of the account behind `ISSUU_TOKEN`.
//!
//! This demo shows how to:
//! - Build a client from environment settings
//! - Page through list results using the returned metadata
//! - Fetch the share links and embed code of a publication
//!
//! Run with: `ISSUU_TOKEN=... cargo run --example publications [slug]`

use issuu_client::{Client, Error, Settings};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter("issuu_client=debug,publications=info")
        .init();

    let settings = Settings::from_env()?;
    let client = Client::from_settings(&settings)?;

    println!("=== Drafts ===");
    let mut page = 1;
    loop {
        let response = client.drafts().list(Some(page), Some(10)).await;
        if !response.is_success() {
            println!("Listing drafts failed ({}): {:?}", response.status_code(), response.error);
            break;
        }

        for document in response.data.unwrap_or_default() {
            println!("  {document}");
        }

        if let Some(rate_limit) = &response.rate_limit {
            println!(
                "  ({}/{} calls left, reset in {:?})",
                rate_limit.remaining,
                rate_limit.limit,
                rate_limit.until_reset()
            );
        }

        match response.meta {
            Some(meta) if meta.has_next() => page += 1,
            _ => break,
        }
    }

    println!("\n=== Publications ===");
    let publications = client.publications().list(None, Some(10)).await;
    let documents = publications.data.unwrap_or_default();
    for document in &documents {
        println!("  {document}");
    }

    let slug = match std::env::args().nth(1) {
        Some(slug) => slug,
        None => match documents.first() {
            Some(document) => document.slug.clone(),
            None => {
                println!("No publications to inspect");
                return Ok(());
            }
        },
    };

    println!("\n=== Publication {slug} ===");
    let publication = client.publications().get(&slug).await;
    match publication.into_result() {
        Ok(Some(document)) => println!("  {document}"),
        Ok(None) => println!("  (empty response)"),
        Err(error) => {
            println!("  Failed: {error}");
            return Ok(());
        }
    }

    let fullscreen = client.publications().fullscreen_share(&slug, None).await;
    if let Some(share) = fullscreen.data {
        println!("  Full screen: {}", share.url);
    }

    let reader = client.publications().reader_share(&slug).await;
    if let Some(share) = reader.data {
        println!("  Reader: {}", share.url);
    }

    let qr_code = client.publications().qr_code(&slug, None).await;
    if let Some(qr_code) = qr_code.data {
        println!("  QR code: {} -> {}", qr_code.qr_code_url, qr_code.pointed_url);
    }

    let embed = client.publications().embed(&slug, None).await;
    if let Some(embed) = embed.data {
        println!("  Embed: {}", embed.embed);
    }

    Ok(())
}
