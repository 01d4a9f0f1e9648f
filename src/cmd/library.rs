use std::path::Path;

use anyhow::{Context, Result};

use ava::portal::library::FileUpload;
use ava::{AvaConfig, DocumentLibrary, RestBackend};

use super::connect;
use super::output::{print_json, truncate_text};
use crate::OutputFormat;

fn library(config: &AvaConfig) -> Result<DocumentLibrary<RestBackend>> {
    let backend = connect(config)?;
    Ok(DocumentLibrary::new(backend)
        .with_bucket(config.storage.documents_bucket.clone())
        .with_max_upload_bytes(config.storage.max_upload_bytes))
}

pub async fn cmd_docs(config: &AvaConfig, search: &str, format: OutputFormat) -> Result<()> {
    let docs = library(config)?.search(search).await?;
    if format == OutputFormat::Json {
        return print_json(&docs);
    }

    if docs.is_empty() {
        println!("📂 No documents found");
        return Ok(());
    }

    println!("📂 {} documents", docs.len());
    for doc in &docs {
        let added = doc
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        println!(
            "  {:<36}  {:<40} {:<14} {:>9} {}",
            doc.id,
            truncate_text(&doc.title, 40),
            doc.category,
            doc.size.as_deref().unwrap_or("-"),
            added
        );
        if !doc.url.is_empty() {
            println!("      {}", doc.url);
        }
    }
    Ok(())
}

pub async fn cmd_upload(
    config: &AvaConfig,
    file: &Path,
    title: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let library = library(config)?;
    let upload = FileUpload::from_path(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let prepared = library.prepare_upload(&upload, title, category)?;
    let url = library
        .upload(&config.user(), &prepared, upload.bytes)
        .await?;

    println!("✅ Uploaded: {} ({})", prepared.title, prepared.size_label);
    println!("   Category: {}", prepared.category);
    println!("   URL: {url}");
    Ok(())
}

pub async fn cmd_delete_doc(config: &AvaConfig, id: &str) -> Result<()> {
    library(config)?.delete(&config.user(), id).await?;
    println!("🗑️  Deleted document {id}");
    Ok(())
}
