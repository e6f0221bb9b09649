//! File upload

use crate::console::CliConsole;
use foodweb_core::context::FoodwebContext;
use foodweb_core::error::{FoodwebError, FoodwebResult};
use foodweb_core::services::file::upload_file;
use foodweb_core::types::FileUpload;
use std::path::Path;

pub async fn upload(ctx: &FoodwebContext, console: &CliConsole, path: &Path) -> FoodwebResult<()> {
    let file = FileUpload::from_path(path).await.map_err(|e| {
        FoodwebError::invalid_input(format!("Cannot read {}: {}", path.display(), e))
    })?;
    console.info(&format!(
        "Uploading {} ({}, {} bytes)",
        file.filename,
        file.content_type,
        file.bytes.len()
    ));

    let uploaded = upload_file(ctx.client(), file).await?;
    console.success(&format!("Uploaded {}", uploaded.filename));
    console.field("url", &uploaded.url);
    Ok(())
}
