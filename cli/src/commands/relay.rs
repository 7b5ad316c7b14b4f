//! JSON-lines relay host on stdin/stdout.

use pagechat_core::{serve_lines, Extension};
use tokio::io::BufReader;

pub async fn serve(extension: &Extension) -> anyhow::Result<()> {
    tracing::info!("Serving relay requests on stdin");
    serve_lines(
        extension.relay(),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;
    Ok(())
}
