//! Operator acknowledgement between creating and listing

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;

pub const PROMPT: &str = "-> Press Return key to continue.";

/// Print the prompt and block until one line (or end of input) is read.
///
/// A closed input counts as acknowledgement. Read failures are returned.
pub async fn wait_for_return<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(PROMPT.as_bytes()).await?;
    writer.flush().await?;

    // Raw bytes: the line content is never inspected, so it need not be UTF-8
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).await?;

    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
