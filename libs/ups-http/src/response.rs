use bytes::Bytes;
use http::Response;
use http_body_util::BodyExt;

use crate::error::HttpError;

/// Boxed response body after the decompression layer.
pub type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// Buffer the (already decompressed) body, failing once more than `limit`
/// bytes have been read. The limit therefore also bounds decompression
/// bombs.
///
/// # Errors
/// Returns `HttpError::BodyTooLarge` past the limit and `HttpError::Transport`
/// when reading a frame fails.
pub async fn read_body_limited(
    response: Response<ResponseBody>,
    limit: usize,
) -> Result<Response<Bytes>, HttpError> {
    let (parts, body) = response.into_parts();

    let mut collected = Vec::new();
    let mut body = std::pin::pin!(body);

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(HttpError::Transport)?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(HttpError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Response::from_parts(parts, Bytes::from(collected)))
}
