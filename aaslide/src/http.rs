use crate::error::GenerateError;

/// Read the response body, turning any non-2xx status into an error that
/// carries the status and the raw body for the operator log.
pub(crate) async fn read_body(resp: reqwest::Response) -> Result<String, GenerateError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(GenerateError::UpstreamStatus { status, body });
    }
    Ok(body)
}
