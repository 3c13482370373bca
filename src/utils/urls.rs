use anyhow::{Error, bail};
use url::{ParseError, Url};

pub fn to_url(host: String) -> Result<Url, ParseError> {
    Url::parse(&host)
}

/// Parses the analysis endpoint, accepting only http(s) urls with a host.
pub fn to_api_url(raw: &str) -> Result<Url, Error> {
    let url = to_url(raw.trim().to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported scheme `{}` in analysis url {}", other, raw),
    }
    if url.host_str().is_none() {
        bail!("analysis url {} has no host", raw);
    }
    Ok(url)
}
