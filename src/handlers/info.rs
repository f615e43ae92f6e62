use serde::Serialize;

use super::{json, ApiResp};

#[derive(Debug, Serialize)]
pub struct Info {
    pub name: &'static str,
    pub version: &'static str,
}

/// Get the service name and the build version, the same one `--version`
/// reports.
pub async fn get_info() -> ApiResp<Info> {
    json(Info {
        name: env!("CARGO_PKG_NAME"),
        version: env!("VERSION"),
    })
}
