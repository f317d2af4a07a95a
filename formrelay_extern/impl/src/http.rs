use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use formrelay_utils::{formrelay_version, Apply};
use reqwest::ClientBuilder;

pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    let repository = env!("CARGO_PKG_REPOSITORY");
    let version = formrelay_version();

    format!("formrelay/{version} (+{repository})")
});

const _: () = {
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    /// Build a client. Without a `timeout` requests may wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .apply_map(timeout, ClientBuilder::timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
