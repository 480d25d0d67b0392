use anyhow::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Copy, Clone, Debug)]
pub struct Utility {}

impl Utility {
    pub fn get_reqwest_client() -> Result<reqwest::Client> {
        let ret = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .build();
        Ok(ret?)
    }

    pub async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
        let resp = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<T>()
            .await?;
        Ok(resp)
    }
}
