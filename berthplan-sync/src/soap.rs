use async_trait::async_trait;
use http_client::HttpClient;
use tracing::{info, instrument};

use crate::{error::Result, ports::XmlSink, settings::SoapEndpointSettings};

/// Posts SOAP documents to a basic-auth protected endpoint.
pub struct SoapClient {
    client: HttpClient,
    settings: SoapEndpointSettings,
}

impl SoapClient {
    pub fn new(client: HttpClient, settings: SoapEndpointSettings) -> SoapClient {
        SoapClient { client, settings }
    }
}

#[async_trait]
impl XmlSink for SoapClient {
    #[instrument(skip_all, fields(app.url = %self.settings.url, app.num_bytes = xml.len()))]
    async fn deliver(&self, xml: String) -> Result<()> {
        let response = self
            .client
            .post(&self.settings.url)
            .header("Content-Type", "text/xml")
            .basic_auth(&self.settings.username, Some(&self.settings.password))
            .timeout(self.settings.timeout)
            .body(xml)
            .send()
            .await?;

        info!(app.status = %response.status(), "xml delivered");
        Ok(())
    }
}
