//! Push client for the widget endpoint.
//!
//! Updates travel as GET requests carrying the widget uuid, the countdown
//! text and a base64 icon in the query string. Consecutive identical
//! payloads are skipped; a payload counts as sent the moment an attempt is
//! made for it, successful or not, so a misbehaving endpoint is not hammered
//! with retries of the same update.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

use super::icons::{IconKind, IconSet};

/// Timeout for a single widget update. The widget lives on localhost and a
/// stale countdown is replaced within a tick anyway.
const REQUEST_TIMEOUT: Duration = Duration::from_millis(200);

/// One widget update: countdown text plus the icon accompanying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushUpdate {
    pub text: String,
    pub icon: IconKind,
}

/// De-duplicating HTTP client for the configured push destination.
#[derive(Debug)]
pub struct Notifier {
    client: reqwest::Client,
    url: Url,
    uuid: String,
    icons: IconSet,
    last: Option<PushUpdate>,
}

impl Notifier {
    pub fn new(url: Url, uuid: Option<String>, icons: IconSet) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build push client")?;
        Ok(Self {
            client,
            url,
            uuid: uuid.unwrap_or_default(),
            icons,
            last: None,
        })
    }

    /// Sends one update, unless it equals the previous one.
    pub async fn push(&mut self, update: &PushUpdate) -> Result<()> {
        if self.last.as_ref() == Some(update) {
            return Ok(());
        }
        self.last = Some(update.clone());

        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("uuid", &self.uuid)
            .append_pair("text", &update.text)
            .append_pair("icon_data", self.icons.data(update.icon));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Request failed")?;
        if response.status() != reqwest::StatusCode::OK {
            bail!("Response status: {}", response.status());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn notifier(server: &mockito::ServerGuard) -> Notifier {
        let url = Url::parse(&format!("{}/update_touch_bar_widget/", server.url())).unwrap();
        let icons = IconSet::load(None, None).unwrap();
        Notifier::new(url, Some("widget-1".to_string()), icons).unwrap()
    }

    fn update(text: &str) -> PushUpdate {
        PushUpdate {
            text: text.to_string(),
            icon: IconKind::Work,
        }
    }

    #[tokio::test]
    async fn identical_consecutive_updates_hit_the_endpoint_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/update_touch_bar_widget/")
            .match_query(Matcher::UrlEncoded("text".into(), "25:00".into()))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let mut notifier = notifier(&server);
        notifier.push(&update("25:00")).await.unwrap();
        notifier.push(&update("25:00")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn any_change_of_text_or_icon_goes_out_again() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/update_touch_bar_widget/")
            .match_query(Matcher::Any)
            .with_status(200)
            .expect(3)
            .create_async()
            .await;

        let mut notifier = notifier(&server);
        notifier.push(&update("25:00")).await.unwrap();
        notifier.push(&update("24:59")).await.unwrap();
        notifier
            .push(&PushUpdate {
                text: "24:59".to_string(),
                icon: IconKind::Break,
            })
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_attempt_still_counts_as_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/update_touch_bar_widget/")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let mut notifier = notifier(&server);
        let err = notifier.push(&update("25:00")).await.unwrap_err();
        assert!(err.to_string().contains("500"));

        // The same payload is not retried after the failure.
        notifier.push(&update("25:00")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn uuid_text_and_icon_travel_in_the_query() {
        let mut server = mockito::Server::new_async().await;
        let icons = IconSet::load(None, None).unwrap();
        let icon_data = icons.data(IconKind::Work).to_string();
        let mock = server
            .mock("GET", "/update_touch_bar_widget/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("uuid".into(), "widget-1".into()),
                Matcher::UrlEncoded("text".into(), "25:00".into()),
                Matcher::UrlEncoded("icon_data".into(), icon_data),
            ]))
            .with_status(200)
            .create_async()
            .await;

        let mut notifier = notifier(&server);
        notifier.push(&update("25:00")).await.unwrap();

        mock.assert_async().await;
    }
}
