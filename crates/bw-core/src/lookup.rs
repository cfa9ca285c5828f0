//! Breach lookup handler: validate, query, compose one reply, send it.

use std::sync::Arc;

use crate::{
    breach::{BreachApi, BreachRecord, InvalidEmail, LookupRequest, LookupResult},
    domain::{ChatId, MessageRef},
    formatting::escape_html,
    messaging::{port::MessagingPort, types::OutgoingMessage},
    Result,
};

pub const LOOKUP_FAILED: &str = "❌ Something went wrong while checking the breach.";

pub struct BreachLookup {
    api: Arc<dyn BreachApi>,
    messenger: Arc<dyn MessagingPort>,
}

impl BreachLookup {
    pub fn new(api: Arc<dyn BreachApi>, messenger: Arc<dyn MessagingPort>) -> Self {
        Self { api, messenger }
    }

    /// Handle one incoming text message and send exactly one reply.
    ///
    /// Lookup faults are answered with a generic message and never surface
    /// here; `Err` only means the reply itself could not be delivered. In that
    /// case one plain-text failure notice is attempted before returning.
    pub async fn handle(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let reply = self.reply_for(text).await;
        match self.messenger.send(chat_id, &reply).await {
            Ok(sent) => Ok(sent),
            Err(e) => {
                if reply.as_str() != LOOKUP_FAILED {
                    if let Err(notice) = self.messenger.send_text(chat_id, LOOKUP_FAILED).await {
                        tracing::warn!(error = %notice, "failure notice not delivered");
                    }
                }
                Err(e)
            }
        }
    }

    /// Compose the reply for `text` without sending it.
    pub async fn reply_for(&self, text: &str) -> OutgoingMessage {
        let request = match LookupRequest::parse(text) {
            Ok(r) => r,
            Err(invalid) => return invalid_email_reply(&invalid),
        };

        match self.api.breached_account(&request).await {
            Ok(result) => compose_reply(request.email(), &result),
            Err(e) => {
                tracing::error!(error = %e, "breach lookup failed");
                OutgoingMessage::Text(LOOKUP_FAILED.to_string())
            }
        }
    }
}

pub fn invalid_email_reply(invalid: &InvalidEmail) -> OutgoingMessage {
    OutgoingMessage::Text(format!("❌ Invalid email: {}", invalid.0))
}

/// Render an API outcome as a Telegram HTML reply.
pub fn compose_reply(email: &str, result: &LookupResult) -> OutgoingMessage {
    let email = escape_html(email);
    let html = match result {
        LookupResult::Breaches(records) => {
            let mut out = format!(
                "⚠️ <b>{} breaches found for</b> <code>{email}</code>:\n\n",
                records.len()
            );
            for record in records {
                out.push_str(&breach_block(record));
            }
            out
        }
        LookupResult::NoBreach => {
            format!("✅ Good news! No breaches found for <code>{email}</code>.")
        }
        LookupResult::ApiError { status, body } => {
            format!("❌ Error: {status} — {}", escape_html(body))
        }
    };
    OutgoingMessage::Html(html)
}

fn breach_block(record: &BreachRecord) -> String {
    let name = escape_html(record.name.as_deref().unwrap_or("Unknown"));
    let domain = escape_html(record.domain.as_deref().unwrap_or("Unknown site"));
    let date = escape_html(record.breach_date.as_deref().unwrap_or("Unknown Date"));
    let classes = escape_html(&record.data_classes.join(", "));
    let verified = if record.is_verified {
        "✅ Verified"
    } else {
        "⚠️ Unverified"
    };

    format!(
        "🔐 <b>{name}</b> ({domain})\n\
📅 Breach Date: <code>{date}</code>\n\
📂 Exposed: <code>{classes}</code>\n\
{verified}\n\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::Error, messaging::testing::RecordingMessenger};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays a canned outcome and counts calls.
    struct FakeApi {
        outcome: fn() -> Result<LookupResult>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn new(outcome: fn() -> Result<LookupResult>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BreachApi for FakeApi {
        async fn breached_account(&self, request: &LookupRequest) -> Result<LookupResult> {
            self.calls.lock().unwrap().push(request.email().to_string());
            (self.outcome)()
        }
    }

    fn setup(
        outcome: fn() -> Result<LookupResult>,
    ) -> (Arc<FakeApi>, Arc<RecordingMessenger>, BreachLookup) {
        let api = FakeApi::new(outcome);
        let messenger = Arc::new(RecordingMessenger::default());
        let lookup = BreachLookup::new(api.clone(), messenger.clone());
        (api, messenger, lookup)
    }

    fn record(
        name: &str,
        domain: &str,
        date: &str,
        classes: &[&str],
        verified: bool,
    ) -> BreachRecord {
        BreachRecord {
            name: Some(name.to_string()),
            breach_date: Some(date.to_string()),
            data_classes: classes.iter().map(|s| s.to_string()).collect(),
            domain: Some(domain.to_string()),
            is_verified: verified,
        }
    }

    fn two_breaches() -> Result<LookupResult> {
        Ok(LookupResult::Breaches(vec![
            record(
                "Zynga",
                "zynga.com",
                "2019-09-01",
                &["Email addresses", "Passwords"],
                true,
            ),
            record("Adobe", "adobe.com", "2013-10-04", &["Password hints"], false),
        ]))
    }

    #[tokio::test]
    async fn invalid_email_skips_the_api() {
        let (api, messenger, lookup) = setup(two_breaches);

        for input in ["  not-an-email  ", "user@localhost", "dot.only"] {
            lookup.handle(ChatId(7), input).await.unwrap();
        }

        assert!(api.calls().is_empty());
        let sent = messenger.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(
            sent[0],
            (ChatId(7), OutgoingMessage::Text("❌ Invalid email: not-an-email".to_string()))
        );
        assert_eq!(sent[1].1.as_str(), "❌ Invalid email: user@localhost");
        assert_eq!(sent[2].1.as_str(), "❌ Invalid email: dot.only");
    }

    #[tokio::test]
    async fn forwards_the_trimmed_email() {
        let (api, _messenger, lookup) = setup(|| Ok(LookupResult::NoBreach));
        lookup.handle(ChatId(1), "\t bob@example.org \n").await.unwrap();
        assert_eq!(api.calls(), vec!["bob@example.org"]);
    }

    #[tokio::test]
    async fn not_found_is_good_news() {
        let (_api, messenger, lookup) = setup(|| Ok(LookupResult::NoBreach));
        lookup.handle(ChatId(1), "bob@example.org").await.unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].1,
            OutgoingMessage::Html(
                "✅ Good news! No breaches found for <code>bob@example.org</code>.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn lists_breaches_in_api_order() {
        let (_api, messenger, lookup) = setup(two_breaches);
        lookup.handle(ChatId(1), "bob@example.org").await.unwrap();

        let sent = messenger.sent();
        assert_eq!(sent.len(), 1);
        let OutgoingMessage::Html(html) = &sent[0].1 else {
            panic!("expected html reply");
        };

        assert!(html.starts_with(
            "⚠️ <b>2 breaches found for</b> <code>bob@example.org</code>:\n\n"
        ));
        assert_eq!(html.matches("🔐").count(), 2);
        let zynga = html.find("Zynga").unwrap();
        let adobe = html.find("Adobe").unwrap();
        assert!(zynga < adobe);

        assert!(html.contains(
            "🔐 <b>Zynga</b> (zynga.com)\n\
📅 Breach Date: <code>2019-09-01</code>\n\
📂 Exposed: <code>Email addresses, Passwords</code>\n\
✅ Verified\n\n"
        ));
        assert!(html.contains(
            "🔐 <b>Adobe</b> (adobe.com)\n\
📅 Breach Date: <code>2013-10-04</code>\n\
📂 Exposed: <code>Password hints</code>\n\
⚠️ Unverified\n\n"
        ));
    }

    #[tokio::test]
    async fn empty_breach_list_reports_zero() {
        let (_api, messenger, lookup) = setup(|| Ok(LookupResult::Breaches(Vec::new())));
        lookup.handle(ChatId(1), "bob@example.org").await.unwrap();

        let sent = messenger.sent();
        assert_eq!(
            sent[0].1.as_str(),
            "⚠️ <b>0 breaches found for</b> <code>bob@example.org</code>:\n\n"
        );
    }

    #[test]
    fn missing_fields_use_placeholders() {
        let reply = compose_reply(
            "a@b.c",
            &LookupResult::Breaches(vec![BreachRecord::default()]),
        );
        let html = reply.as_str();
        assert!(html.contains("🔐 <b>Unknown</b> (Unknown site)"));
        assert!(html.contains("📅 Breach Date: <code>Unknown Date</code>"));
        assert!(html.contains("📂 Exposed: <code></code>"));
        assert!(html.contains("⚠️ Unverified"));
    }

    #[tokio::test]
    async fn api_error_echoes_status_and_body() {
        let (_api, messenger, lookup) = setup(|| {
            Ok(LookupResult::ApiError {
                status: 500,
                body: "upstream exploded".to_string(),
            })
        });
        lookup.handle(ChatId(1), "bob@example.org").await.unwrap();

        assert_eq!(
            messenger.sent()[0].1,
            OutgoingMessage::Html("❌ Error: 500 — upstream exploded".to_string())
        );
    }

    #[test]
    fn dynamic_text_is_escaped() {
        let reply = compose_reply(
            "<b>@x.y",
            &LookupResult::ApiError {
                status: 401,
                body: r#"{"statusCode": 401, "message": "Access denied due to missing hibp-api-key."}"#
                    .to_string(),
            },
        );
        assert_eq!(
            reply.as_str(),
            "❌ Error: 401 — {&quot;statusCode&quot;: 401, &quot;message&quot;: &quot;Access denied due to missing hibp-api-key.&quot;}"
        );

        let reply = compose_reply("<b>@x.y", &LookupResult::NoBreach);
        assert!(reply.as_str().contains("<code>&lt;b&gt;@x.y</code>"));
    }

    #[tokio::test]
    async fn transport_fault_sends_generic_message() {
        let (api, messenger, lookup) =
            setup(|| Err(Error::External("hibp request error: connection refused".to_string())));

        let sent_ref = lookup.handle(ChatId(3), "bob@example.org").await;
        assert!(sent_ref.is_ok());
        assert_eq!(api.calls().len(), 1);
        assert_eq!(
            messenger.sent(),
            vec![(ChatId(3), OutgoingMessage::Text(LOOKUP_FAILED.to_string()))]
        );

        // Still serving afterwards.
        lookup.handle(ChatId(3), "nope").await.unwrap();
        assert_eq!(messenger.sent().len(), 2);
    }

    #[tokio::test]
    async fn failed_delivery_falls_back_to_generic_message() {
        let api = FakeApi::new(two_breaches);
        let messenger = Arc::new(RecordingMessenger::rejecting_html());
        let lookup = BreachLookup::new(api, messenger.clone());

        let err = lookup.handle(ChatId(5), "bob@example.org").await.unwrap_err();
        assert!(err.to_string().contains("can't parse entities"));
        assert_eq!(
            messenger.sent(),
            vec![(ChatId(5), OutgoingMessage::Text(LOOKUP_FAILED.to_string()))]
        );
    }

    #[tokio::test]
    async fn same_input_gives_identical_replies() {
        let (_api, _messenger, lookup) = setup(two_breaches);
        let a = lookup.reply_for("bob@example.org").await;
        let b = lookup.reply_for("bob@example.org").await;
        assert_eq!(a, b);
    }
}
