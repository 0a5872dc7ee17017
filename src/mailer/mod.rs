// 第三方邮件队列代理
// 服务端转发到 PHP 邮件服务，避免浏览器直连的 CORS 问题

use std::time::Duration;

use chrono::{DateTime, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

pub mod template;

pub const DEFAULT_MAIL_CODE: &str = "xmhp";

const MAILER_TIMEOUT: Duration = Duration::from_secs(30);

/// 队列请求字段，与 PHP 邮件服务的表单契约一致
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailQueueRequest {
    pub time: String,
    pub token: String,
    pub name: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub cc: Option<String>,
    pub code: String,
    pub receivers: String,
}

/// 上游的原始应答：HTTP 状态码加响应体
#[derive(Debug)]
pub struct QueueReply {
    pub status: u16,
    pub body: String,
}

#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
}

impl Mailer {
    pub fn new(api_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(MAILER_TIMEOUT).build()?;
        Ok(Self { client, api_url })
    }

    /// 队列令牌，与 PHP 端的 md5(date('Ym') . '#!!$@' . time()) 一致
    pub fn queue_token(at: DateTime<Utc>) -> String {
        let input = format!("{}#!!$@{}", at.format("%Y%m"), at.timestamp());
        let mut hasher = Md5::new();
        hasher.update(input.as_bytes());
        hasher
            .finalize()
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect()
    }

    /// 以当前时刻填充 time/token 字段（测试请求在 time 上加 "_test" 后缀）
    pub fn build_queue_request(
        name: &str,
        subject: &str,
        body: &str,
        cc: Option<&str>,
        receivers: &str,
        is_test: bool,
    ) -> MailQueueRequest {
        let now = Utc::now();
        let suffix = if is_test { "_test" } else { "" };
        MailQueueRequest {
            time: format!("{}{}", now.timestamp(), suffix),
            token: Self::queue_token(now),
            name: name.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            cc: cc.map(str::to_string),
            code: DEFAULT_MAIL_CODE.to_string(),
            receivers: receivers.to_string(),
        }
    }

    /// 把队列请求按表单编码转发给上游，返回原始应答
    pub async fn send_queue(&self, req: &MailQueueRequest) -> Result<QueueReply, reqwest::Error> {
        let form = form_pairs(req);
        let response = self.client.post(&self.api_url).form(&form).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(QueueReply { status, body })
    }
}

// cc 为 None 时不出现在表单里，Some("") 照常发送（上游按空 CC 处理）
fn form_pairs(req: &MailQueueRequest) -> Vec<(&'static str, &str)> {
    let mut form: Vec<(&'static str, &str)> = vec![
        ("time", req.time.as_str()),
        ("token", req.token.as_str()),
        ("name", req.name.as_str()),
        ("subject", req.subject.as_str()),
        ("body", req.body.as_str()),
        ("code", req.code.as_str()),
        ("receivers", req.receivers.as_str()),
    ];
    if let Some(cc) = req.cc.as_deref() {
        form.push(("cc", cc));
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;

    fn sample_request(cc: Option<&str>) -> MailQueueRequest {
        MailQueueRequest {
            time: "1736942400".to_string(),
            token: "token-under-test".to_string(),
            name: "Trung Tâm".to_string(),
            subject: "Thông báo".to_string(),
            body: "<p>Nội dung</p>".to_string(),
            cc: cc.map(str::to_string),
            code: DEFAULT_MAIL_CODE.to_string(),
            receivers: "student@example.com".to_string(),
        }
    }

    #[test]
    fn queue_token_matches_php_md5_convention() {
        // md5("202501#!!$@1736942400")
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(
            Mailer::queue_token(at),
            "ec1ac1bfc031c06066a6282a3356cbe8"
        );
    }

    #[test]
    fn built_request_carries_test_suffix_and_hex_token() {
        let req = Mailer::build_queue_request(
            "Test Connection",
            "Test Email",
            "<p>This is a test email</p>",
            Some(""),
            "test@example.com",
            true,
        );

        assert!(req.time.ends_with("_test"));
        assert!(req.time.trim_end_matches("_test").parse::<i64>().is_ok());
        assert_eq!(req.token.len(), 32);
        assert!(req.token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(req.code, DEFAULT_MAIL_CODE);
        assert_eq!(req.cc.as_deref(), Some(""));
    }

    #[test]
    fn form_omits_cc_only_when_absent() {
        let without = form_pairs(&sample_request(None));
        assert!(without.iter().all(|(field, _)| *field != "cc"));

        let with = form_pairs(&sample_request(Some("boss@example.com")));
        assert!(with.contains(&("cc", "boss@example.com")));
    }

    #[tokio::test]
    async fn send_queue_posts_form_and_returns_upstream_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/add_queue.php")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("time".into(), "1736942400".into()),
                Matcher::UrlEncoded("token".into(), "token-under-test".into()),
                Matcher::UrlEncoded("receivers".into(), "student@example.com".into()),
                Matcher::UrlEncoded("code".into(), "xmhp".into()),
            ]))
            .with_status(200)
            .with_body("INSERTED")
            .create_async()
            .await;

        let mailer = Mailer::new(format!("{}/add_queue.php", server.url())).unwrap();
        let reply = mailer.send_queue(&sample_request(None)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, "INSERTED");
    }

    #[tokio::test]
    async fn send_queue_surfaces_upstream_http_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/add_queue.php")
            .with_status(503)
            .with_body("queue unavailable")
            .create_async()
            .await;

        let mailer = Mailer::new(format!("{}/add_queue.php", server.url())).unwrap();
        let reply = mailer.send_queue(&sample_request(None)).await.unwrap();

        assert_eq!(reply.status, 503);
        assert_eq!(reply.body, "queue unavailable");
    }
}
