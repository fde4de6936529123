use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Side effects a booking interaction can have on the page that hosts it.
#[async_trait]
pub trait PageResponder: Send + Sync {
    async fn notify(&self, content: &str);
    async fn navigate(&self, url: &str);
}

pub struct TerminalResponder {
    out: Mutex<Stdout>,
    base_url: Option<url::Url>,
}

impl TerminalResponder {
    pub fn new(base_url: Option<url::Url>) -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
            base_url,
        }
    }

    async fn write_line(&self, line: String) {
        let mut out = self.out.lock().await;
        let _ = out.write_all(line.as_bytes()).await;
        let _ = out.write_all(b"\n").await;
        let _ = out.flush().await;
    }
}

#[async_trait]
impl PageResponder for TerminalResponder {
    async fn notify(&self, content: &str) {
        self.write_line(content.to_string()).await;
    }

    async fn navigate(&self, url: &str) {
        let resolved = match &self.base_url {
            Some(base) => base
                .join(url)
                .map(|joined| joined.to_string())
                .unwrap_or_else(|_| url.to_string()),
            None => url.to_string(),
        };
        tracing::info!(url = %resolved, "navigating after booking update");
        self.write_line(format!("Redirecting to {}", resolved)).await;
    }
}
