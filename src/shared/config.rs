use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// インメモリのモックバックエンド
    #[default]
    Memory,
    /// リモートのレコードストア
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub mode: BackendMode,
    /// リモートストアの接続先（Memoryモードでは未使用）
    #[serde(default)]
    pub store_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// テーブルごとのブロードキャストチャネル容量
    pub channel_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                mode: BackendMode::Memory,
                store_url: None,
            },
            realtime: RealtimeConfig {
                channel_capacity: 256,
            },
        }
    }
}

impl AppConfig {
    /// 環境変数からバックエンド選択を上書きする
    ///
    /// `GUARDPOST_BACKEND=memory|remote`、`GUARDPOST_STORE_URL=<url>`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        match std::env::var("GUARDPOST_BACKEND").ok().as_deref() {
            Some("remote") => config.backend.mode = BackendMode::Remote,
            Some("memory") | None => {}
            Some(other) => {
                tracing::warn!("Unknown GUARDPOST_BACKEND value: {}, using memory", other);
            }
        }
        if let Ok(url) = std::env::var("GUARDPOST_STORE_URL") {
            config.backend.store_url = Some(url);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_memory_backend() {
        let config = AppConfig::default();
        assert_eq!(config.backend.mode, BackendMode::Memory);
        assert!(config.backend.store_url.is_none());
        assert!(config.realtime.channel_capacity > 0);
    }

    #[test]
    fn backend_mode_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BackendMode::Remote).unwrap(),
            "\"remote\""
        );
    }
}
