use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub storage: StorageSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub provider: EngineProviderSetting,
    /// Bare whisper size selector or full model repo id.
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// Engine pool permits; HTTP concurrency beyond this queues.
    pub max_concurrent: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineProviderSetting {
    Local,
    OpenAi,
}

impl EngineProviderSetting {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "local" => Some(Self::Local),
            "openai" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub history_dir: PathBuf,
}

impl StorageSettings {
    /// The ordered history document.
    pub fn document_path(&self) -> PathBuf {
        self.history_dir.join("history.json")
    }

    /// Storage area owned by the blob store.
    pub fn audio_dir(&self) -> PathBuf {
        self.history_dir.join("audio")
    }
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Settings {
    pub fn from_env() -> Self {
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(9000);

        let provider = env::var("TRANSCRIPTION_PROVIDER")
            .ok()
            .and_then(|v| EngineProviderSetting::parse(&v))
            .unwrap_or(EngineProviderSetting::Local);

        let model = env::var("WHISPER_MODEL_SIZE").unwrap_or_else(|_| "medium".to_string());

        let max_concurrent = env::var("ENGINE_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2);

        let history_dir = env::var("HISTORY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("history"));

        let max_file_size_mb = env::var("MAX_UPLOAD_MB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        Self {
            server: ServerSettings { port },
            engine: EngineSettings {
                provider,
                model,
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("OPENAI_BASE_URL").ok(),
                max_concurrent,
            },
            storage: StorageSettings { history_dir },
            upload: UploadSettings { max_file_size_mb },
        }
    }
}
