mod settings;

pub use settings::{
    EngineProviderSetting, EngineSettings, ServerSettings, Settings, StorageSettings,
    UploadSettings,
};
