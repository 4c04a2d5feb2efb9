use ago_config::Config;
use ago_core::Engine;
use ago_lang_english::DaumDictionary;
use anyhow::Context;

pub struct AppState {
    pub config: Config,
    pub engine: Engine,
    pub dictionary: DaumDictionary,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let engine = Engine::from_config(&config).with_context(|| {
            format!(
                "failed to open storage at {}",
                config.storage.data_dir.display()
            )
        })?;
        let dictionary = DaumDictionary::from_config(&config.dictionary)
            .context("failed to set up dictionary client")?;

        Ok(Self {
            config,
            engine,
            dictionary,
        })
    }
}
