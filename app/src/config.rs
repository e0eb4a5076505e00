use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Root directory files are uploaded from and deleted out of. Fatal if
    /// empty — see `UploadAgentConfig::validate`.
    pub data_container_path: String,

    #[serde(default)]
    pub kafka: KafkaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    #[serde(default = "KafkaConfig::default_bootstrap_servers")]
    pub bootstrap_servers: String,

    #[serde(default = "KafkaConfig::default_group_id")]
    pub group_id: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: Self::default_bootstrap_servers(),
            group_id: Self::default_group_id(),
        }
    }
}

impl KafkaConfig {
    fn default_bootstrap_servers() -> String {
        "localhost:9092".to_owned()
    }

    fn default_group_id() -> String {
        "upload-agent".to_owned()
    }
}

impl AgentConfig {
    /// Load from `config/default.yaml` (if present) overlaid by
    /// `UPLOAD_AGENT_*` environment variables, mirroring the teacher's
    /// `config`-crate-based layering.
    pub fn load() -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("UPLOAD_AGENT").separator("__"))
            .build()?;

        let agent_config: AgentConfig = settings.try_deserialize()?;
        agent_config.validate()?;
        Ok(agent_config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.data_container_path.is_empty(),
            "data_container_path is empty, refusing to start"
        );
        Ok(())
    }
}
