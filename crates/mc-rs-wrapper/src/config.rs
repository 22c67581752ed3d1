use mc_rs_command::Options;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct WrapperConfig {
    pub server: ServerSection,
    #[serde(default)]
    pub files: FilesSection,
    #[serde(default)]
    pub extensions: ExtensionsSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Program that runs the game server, e.g. `java`.
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_working_dir")]
    pub working_dir: String,
    /// Send `save-on` once the server is started.
    #[serde(default)]
    pub auto_save: bool,
    /// Flip `spawn-monsters` for this run and restore it on exit.
    #[serde(default)]
    pub temp_mobs: bool,
}

fn default_working_dir() -> String {
    ".".into()
}

/// Paths relative to the server's working directory.
#[derive(Debug, Deserialize)]
pub struct FilesSection {
    #[serde(default = "default_ops_file")]
    pub ops: String,
    #[serde(default = "default_properties_file")]
    pub properties: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_ops_file() -> String {
    "ops.txt".into()
}

fn default_properties_file() -> String {
    "server.properties".into()
}

fn default_data_dir() -> String {
    "extensions".into()
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            ops: default_ops_file(),
            properties: default_properties_file(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtensionsSection {
    #[serde(default = "default_vote_threshold")]
    pub vote_threshold: u32,
    /// Seconds. Default: 300.
    #[serde(default = "default_vote_expiration")]
    pub vote_expiration: u64,
    #[serde(default = "default_rules")]
    pub rules: String,
    #[serde(default)]
    pub welcome: String,
    /// State flush interval in seconds. 0 = only on disconnect and exit.
    #[serde(default = "default_save_frequency")]
    pub save_frequency: u64,
}

fn default_vote_threshold() -> u32 {
    Options::default().vote_threshold
}

fn default_vote_expiration() -> u64 {
    Options::default().vote_expiration
}

fn default_rules() -> String {
    Options::default().rules
}

fn default_save_frequency() -> u64 {
    Options::default().save_frequency
}

impl Default for ExtensionsSection {
    fn default() -> Self {
        Self {
            vote_threshold: default_vote_threshold(),
            vote_expiration: default_vote_expiration(),
            rules: default_rules(),
            welcome: String::new(),
            save_frequency: default_save_frequency(),
        }
    }
}

impl ExtensionsSection {
    /// Dispatcher options from this section.
    pub fn to_options(&self) -> Options {
        Options {
            vote_threshold: self.vote_threshold,
            vote_expiration: self.vote_expiration,
            rules: self.rules.clone(),
            welcome: self.welcome.clone(),
            save_frequency: self.save_frequency,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

impl WrapperConfig {
    /// Read and parse a `wrapper.toml` file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
