//! Configuration loading for roundtable
//!
//! Two inputs configure a run:
//!
//! - Application settings (TOML, merged by [`ConfigLoader`]). Priority
//!   order (highest to lowest):
//!   1. `--config <path>` specified file
//!   2. Project root: `./roundtable.toml` or `./.roundtable.toml`
//!   3. XDG config: `$XDG_CONFIG_HOME/roundtable/config.toml`
//!   4. Environment: `ROUNDTABLE_<SECTION>__<KEY>`
//!   5. Default values
//! - The scenario (JSON, [`ScenarioConfig`]): who sits at the table and
//!   what they start talking about.

mod file_config;
mod loader;
mod scenario;

pub use file_config::{
    ConfigValidationError, FileConfig, FileListenerConfig, FileLlmConfig, FileOutputConfig,
    FileProcessorConfig, FileVotingConfig,
};
pub use loader::ConfigLoader;
pub use scenario::{ScenarioAgent, ScenarioConfig, ScenarioError};
