//! Configuration adapters.

mod layered;
mod render;

pub use layered::{
    ENV_PREFIX, ENV_SEPARATOR, LayeredConfiguration, LayeredConfigurationBuilder,
    PROJECT_FILE_NAME,
};
