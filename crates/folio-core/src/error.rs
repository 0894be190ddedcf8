use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Section order must contain at least one section")]
    EmptySectionOrder,

    #[error("Duplicate section id: {0}")]
    DuplicateSection(String),

    #[error("Input binding error: {0}")]
    InputBinding(String),
}

pub type Result<T> = std::result::Result<T, Error>;
