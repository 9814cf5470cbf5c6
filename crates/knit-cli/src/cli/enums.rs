use clap::ValueEnum;
use knit_config::Format;

/// Text format for printed and generated configuration
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON, pretty-printed
    #[value(name = "json")]
    Json,

    /// TOML (the default for new projects)
    #[default]
    #[value(name = "toml")]
    Toml,

    /// YAML
    #[value(name = "yaml", alias = "yml")]
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Toml => Format::Toml,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}
