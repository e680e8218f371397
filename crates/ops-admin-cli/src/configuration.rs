use anyhow::Context as _;
use ops_shared::const_config::client::{
    CLIENT_DEFAULT_SERVER_ADDRESS, CLIENT_MAX_REQUEST_TIMEOUT_SECS,
};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use std::{path::Path, time::Duration};

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub client: ClientSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ClientSettings {
    pub server_address: String,
    /// No timeout is applied when absent
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub request_timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn request_timeout(&self) -> anyhow::Result<Option<Duration>> {
        match self.request_timeout_secs {
            None => Ok(None),
            Some(0) => anyhow::bail!("request timeout must be greater than 0"),
            Some(secs) if secs > CLIENT_MAX_REQUEST_TIMEOUT_SECS => anyhow::bail!(
                "request timeout of {secs} exceeds maximum of {CLIENT_MAX_REQUEST_TIMEOUT_SECS} seconds"
            ),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
        }
    }
}

pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("failed to parse APP_ENVIRONMENT")?;
    load_configuration(&base_path.join("configuration"), &environment)
}

pub fn load_configuration(
    configuration_directory: &Path,
    environment: &Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.toml")).required(false))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename)).required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_CLIENT__SERVER_ADDRESS=http://10.0.0.5:8789` would set `Configuration.client.server_address`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_default("client.server_address", CLIENT_DEFAULT_SERVER_ADDRESS)?
        .build()
        .context("failed to build configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("local", Environment::Local)]
    #[case("Production", Environment::Production)]
    fn environment_from_string(#[case] input: &str, #[case] expected: Environment) {
        let actual: Environment = input.to_string().try_into().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn unknown_environment_rejected() {
        let actual: Result<Environment, _> = "staging".to_string().try_into();
        assert!(actual.unwrap_err().contains("staging"));
    }

    #[test]
    fn shipped_local_configuration_loads() {
        // Arrange
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("configuration");

        // Act
        let actual = load_configuration(&dir, &Environment::Local).unwrap();

        // Assert
        assert!(!actual.client.server_address.is_empty());
        assert!(actual.client.request_timeout().unwrap().is_some());
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-dir");
        let actual = load_configuration(&dir, &Environment::Production).unwrap();
        assert_eq!(actual.client.server_address, CLIENT_DEFAULT_SERVER_ADDRESS);
        assert_eq!(actual.client.request_timeout_secs, None);
    }

    #[rstest]
    #[case(None, Ok(None))]
    #[case(Some(30), Ok(Some(Duration::from_secs(30))))]
    #[case(Some(0), Err(()))]
    #[case(Some(CLIENT_MAX_REQUEST_TIMEOUT_SECS + 1), Err(()))]
    fn timeout_bounds(#[case] secs: Option<u64>, #[case] expected: Result<Option<Duration>, ()>) {
        // Arrange
        let settings = ClientSettings {
            server_address: CLIENT_DEFAULT_SERVER_ADDRESS.to_string(),
            request_timeout_secs: secs,
        };

        // Act
        let actual = settings.request_timeout().map_err(|_| ());

        // Assert
        assert_eq!(actual, expected);
    }
}
