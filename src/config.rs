use std::env;

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    pub model_id: Option<String>,
    pub sampler: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: None,
            model_id: None,
            sampler: None,
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("SD_API_URL").ok();
        let model_id = env::var("SD_MODEL_ID").ok();
        let sampler = env::var("SD_SAMPLER").ok();

        GatewayConfig {
            base_url,
            model_id,
            sampler,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    /// Base URL of the Stable Diffusion WebUI-compatible runtime.
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| "http://127.0.0.1:7860".to_string())
    }

    /// Model identifier used to select a checkpoint on the runtime.
    pub fn resolved_model_id(&self) -> String {
        self.model_id
            .clone()
            .unwrap_or_else(|| "runwayml/stable-diffusion-v1-5".to_string())
    }

    /// Noise sampler applied to every generation request.
    pub fn resolved_sampler(&self) -> String {
        self.sampler.clone().unwrap_or_else(|| "Euler".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: Option<u16>,
    pub gateway: Option<GatewayConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: None,
            gateway: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let port = env::var("PORT").ok().and_then(|port| port.parse().ok());

        Config {
            port,
            gateway: Some(GatewayConfig::from_env()),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_gateway(mut self, config: GatewayConfig) -> Self {
        self.gateway = Some(config);
        self
    }

    pub fn gateway(&self) -> GatewayConfig {
        self.gateway.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_defaults() {
        let config = GatewayConfig::new();
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:7860");
        assert_eq!(config.resolved_model_id(), "runwayml/stable-diffusion-v1-5");
        assert_eq!(config.resolved_sampler(), "Euler");
    }

    #[test]
    fn test_gateway_builders() {
        let config = GatewayConfig::new()
            .with_base_url("http://10.0.0.2:7860")
            .with_model("sd-v1-5")
            .with_sampler("Euler a");
        assert_eq!(config.resolved_base_url(), "http://10.0.0.2:7860");
        assert_eq!(config.resolved_model_id(), "sd-v1-5");
        assert_eq!(config.resolved_sampler(), "Euler a");
    }

    #[test]
    fn test_config_with_gateway() {
        let config = Config::new()
            .with_port(9090)
            .with_gateway(GatewayConfig::new().with_model("sd-v1-5"));
        assert_eq!(config.port, Some(9090));
        assert_eq!(config.gateway().resolved_model_id(), "sd-v1-5");
    }
}
