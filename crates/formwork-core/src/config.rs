/// Configuration for a Formwork application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// BCP 47 locale tag for widgets that do not set their own.
    /// `None` asks the operating system.
    pub locale: Option<String>,
    pub benchmark: BenchmarkMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: crate::logging::DEFAULT_FILTER.to_string(),
            locale: None,
            benchmark: BenchmarkMode::Off,
        }
    }
}

impl Config {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_benchmark(mut self, benchmark: BenchmarkMode) -> Self {
        self.benchmark = benchmark;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BenchmarkMode {
    /// Benchmarking is disabled
    #[default]
    Off,
    /// Profiling scopes are recorded in-process
    On,
    /// Profiling scopes are recorded and served to `puffin_viewer`
    WithWebserver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_locale("en-US")
            .with_log_filter("warn")
            .with_benchmark(BenchmarkMode::On);
        assert_eq!(config.locale.as_deref(), Some("en-US"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.benchmark, BenchmarkMode::On);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.locale, None);
        assert_eq!(config.benchmark, BenchmarkMode::Off);
    }
}
