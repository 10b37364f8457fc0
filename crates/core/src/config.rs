use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::add_ons::AddOnRates;
use crate::pricing::discounts::{DiscountPolicy, EligibilityMode};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PricingConfig {
    pub add_ons: AddOnRates,
    pub discounts: DiscountPolicy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".to_string(), format: LogFormat::Compact }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub eligibility: Option<EligibilityMode>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("edulearn.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(add_ons) = pricing.add_ons {
                if let Some(value) = add_ons.practice_question_set {
                    self.pricing.add_ons.practice_question_set = value;
                }
                if let Some(value) = add_ons.live_mentor_support {
                    self.pricing.add_ons.live_mentor_support = value;
                }
            }

            if let Some(discounts) = pricing.discounts {
                let policy = &mut self.pricing.discounts;
                if let Some(value) = discounts.special_amount {
                    policy.special_amount = value;
                }
                if let Some(value) = discounts.special_min_duration_hours {
                    policy.special_min_duration_hours = value;
                }
                if let Some(value) = discounts.multi_module_amount {
                    policy.multi_module_amount = value;
                }
                if let Some(value) = discounts.multi_module_min_modules {
                    policy.multi_module_min_modules = value;
                }
                if let Some(value) = discounts.developing_country_student_amount {
                    policy.developing_country_student_amount = value;
                }
                if let Some(value) = discounts.eligibility {
                    policy.eligibility = value;
                }
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let add_ons = &mut self.pricing.add_ons;
        if let Some(value) = read_env("EDULEARN_PRICING_PRACTICE_QUESTION_SET") {
            add_ons.practice_question_set =
                parse_decimal("EDULEARN_PRICING_PRACTICE_QUESTION_SET", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_LIVE_MENTOR_SUPPORT") {
            add_ons.live_mentor_support =
                parse_decimal("EDULEARN_PRICING_LIVE_MENTOR_SUPPORT", &value)?;
        }

        let policy = &mut self.pricing.discounts;
        if let Some(value) = read_env("EDULEARN_PRICING_SPECIAL_AMOUNT") {
            policy.special_amount = parse_decimal("EDULEARN_PRICING_SPECIAL_AMOUNT", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_SPECIAL_MIN_DURATION_HOURS") {
            policy.special_min_duration_hours =
                parse_decimal("EDULEARN_PRICING_SPECIAL_MIN_DURATION_HOURS", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_MULTI_MODULE_AMOUNT") {
            policy.multi_module_amount =
                parse_decimal("EDULEARN_PRICING_MULTI_MODULE_AMOUNT", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_MULTI_MODULE_MIN_MODULES") {
            policy.multi_module_min_modules =
                parse_u32("EDULEARN_PRICING_MULTI_MODULE_MIN_MODULES", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_DEVELOPING_COUNTRY_STUDENT_AMOUNT") {
            policy.developing_country_student_amount =
                parse_decimal("EDULEARN_PRICING_DEVELOPING_COUNTRY_STUDENT_AMOUNT", &value)?;
        }
        if let Some(value) = read_env("EDULEARN_PRICING_ELIGIBILITY") {
            policy.eligibility = value.parse()?;
        }

        let log_level =
            read_env("EDULEARN_LOGGING_LEVEL").or_else(|| read_env("EDULEARN_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("EDULEARN_LOGGING_FORMAT").or_else(|| read_env("EDULEARN_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(eligibility) = overrides.eligibility {
            self.pricing.discounts.eligibility = eligibility;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_add_ons(&self.pricing.add_ons)?;
        validate_discounts(&self.pricing.discounts)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("edulearn.toml"), PathBuf::from("config/edulearn.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_add_ons(add_ons: &AddOnRates) -> Result<(), ConfigError> {
    ensure_non_negative("pricing.add_ons.practice_question_set", add_ons.practice_question_set)?;
    ensure_non_negative("pricing.add_ons.live_mentor_support", add_ons.live_mentor_support)
}

fn validate_discounts(policy: &DiscountPolicy) -> Result<(), ConfigError> {
    ensure_non_negative("pricing.discounts.special_amount", policy.special_amount)?;
    ensure_non_negative(
        "pricing.discounts.special_min_duration_hours",
        policy.special_min_duration_hours,
    )?;
    ensure_non_negative("pricing.discounts.multi_module_amount", policy.multi_module_amount)?;
    ensure_non_negative(
        "pricing.discounts.developing_country_student_amount",
        policy.developing_country_student_amount,
    )?;

    if policy.multi_module_min_modules == 0 {
        return Err(ConfigError::Validation(
            "pricing.discounts.multi_module_min_modules must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn ensure_non_negative(key: &str, value: Decimal) -> Result<(), ConfigError> {
    if value < Decimal::ZERO {
        return Err(ConfigError::Validation(format!("{key} must be >= 0 (got {value})")));
    }
    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    add_ons: Option<AddOnsPatch>,
    discounts: Option<DiscountsPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct AddOnsPatch {
    practice_question_set: Option<Decimal>,
    live_mentor_support: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct DiscountsPatch {
    special_amount: Option<Decimal>,
    special_min_duration_hours: Option<Decimal>,
    multi_module_amount: Option<Decimal>,
    multi_module_min_modules: Option<u32>,
    developing_country_student_amount: Option<Decimal>,
    eligibility: Option<EligibilityMode>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
