use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use edulearn_core::config::AppConfig;
use toml::Value;

struct ConfigField {
    key: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

pub fn run(config: &AppConfig, explicit_path: Option<&Path>) -> String {
    let config_file_path = detect_config_path(explicit_path);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    lines.extend(fields(config).into_iter().map(|field| {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        render_line(field.key, &field.value, source)
    }));

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<ConfigField> {
    let add_ons = &config.pricing.add_ons;
    let discounts = &config.pricing.discounts;
    vec![
        ConfigField {
            key: "pricing.add_ons.practice_question_set",
            env_keys: &["EDULEARN_PRICING_PRACTICE_QUESTION_SET"],
            value: format!("{:.2}", add_ons.practice_question_set),
        },
        ConfigField {
            key: "pricing.add_ons.live_mentor_support",
            env_keys: &["EDULEARN_PRICING_LIVE_MENTOR_SUPPORT"],
            value: format!("{:.2}", add_ons.live_mentor_support),
        },
        ConfigField {
            key: "pricing.discounts.special_amount",
            env_keys: &["EDULEARN_PRICING_SPECIAL_AMOUNT"],
            value: format!("{:.2}", discounts.special_amount),
        },
        ConfigField {
            key: "pricing.discounts.special_min_duration_hours",
            env_keys: &["EDULEARN_PRICING_SPECIAL_MIN_DURATION_HOURS"],
            value: discounts.special_min_duration_hours.to_string(),
        },
        ConfigField {
            key: "pricing.discounts.multi_module_amount",
            env_keys: &["EDULEARN_PRICING_MULTI_MODULE_AMOUNT"],
            value: format!("{:.2}", discounts.multi_module_amount),
        },
        ConfigField {
            key: "pricing.discounts.multi_module_min_modules",
            env_keys: &["EDULEARN_PRICING_MULTI_MODULE_MIN_MODULES"],
            value: discounts.multi_module_min_modules.to_string(),
        },
        ConfigField {
            key: "pricing.discounts.developing_country_student_amount",
            env_keys: &["EDULEARN_PRICING_DEVELOPING_COUNTRY_STUDENT_AMOUNT"],
            value: format!("{:.2}", discounts.developing_country_student_amount),
        },
        ConfigField {
            key: "pricing.discounts.eligibility",
            env_keys: &["EDULEARN_PRICING_ELIGIBILITY"],
            value: format!("{:?}", discounts.eligibility),
        },
        ConfigField {
            key: "logging.level",
            env_keys: &["EDULEARN_LOGGING_LEVEL", "EDULEARN_LOG_LEVEL"],
            value: config.logging.level.clone(),
        },
        ConfigField {
            key: "logging.format",
            env_keys: &["EDULEARN_LOGGING_FORMAT", "EDULEARN_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format),
        },
    ]
}

fn detect_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    let root = PathBuf::from("edulearn.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/edulearn.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
