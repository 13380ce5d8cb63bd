use crate::config::schema::Config;

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub fn validate_config(config: &Config) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    validate_store_name(&config.store.name, &mut errors);

    if let Some(dir) = &config.store.data_dir {
        if dir.exists() && !dir.is_dir() {
            errors.push(ValidationError {
                field: "store.data_dir".to_string(),
                message: format!("{} exists but is not a directory", dir.display()),
                suggestion: None,
            });
        } else if !dir.exists() {
            warnings.push(ValidationWarning {
                field: "store.data_dir".to_string(),
                message: format!("{} does not exist yet; it will be created", dir.display()),
            });
        }
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError {
            field: "logging.level".to_string(),
            message: format!("Unknown log level '{}'", config.logging.level),
            suggestion: Some(format!("Use one of: {}", LOG_LEVELS.join(", "))),
        });
    }

    if let Some(file) = &config.logging.file {
        if file.is_dir() {
            errors.push(ValidationError {
                field: "logging.file".to_string(),
                message: format!("{} is a directory", file.display()),
                suggestion: Some("Point logging.file at a file path".to_string()),
            });
        }
    }

    ValidationResult { errors, warnings }
}

fn validate_store_name(name: &str, errors: &mut Vec<ValidationError>) {
    if name.trim().is_empty() {
        errors.push(ValidationError {
            field: "store.name".to_string(),
            message: "Store name cannot be empty".to_string(),
            suggestion: Some("Use the default \"playerFlyState\"".to_string()),
        });
    } else if name.contains(['/', '\\']) || name == "." || name == ".." {
        errors.push(ValidationError {
            field: "store.name".to_string(),
            message: format!("Store name '{name}' must be a plain file name"),
            suggestion: Some("Set store.data_dir to choose the directory".to_string()),
        });
    }
}
