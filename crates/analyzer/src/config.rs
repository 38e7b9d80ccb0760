//! 설정 관리 — firetrail.toml 파싱 및 런타임 설정
//!
//! [`FiretrailConfig`]는 CLI와 분석기가 공유하는 최상위 설정 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`FIRETRAIL_ANALYZER_LOG_FILE=/var/log/fw.log` 형식)
//! 3. 설정 파일 (`firetrail.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! 설정 파일이 없는 것은 분석 실행에서는 에러가 아닙니다 — 원본 동작과
//! 같이 고정 기본 경로로 동작합니다. [`FiretrailConfig::load`]는 엄격
//! 모드(파일 필수), [`FiretrailConfig::load_or_default`]는 기본값 허용
//! 모드입니다.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::record::LogRecord;

/// Firetrail 통합 설정
///
/// `firetrail.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FiretrailConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 분석기 설정
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

/// 일반 설정 (로깅)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "GeneralConfig::default_log_level")]
    pub log_level: String,
    /// 로그 출력 형식 (text, json)
    #[serde(default = "GeneralConfig::default_log_format")]
    pub log_format: String,
}

impl GeneralConfig {
    fn default_log_level() -> String {
        Self::default().log_level
    }
    fn default_log_format() -> String {
        Self::default().log_format
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "text".to_owned(),
        }
    }
}

/// 분석기 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// 분석 대상 로그 파일 경로
    #[serde(default = "AnalyzerConfig::default_log_file")]
    pub log_file: String,
    /// 기본 필터 필드 (레코드 필드 이름 중 하나)
    #[serde(default = "AnalyzerConfig::default_filter_field")]
    pub filter_field: String,
    /// 기본 필터 값
    #[serde(default = "AnalyzerConfig::default_filter_value")]
    pub filter_value: String,
    /// 최대 라인 길이 (바이트) — 초과 라인은 건너뜀
    #[serde(default = "AnalyzerConfig::default_max_line_length")]
    pub max_line_length: usize,
}

impl AnalyzerConfig {
    fn default_log_file() -> String {
        Self::default().log_file
    }
    fn default_filter_field() -> String {
        Self::default().filter_field
    }
    fn default_filter_value() -> String {
        Self::default().filter_value
    }
    fn default_max_line_length() -> usize {
        Self::default().max_line_length
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            log_file: "firewall_logs.txt".to_owned(),
            filter_field: "action".to_owned(),
            filter_value: "BLOCKED".to_owned(),
            max_line_length: 64 * 1024, // 64KB
        }
    }
}

impl FiretrailConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 파일이 없으면 [`AnalyzerError::ConfigNotFound`]를 반환합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AnalyzerError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                AnalyzerError::Io(e)
            }
        })?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 있으면 로드하고, 없으면 기본값에서 시작합니다.
    ///
    /// 두 경우 모두 환경변수 오버라이드와 검증이 적용됩니다.
    /// 파일이 존재하지만 깨져 있으면 에러입니다.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        match Self::load(&path) {
            Err(AnalyzerError::ConfigNotFound { path }) => {
                tracing::debug!(path, "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, AnalyzerError> {
        toml::from_str(toml_str).map_err(|e| AnalyzerError::ConfigParse(e.to_string()))
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `FIRETRAIL_{SECTION}_{FIELD}`
    /// 예: `FIRETRAIL_ANALYZER_LOG_FILE=/var/log/fw.log`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "FIRETRAIL_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "FIRETRAIL_GENERAL_LOG_FORMAT");

        // Analyzer
        override_string(&mut self.analyzer.log_file, "FIRETRAIL_ANALYZER_LOG_FILE");
        override_string(
            &mut self.analyzer.filter_field,
            "FIRETRAIL_ANALYZER_FILTER_FIELD",
        );
        override_string(
            &mut self.analyzer.filter_value,
            "FIRETRAIL_ANALYZER_FILTER_VALUE",
        );
        override_usize(
            &mut self.analyzer.max_line_length,
            "FIRETRAIL_ANALYZER_MAX_LINE_LENGTH",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        const LOG_FORMATS: &[&str] = &["text", "json"];

        if !LOG_FORMATS.contains(&self.general.log_format.as_str()) {
            return Err(AnalyzerError::Config {
                field: "general.log_format".to_owned(),
                reason: format!(
                    "unknown format '{}' (expected: text, json)",
                    self.general.log_format
                ),
            });
        }

        self.analyzer.validate()
    }
}

impl AnalyzerConfig {
    /// 분석기 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        const MAX_LINE_LENGTH_LIMIT: usize = 16 * 1024 * 1024; // 16MB

        if self.log_file.is_empty() {
            return Err(AnalyzerError::Config {
                field: "analyzer.log_file".to_owned(),
                reason: "log file path must not be empty".to_owned(),
            });
        }

        if !LogRecord::FIELD_NAMES.contains(&self.filter_field.as_str()) {
            return Err(AnalyzerError::Config {
                field: "analyzer.filter_field".to_owned(),
                reason: format!(
                    "unknown record field '{}' (expected one of: {})",
                    self.filter_field,
                    LogRecord::FIELD_NAMES.join(", ")
                ),
            });
        }

        if self.max_line_length == 0 || self.max_line_length > MAX_LINE_LENGTH_LIMIT {
            return Err(AnalyzerError::Config {
                field: "analyzer.max_line_length".to_owned(),
                reason: format!("must be 1-{MAX_LINE_LENGTH_LIMIT}"),
            });
        }

        Ok(())
    }
}

/// 분석기 설정 빌더
///
/// 3개 이상의 설정 필드가 있으므로 빌더 패턴을 사용합니다.
#[derive(Default)]
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 로그 파일 경로를 설정합니다.
    pub fn log_file(mut self, path: impl Into<String>) -> Self {
        self.config.log_file = path.into();
        self
    }

    /// 필터 필드를 설정합니다.
    pub fn filter_field(mut self, field: impl Into<String>) -> Self {
        self.config.filter_field = field.into();
        self
    }

    /// 필터 값을 설정합니다.
    pub fn filter_value(mut self, value: impl Into<String>) -> Self {
        self.config.filter_value = value.into();
        self
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn max_line_length(mut self, length: usize) -> Self {
        self.config.max_line_length = length;
        self
    }

    /// 설정을 검증하고 `AnalyzerConfig`를 생성합니다.
    pub fn build(self) -> Result<AnalyzerConfig, AnalyzerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// 환경변수가 존재하면 문자열 설정값을 교체합니다.
fn override_string(target: &mut String, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        *target = value;
    }
}

/// 환경변수가 존재하고 파싱 가능하면 usize 설정값을 교체합니다.
fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(value) = std::env::var(env_key) {
        match value.parse() {
            Ok(parsed) => *target = parsed,
            Err(_) => {
                tracing::warn!(env_key, value, "ignoring unparsable env override");
            }
        }
    }
}
