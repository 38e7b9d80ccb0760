//! 분석기 에러 타입
//!
//! [`AnalyzerError`]는 파이프라인 내부에서 발생하는 모든 에러를 표현합니다.
//! 인식되지 않는 로그 라인은 에러가 아니라 파서의 `None` 결과이며,
//! 빈 결과 컬렉션 역시 에러가 아닌 보고 가능한 상태입니다.

/// 분석기 도메인 에러
///
/// 소스 접근, 설정 로딩/검증, 패턴 컴파일, I/O 에러를 포괄합니다.
/// 파이프라인을 조기에 중단시키는 조건은 `SourceUnavailable`뿐입니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    /// 로그 소스를 열 수 없음 (파일 없음 등)
    #[error("log source unavailable: {path}")]
    SourceUnavailable {
        /// 접근에 실패한 소스 경로
        path: String,
    },

    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// 설정 파일 경로
        path: String,
    },

    /// 설정 파싱 실패
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// 유효하지 않은 설정 값
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 라인 패턴 컴파일 에러
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O 에러 (소스 없음 이외의 읽기 실패)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_unavailable_display() {
        let err = AnalyzerError::SourceUnavailable {
            path: "firewall_logs.txt".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("log source unavailable"));
        assert!(msg.contains("firewall_logs.txt"));
    }

    #[test]
    fn config_error_display() {
        let err = AnalyzerError::Config {
            field: "filter_field".to_owned(),
            reason: "unknown record field 'severity'".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("filter_field"));
        assert!(msg.contains("severity"));
    }

    #[test]
    fn config_not_found_display() {
        let err = AnalyzerError::ConfigNotFound {
            path: "/etc/firetrail/firetrail.toml".to_owned(),
        };
        assert!(err.to_string().contains("firetrail.toml"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AnalyzerError = io_err.into();
        assert!(matches!(err, AnalyzerError::Io(_)));
    }
}
