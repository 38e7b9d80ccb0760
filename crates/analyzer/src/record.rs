//! 도메인 타입 — 파싱된 방화벽 이벤트 레코드
//!
//! [`LogRecord`]는 로그 한 줄에서 추출된 연결 이벤트를 나타냅니다.
//! 모든 필드는 원본 텍스트 그대로 저장됩니다 (검증/정규화 없음).

use std::fmt;

use serde::{Deserialize, Serialize};

/// 방화벽 연결 이벤트 레코드
///
/// 여섯 개 필드가 모두 추출된 경우에만 존재합니다 (부분 매칭 없음).
/// 포트 필드는 숫자로만 구성된 텍스트이지만 범위 검증은 하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// 출발지 주소 토큰
    pub src_ip: String,
    /// 목적지 주소 토큰
    pub dst_ip: String,
    /// 프로토콜 토큰 (예: "TCP", "UDP") — 대소문자 보존
    pub protocol: String,
    /// 출발지 포트 (숫자 텍스트)
    pub src_port: String,
    /// 목적지 포트 (숫자 텍스트)
    pub dst_port: String,
    /// 처리 결과 토큰 (예: "ALLOWED", "BLOCKED")
    pub action: String,
}

impl LogRecord {
    /// 필드 이름 목록 — 테이블 헤더와 이름 기반 조회의 정규 순서
    pub const FIELD_NAMES: [&'static str; 6] = [
        "src_ip", "dst_ip", "protocol", "src_port", "dst_port", "action",
    ];

    /// 필드 이름으로 값을 조회합니다.
    ///
    /// 알려지지 않은 이름은 `None`을 반환합니다.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "src_ip" => Some(&self.src_ip),
            "dst_ip" => Some(&self.dst_ip),
            "protocol" => Some(&self.protocol),
            "src_port" => Some(&self.src_port),
            "dst_port" => Some(&self.dst_port),
            "action" => Some(&self.action),
            _ => None,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{} proto={} action={}",
            self.src_ip, self.src_port, self.dst_ip, self.dst_port, self.protocol, self.action,
        )
    }
}
