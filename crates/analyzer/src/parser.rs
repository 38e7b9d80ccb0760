//! 방화벽 로그 라인 파서
//!
//! 고정 형식의 여섯 토큰을 인식하여 [`LogRecord`]를 추출합니다:
//!
//! ```text
//! SRC=<src_ip> DST=<dst_ip> PROTO=<protocol> SPT=<src_port> DPT=<dst_port> ACTION=<action>
//! ```
//!
//! 토큰 순서는 고정이며 키는 대소문자를 구분합니다. 여섯 토큰 앞뒤의
//! 텍스트(타임스탬프, 프로세스명 등)는 무시됩니다. 매칭 실패는 에러가
//! 아니라 `None`입니다 -- 형식이 다른 라인은 조용히 건너뜁니다.
//!
//! # 사용 예시
//! ```
//! use firetrail_analyzer::parser::LineParser;
//!
//! let parser = LineParser::new().expect("pattern compiles");
//! let record = parser
//!     .parse("Jan 1 00:00:00 kernel: SRC=10.0.0.2 DST=10.0.0.1 PROTO=UDP SPT=53 DPT=40000 ACTION=ALLOWED")
//!     .expect("line matches");
//! assert_eq!(record.protocol, "UDP");
//! ```

use regex::Regex;

use crate::error::AnalyzerError;
use crate::record::LogRecord;

/// 여섯 토큰 인식 패턴
///
/// 포트 토큰은 숫자만 허용합니다. 숫자 뒤에 공백이 아닌 문자가 오면
/// 짧은 숫자 구간으로 부분 매칭되지 않고 라인 전체가 매칭에 실패합니다.
/// 앵커 없이 검색하므로 라인 중간 어디에서든 매칭됩니다.
const LINE_PATTERN: &str = r"SRC=(?P<src_ip>\S+) DST=(?P<dst_ip>\S+) PROTO=(?P<protocol>\S+) SPT=(?P<src_port>\d+) DPT=(?P<dst_port>\d+) ACTION=(?P<action>\S+)";

/// 방화벽 로그 라인 파서
///
/// 패턴은 생성 시 한 번 컴파일되어 재사용됩니다.
pub struct LineParser {
    /// 컴파일된 라인 패턴
    pattern: Regex,
    /// 최대 허용 라인 길이 (바이트) -- 초과 라인은 매칭 없이 건너뜀
    max_line_length: usize,
}

impl LineParser {
    /// 기본 설정으로 새 파서를 생성합니다.
    pub fn new() -> Result<Self, AnalyzerError> {
        Ok(Self {
            pattern: Regex::new(LINE_PATTERN)?,
            max_line_length: 64 * 1024, // 64KB
        })
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn with_max_line_length(mut self, length: usize) -> Self {
        self.max_line_length = length;
        self
    }

    /// 최대 라인 길이를 반환합니다.
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// 로그 라인 하나를 파싱합니다.
    ///
    /// 여섯 토큰이 모두 존재하면 추출된 [`LogRecord`]를, 아니면 `None`을
    /// 반환합니다. 앞뒤 공백은 매칭 전에 제거됩니다. 이 연산은 실패하지
    /// 않습니다 -- match/no-match만 구분합니다.
    pub fn parse(&self, line: &str) -> Option<LogRecord> {
        let line = line.trim();

        if line.len() > self.max_line_length {
            tracing::trace!(
                length = line.len(),
                max = self.max_line_length,
                "line exceeds max length, skipped"
            );
            return None;
        }

        match self.pattern.captures(line) {
            Some(caps) => {
                let record = LogRecord {
                    src_ip: caps["src_ip"].to_owned(),
                    dst_ip: caps["dst_ip"].to_owned(),
                    protocol: caps["protocol"].to_owned(),
                    src_port: caps["src_port"].to_owned(),
                    dst_port: caps["dst_port"].to_owned(),
                    action: caps["action"].to_owned(),
                };
                tracing::trace!(record = %record, "line matched");
                Some(record)
            }
            None => {
                tracing::trace!(line, "line skipped");
                None
            }
        }
    }
}

/// 파싱 결정 관찰 싱크
///
/// 집계 중 라인별 match/skip 결정을 수신합니다. 반환 데이터와는 완전히
/// 분리된 사이드 채널입니다 -- 원본 구현의 전역 콘솔 출력을 대체합니다.
/// 라인 번호는 1부터 시작합니다.
pub trait ParseDiagnostics {
    /// 라인이 레코드로 추출되었을 때 호출됩니다.
    fn matched(&mut self, line_no: usize, record: &LogRecord) {
        let _ = (line_no, record);
    }

    /// 라인이 매칭 없이 건너뛰어졌을 때 호출됩니다.
    fn skipped(&mut self, line_no: usize, line: &str) {
        let _ = (line_no, line);
    }
}

/// match/skip 카운터 -- 가장 단순한 진단 싱크
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// 레코드로 추출된 라인 수
    pub matched: u64,
    /// 건너뛴 라인 수
    pub skipped: u64,
}

impl ParseDiagnostics for ParseStats {
    fn matched(&mut self, _line_no: usize, _record: &LogRecord) {
        self.matched += 1;
    }

    fn skipped(&mut self, _line_no: usize, _line: &str) {
        self.skipped += 1;
    }
}
