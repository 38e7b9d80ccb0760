//! 레코드 컬렉션 -- 순서 보존 저장과 동등 비교 필터
//!
//! [`LogCollection`]은 집계 결과를 담는 순서 있는 레코드 시퀀스입니다.
//! 삽입 순서 = 입력 라인 순서이며, 중복이 허용됩니다. 집계가 끝나
//! 호출자에게 반환된 뒤에는 불변 값으로 취급됩니다.

use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// 파싱된 레코드의 순서 있는 컬렉션
///
/// 원본 구현의 범용 데이터프레임을 고정 레코드 타입의 선형 컬렉션과
/// 필드 동등 필터로 대체합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogCollection {
    records: Vec<LogRecord>,
}

impl LogCollection {
    /// 빈 컬렉션을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 레코드 벡터에서 컬렉션을 생성합니다.
    pub fn from_records(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    /// 레코드를 끝에 추가합니다.
    pub fn push(&mut self, record: LogRecord) {
        self.records.push(record);
    }

    /// 레코드 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 컬렉션이 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 레코드 슬라이스를 반환합니다.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// 레코드 이터레이터를 반환합니다.
    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }

    /// 컬렉션을 레코드 벡터로 변환합니다.
    pub fn into_records(self) -> Vec<LogRecord> {
        self.records
    }

    /// 필드 동등 비교로 부분 컬렉션을 만듭니다.
    ///
    /// 대소문자 구분, 정규화 없는 정확한 일치입니다. 원본 컬렉션은
    /// 변경되지 않으며 순서가 보존됩니다. 알려지지 않은 필드 이름은
    /// 어떤 레코드와도 일치하지 않으므로 빈 컬렉션을 반환합니다.
    pub fn filter_by_field(&self, field: &str, value: &str) -> Self {
        self.records
            .iter()
            .filter(|record| record.field(field) == Some(value))
            .cloned()
            .collect()
    }
}

impl FromIterator<LogRecord> for LogCollection {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LogCollection {
    type Item = LogRecord;
    type IntoIter = std::vec::IntoIter<LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a LogCollection {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
