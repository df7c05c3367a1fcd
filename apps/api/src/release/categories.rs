//! Category registry: the fixed set of press-release kinds and the labeled
//! fields each one asks for.
//!
//! Field order is significant: it drives form rendering and prompt line order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// A (label, default text) pair. The default pre-fills the form field.
pub type FieldSpec = (&'static str, &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReleaseCategory {
    /// 활동보고
    ActivityReport,
    /// 성과보고
    AchievementReport,
    /// 행사안내
    EventNotice,
    /// 정보안내
    InformationNotice,
    /// 기타
    Other,
}

const ACTIVITY_REPORT_FIELDS: &[FieldSpec] = &[
    ("활동내용", "평택시 창의채움교육센터 운영위원회 개최"),
    (
        "활동경과",
        "기존 위원 임기 만료에 따른 신규위원 위촉장 수여, 평택미래교육협력지구 사업 현황 공유",
    ),
    ("향후계획", "인재양성을 위한 교육지원 사업 추진"),
];

const ACHIEVEMENT_REPORT_FIELDS: &[FieldSpec] = &[
    (
        "성과개요",
        "정장선 평택시장, 2024년 메니페스토 공약 이행 평가 '최우수(SA) 등급' 획득, 9대 분야 222개 공약, 2023년 목표 달성률 95.5%",
    ),
    (
        "우리시 입장, 당부사항",
        "시민 참여 및 소통 강조, 투명한 공약 실천 지속",
    ),
    (
        "향후계획",
        "시민 중심 새로운 평택 구현, 민선 8기 공약 이행률 향상 목표",
    ),
];

const EVENT_NOTICE_FIELDS: &[FieldSpec] = &[
    (
        "행사개요",
        "평택시 내리문화공원에서 7월 22일(토)부터 23일(일)까지 수국 전시회 개최.",
    ),
    (
        "세부내용",
        "수국 관람 외 자연물 만들기 체험행사, 음악행사, 내리물놀이터 개장 및 그늘막 설치.",
    ),
    (
        "참여방법",
        "가족 단위로 내리문화공원 방문, 체험행사는 매일 13시~17시 시간대별 운영.",
    ),
];

const INFORMATION_NOTICE_FIELDS: &[FieldSpec] = &[
    ("정보개요", "평택시도서관, 7월부터 책이음 상호대차 서비스 확대 운영."),
    (
        "세부내용",
        "평택시 14개 도서관에서 경기평택교육도서관 포함 15개 도서관으로 서비스 확대.",
    ),
    (
        "이용방법",
        "이용 문의는 도서관 누리집(www.ptlib.go.kr) 및 해당 도서관들로 가능.",
    ),
];

const OTHER_FIELDS: &[FieldSpec] = &[("개요", ""), ("필수 키워드1", ""), ("필수 키워드2", "")];

impl ReleaseCategory {
    /// All categories in display order.
    pub const ALL: [ReleaseCategory; 5] = [
        ReleaseCategory::ActivityReport,
        ReleaseCategory::AchievementReport,
        ReleaseCategory::EventNotice,
        ReleaseCategory::InformationNotice,
        ReleaseCategory::Other,
    ];

    /// The Korean category name shown to users and written into the prompt.
    pub fn name(self) -> &'static str {
        match self {
            ReleaseCategory::ActivityReport => "활동보고",
            ReleaseCategory::AchievementReport => "성과보고",
            ReleaseCategory::EventNotice => "행사안내",
            ReleaseCategory::InformationNotice => "정보안내",
            ReleaseCategory::Other => "기타",
        }
    }

    /// Ordered (label, default) pairs for this category.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ReleaseCategory::ActivityReport => ACTIVITY_REPORT_FIELDS,
            ReleaseCategory::AchievementReport => ACHIEVEMENT_REPORT_FIELDS,
            ReleaseCategory::EventNotice => EVENT_NOTICE_FIELDS,
            ReleaseCategory::InformationNotice => INFORMATION_NOTICE_FIELDS,
            ReleaseCategory::Other => OTHER_FIELDS,
        }
    }

    pub fn labels(self) -> impl Iterator<Item = &'static str> {
        self.fields().iter().map(|(label, _)| *label)
    }
}

/// Registry lookup: ordered (label, placeholder) pairs for `category`.
pub fn fields_for(category: ReleaseCategory) -> &'static [FieldSpec] {
    category.fields()
}

impl fmt::Display for ReleaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReleaseCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ReleaseCategory::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown release category: '{s}'")))
    }
}

impl TryFrom<String> for ReleaseCategory {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReleaseCategory> for String {
    fn from(category: ReleaseCategory) -> Self {
        category.name().to_string()
    }
}
