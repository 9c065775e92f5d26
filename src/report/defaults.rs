//! 报告字段的静态兜底值目录
//!
//! Writer阶段产出缺字段或整体解析失败时，由装配器逐字段回填，
//! 保证报告九个字段永远完整。

use super::{ImpactRadarEntry, NinetyDayPlan};

pub fn summary() -> String {
    "Executive overview of recent market developments.".to_string()
}

pub fn drivers() -> Vec<String> {
    vec![
        "Regulatory tightening".to_string(),
        "Increased compliance requirements".to_string(),
    ]
}

pub fn competitors() -> Vec<String> {
    vec![
        "Bajaj Finance".to_string(),
        "HDFC Ltd".to_string(),
        "Shriram Finance".to_string(),
        "Muthoot Finance".to_string(),
        "Manappuram Finance".to_string(),
    ]
}

pub fn impact_radar() -> Vec<ImpactRadarEntry> {
    vec![ImpactRadarEntry {
        event: "RBI releases new NBFC compliance guidelines".to_string(),
        impact_level: "High".to_string(),
        score: 85,
        why: vec![
            "Direct increase in compliance cost".to_string(),
            "Mandatory operational changes".to_string(),
        ],
        actions: vec![
            "Conduct internal audit".to_string(),
            "Update compliance workflows".to_string(),
        ],
        url: "https://rbi.org.in".to_string(),
    }]
}

pub fn opportunities() -> Vec<String> {
    vec![
        "Consolidation of smaller NBFCs".to_string(),
        "Growth in compliance-tech solutions".to_string(),
        "Stronger customer trust".to_string(),
        "Improved risk profiling".to_string(),
        "Digital governance tools".to_string(),
    ]
}

pub fn risks() -> Vec<String> {
    vec![
        "Higher operational costs".to_string(),
        "Delayed product launches".to_string(),
        "Regulatory penalties".to_string(),
        "Liquidity stress".to_string(),
        "Reduced short-term growth".to_string(),
    ]
}

pub fn ninety_day_plan() -> NinetyDayPlan {
    NinetyDayPlan {
        phase_0_30: vec![
            "Review regulatory changes".to_string(),
            "Assign compliance owners".to_string(),
        ],
        phase_30_60: vec![
            "Update internal processes".to_string(),
            "Train staff on new norms".to_string(),
        ],
        phase_60_90: vec![
            "Automate compliance checks".to_string(),
            "Engage external auditors".to_string(),
        ],
    }
}

pub fn sources() -> Vec<String> {
    vec![
        "https://rbi.org.in".to_string(),
        "https://sebi.gov.in".to_string(),
    ]
}
