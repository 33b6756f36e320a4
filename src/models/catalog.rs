//! 目录/评分列表的响应数据结构

use serde::{Deserialize, Serialize};

/// 部门及其测验数量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(rename = "departmentname")]
    pub department_name: String,
    #[serde(rename = "noofquizzes")]
    pub quiz_count: u64,
}

/// 测验列表项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub department: String,
}

/// 用户的单次测验得分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizScore {
    pub quiz_id: u64,
    pub quiz_name: String,
    pub score: i64,
}
