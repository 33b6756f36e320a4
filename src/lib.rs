//! # Quiz Portal
//!
//! 测验平台的终端客户端：注册、登录、按部门浏览并作答测验、查看成绩；
//! 管理员可以创建、更新和删除测验。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 三个后端服务的 HTTP 客户端，共用一个带 cookie 的
//!   `reqwest::Client`（有界超时、无重试）
//! - `UserClient` / `QuizClient` / `TestClient`
//!
//! ### ② 模型层（Models）
//! - `models/quiz` - 测验表单模型：互斥勾选、answer 即时推导
//! - `models/take` / `models/catalog` - 答题与列表的线上数据结构
//! - `models/loaders` - TOML 草稿导入
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/create_flow` - 创建序列编排（头部 → 逐题，首败即停）
//! - `workflow/session_ctx` - 页面间传递的会话上下文
//!
//! ### ④ 视图层（App）
//! - `app` - 终端页面：渲染表单、绑定输入、按响应跳转

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{QuizClient, TestClient, UserClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::quiz::{QuizDraft, QuizRecord};
pub use workflow::{CreateQuizFlow, QuizWriter, SessionCtx};
