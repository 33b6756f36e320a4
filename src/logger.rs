//! 日志初始化
//!
//! 诊断日志走 tracing，页面渲染走标准输出，两者互不混用

use tracing_subscriber::EnvFilter;

/// 初始化全局日志订阅器
///
/// 默认级别 info，可通过 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
