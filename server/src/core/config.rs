use std::time::Duration;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | ./data | 数据目录 (嵌入式数据库) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_DIR | ./logs | 日志目录 |
/// | LOG_LEVEL | info | 日志级别 |
/// | RELAY_SESSION_TTL_SECS | 300 | 空闲 relay 会话回收时间 |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/data/saffron HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录，存放嵌入式数据库文件
    pub data_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志目录
    pub log_dir: String,
    /// 日志级别
    pub log_level: String,
    /// relay 空闲会话 TTL (秒)
    pub relay_session_ttl_secs: u64,
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            relay_session_ttl_secs: std::env::var("RELAY_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }

    pub fn relay_session_ttl(&self) -> Duration {
        Duration::from_secs(self.relay_session_ttl_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            http_port: 3000,
            environment: "development".into(),
            log_dir: "./logs".into(),
            log_level: "info".into(),
            relay_session_ttl_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.relay_session_ttl(), Duration::from_secs(300));
        assert!(!config.is_production());
    }
}
