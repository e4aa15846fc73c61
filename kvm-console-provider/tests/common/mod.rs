//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use kvm_console_provider::{ApigeeCredentials, ApigeeProvider, CreateKvmRequest, KvmProvider};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试资源名称
pub fn generate_test_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装客户端和测试环境
pub struct TestContext {
    pub provider: Arc<dyn KvmProvider>,
    pub environment: String,
}

impl TestContext {
    /// 从 `APIGEE_ORG` / `APIGEE_TOKEN` / `APIGEE_ENV` 创建测试上下文
    pub fn from_env() -> Option<Self> {
        let organization = env::var("APIGEE_ORG").ok()?;
        let token = env::var("APIGEE_TOKEN").ok()?;
        let environment = env::var("APIGEE_ENV").ok()?;

        let provider = ApigeeProvider::builder(ApigeeCredentials {
            organization,
            token,
        })
        .max_retries(2)
        .build()
        .ok()?;

        Some(Self {
            provider: Arc::new(provider),
            environment,
        })
    }

    /// 创建临时 KVM 并返回名称
    pub async fn create_test_kvm(&self) -> Option<String> {
        let name = generate_test_name();
        self.provider
            .create_kvm(&self.environment, &CreateKvmRequest::encrypted(&name))
            .await
            .ok()?;
        Some(name)
    }

    /// 清理临时 KVM
    pub async fn cleanup_kvm(&self, name: &str) {
        let _ = self.provider.delete_kvm(&self.environment, name).await;
    }
}
