//! # 示例应用程序
//!
//! 演示如何注册类型、从 XML 文档构建应用上下文并按 id/类型查找 bean

use clap::Parser;
use ioc_common::{
    global_type_registry, set_global_type_registry, BeanInstance, TypeRegistration, TypeRegistry,
};
use ioc_context::ApplicationContext;
use ioc_reader::{FileSystemResourceLoader, ResourceLoader, StaticResourceLoader};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, Level};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 上下文文档目录
    #[arg(short, long, default_value = "config")]
    context_dir: String,

    /// 入口文档名
    #[arg(short, long, default_value = "context.xml")]
    source: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 邮件服务, 通过标量属性配置
#[derive(Debug, Default)]
struct MailService {
    protocol: String,
    port: i32,
}

impl MailService {
    fn send_to(&self, email: &str, message: &str) {
        info!(
            "通过 {}:{} 发送邮件到 {}: {}",
            self.protocol, self.port, email, message
        );
    }
}

/// 用户服务, 经引用装配持有邮件服务
#[derive(Default)]
struct UserService {
    mail_service: Option<BeanInstance>,
}

impl UserService {
    fn activate_user(&self, email: &str) {
        if let Some(handle) = &self.mail_service {
            let guard = handle.read();
            if let Some(mail) = guard.downcast_ref::<MailService>() {
                mail.send_to(email, "您的账号已激活");
            }
        }
    }
}

/// 支付服务, 标量配置与引用装配并存
#[derive(Default)]
struct PaymentService {
    payment_type: String,
    mail_service: Option<BeanInstance>,
}

impl PaymentService {
    fn charge(&self, email: &str) {
        info!("以 {} 方式完成扣款", self.payment_type);
        if let Some(handle) = &self.mail_service {
            let guard = handle.read();
            if let Some(mail) = guard.downcast_ref::<MailService>() {
                mail.send_to(email, "扣款成功");
            }
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动 Lorn IoC 示例应用");

    // 注册可实例化的类型
    set_global_type_registry(Arc::new(build_registry()));
    let registry = global_type_registry().ok_or("全局类型注册表未初始化")?;

    // 构建应用上下文
    let context = build_context(&args, registry)?;

    // 演示 bean 查找与调用
    demonstrate_lookup(&context)?;

    info!("应用结束");
    Ok(())
}

/// 注册示例类型及其字段访问器
fn build_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register(
            TypeRegistration::of::<MailService>("demo.MailService")
                .with_scalar("protocol", |s: &mut MailService, v: String| s.protocol = v)
                .with_scalar("port", |s: &mut MailService, v: i32| s.port = v),
        )
        .register(
            TypeRegistration::of::<UserService>("demo.UserService").with_reference(
                "mailService",
                |s: &mut UserService, handle| s.mail_service = Some(handle),
            ),
        )
        .register(
            TypeRegistration::of::<PaymentService>("demo.PaymentService")
                .with_scalar("paymentType", |s: &mut PaymentService, v: String| {
                    s.payment_type = v;
                })
                .with_reference("mailService", |s: &mut PaymentService, handle| {
                    s.mail_service = Some(handle);
                }),
        );
    registry
}

/// 构建应用上下文
///
/// 目录中存在入口文档时从文件系统加载, 否则使用内置示例文档。
fn build_context(
    args: &Args,
    registry: Arc<TypeRegistry>,
) -> Result<ApplicationContext, Box<dyn std::error::Error>> {
    let entry = Path::new(&args.context_dir).join(&args.source);
    let loader: Arc<dyn ResourceLoader> = if entry.exists() {
        info!("从目录 {} 加载上下文文档", args.context_dir);
        Arc::new(FileSystemResourceLoader::new(&args.context_dir))
    } else {
        info!("未找到 {}, 使用内置示例文档", entry.display());
        Arc::new(sample_loader())
    };
    let context = ApplicationContext::from_xml(loader, registry, [args.source.clone()])?;
    Ok(context)
}

/// 内置示例文档, 与演示实体对应
fn sample_loader() -> StaticResourceLoader {
    StaticResourceLoader::new()
        .with_document(
            "context.xml",
            r#"<beans>
                 <import resource="email.xml"/>
                 <bean id="userService" class="demo.UserService">
                   <property name="mailService" ref="mailService"/>
                 </bean>
                 <bean id="paymentService" class="demo.PaymentService">
                   <property name="paymentType" value="visa"/>
                   <property name="mailService" ref="mailService"/>
                 </bean>
               </beans>"#,
        )
        .with_document(
            "email.xml",
            r#"<beans>
                 <bean id="mailService" class="demo.MailService">
                   <property name="protocol" value="pop3"/>
                   <property name="port" value="3000"/>
                 </bean>
               </beans>"#,
        )
}

/// 演示按 id 与按类型的 bean 查找
fn demonstrate_lookup(context: &ApplicationContext) -> Result<(), Box<dyn std::error::Error>> {
    let mut ids = context.bean_ids();
    ids.sort_unstable();
    info!("上下文包含 {} 个 bean: {:?}", context.len(), ids);

    context.with_bean("mailService", |service: &MailService| {
        info!("邮件服务配置: protocol={}, port={}", service.protocol, service.port);
    })?;

    context.with_bean("userService", |service: &UserService| {
        service.activate_user("user@example.com");
    })?;

    // 按类型查找唯一 bean
    let payment = context.bean_of_type::<PaymentService>()?;
    let guard = payment.read();
    if let Some(service) = guard.downcast_ref::<PaymentService>() {
        service.charge("user@example.com");
    }

    Ok(())
}

/// 解析日志级别, 无法识别时退回 info
fn parse_log_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
