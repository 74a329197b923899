//! 容器的端到端集成测试
//!
//! 覆盖从文件系统 XML 来源到装配完成的应用上下文的完整流水线。

use ioc_builder::BeanGraphBuilder;
use ioc_common::{BeanInstance, ContextError, ReadError, TypeRegistration, TypeRegistry};
use ioc_context::ApplicationContext;
use ioc_reader::{BeanDefinitionReader, FileSystemResourceLoader, XmlBeanDefinitionReader};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// 测试实体, 对应演示场景的邮件服务
#[derive(Debug, Default)]
struct MailService {
    protocol: String,
    port: i32,
}

/// 测试实体, 持有邮件服务的引用
#[derive(Default)]
struct UserService {
    mail_service: Option<BeanInstance>,
}

/// 测试实体, 持有邮件服务引用与标量配置
#[derive(Default)]
struct PaymentService {
    payment_type: String,
    mail_service: Option<BeanInstance>,
}

fn registry() -> Arc<TypeRegistry> {
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
    Arc::new(registry)
}

fn write_document(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn sample_documents(dir: &Path) {
    write_document(
        dir,
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
    );
    write_document(
        dir,
        "email.xml",
        r#"<beans>
             <bean id="mailService" class="demo.MailService">
               <property name="protocol" value="pop3"/>
               <property name="port" value="3000"/>
             </bean>
           </beans>"#,
    );
}

#[test]
fn builds_context_from_filesystem_sources_with_import() {
    let dir = tempfile::tempdir().unwrap();
    sample_documents(dir.path());

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let context = ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap();

    assert_eq!(context.len(), 3);
    let mut ids = context.bean_ids();
    ids.sort_unstable();
    assert_eq!(ids, vec!["mailService", "paymentService", "userService"]);

    context
        .with_bean("mailService", |service: &MailService| {
            assert_eq!(service.protocol, "pop3");
            assert_eq!(service.port, 3000);
        })
        .unwrap();
    context
        .with_bean("paymentService", |service: &PaymentService| {
            assert_eq!(service.payment_type, "visa");
        })
        .unwrap();
}

#[test]
fn imported_definitions_splice_at_the_import_position() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "main.xml",
        r#"<beans>
             <bean id="before" class="demo.UserService"/>
             <import resource="imported.xml"/>
             <bean id="after" class="demo.UserService"/>
           </beans>"#,
    );
    write_document(
        dir.path(),
        "imported.xml",
        r#"<beans><bean id="imported" class="demo.MailService"/></beans>"#,
    );

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let reader = XmlBeanDefinitionReader::new(loader, ["main.xml"]);
    let definitions = reader.read_bean_definitions().unwrap();
    let ids: Vec<&str> = definitions.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["before", "imported", "after"]);
}

#[test]
fn missing_imported_resource_aborts_the_whole_read() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "main.xml",
        r#"<beans><import resource="absent.xml"/></beans>"#,
    );

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let reader = XmlBeanDefinitionReader::new(loader, ["main.xml"]);
    let error = reader.read_bean_definitions().unwrap_err();
    assert!(matches!(error, ReadError::SourceUnreadable { .. }));
}

#[test]
fn bean_without_id_fails_the_parse_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "context.xml",
        r#"<beans><bean class="demo.MailService"/></beans>"#,
    );

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let error =
        ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap_err();
    assert!(matches!(
        error,
        ContextError::Read {
            source: ReadError::MissingMandatoryAttribute { .. }
        }
    ));
}

#[test]
fn scalar_literal_lands_as_typed_field_value() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "context.xml",
        r#"<beans>
             <bean id="a" class="demo.MailService">
               <property name="port" value="5"/>
             </bean>
           </beans>"#,
    );

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let context = ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap();
    let port = context
        .with_bean("a", |service: &MailService| service.port)
        .unwrap();
    assert_eq!(port, 5);
}

#[test]
fn wired_reference_shares_instance_identity() {
    let dir = tempfile::tempdir().unwrap();
    sample_documents(dir.path());

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let context = ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap();

    let mail = context.bean("mailService").unwrap();
    let from_user = context
        .with_bean("userService", |service: &UserService| {
            service.mail_service.clone()
        })
        .unwrap()
        .unwrap();
    let from_payment = context
        .with_bean("paymentService", |service: &PaymentService| {
            service.mail_service.clone()
        })
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&from_user, &mail));
    assert!(Arc::ptr_eq(&from_payment, &mail));
}

#[test]
fn dangling_reference_fails_naming_the_missing_id() {
    let dir = tempfile::tempdir().unwrap();
    write_document(
        dir.path(),
        "context.xml",
        r#"<beans>
             <bean id="userService" class="demo.UserService">
               <property name="mailService" ref="ghostService"/>
             </bean>
           </beans>"#,
    );

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let error =
        ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap_err();
    match error {
        ContextError::Build {
            source: ioc_common::BuildError::MissingReferenceTarget { id },
        } => assert_eq!(id, "ghostService"),
        other => panic!("意外的错误: {other}"),
    }
}

#[test]
fn relabeling_ids_yields_an_isomorphic_graph() {
    let registry = registry();
    let original = definitions_with_labels("userService", "mailService");
    let relabeled = definitions_with_labels("mailService", "userService");

    let first = BeanGraphBuilder::new(Arc::clone(&registry))
        .build(&original)
        .unwrap();
    let second = BeanGraphBuilder::new(registry).build(&relabeled).unwrap();

    // 两张图各自的持有者字段都指向本图中被引用标签对应的实例
    let wired_first = first[&owner_of(&original)]
        .with_value(|s: &UserService| s.mail_service.clone())
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(
        &wired_first,
        &first[&target_of(&original)].value()
    ));

    let wired_second = second[&owner_of(&relabeled)]
        .with_value(|s: &UserService| s.mail_service.clone())
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(
        &wired_second,
        &second[&target_of(&relabeled)].value()
    ));
}

/// 构造一对相互关联的定义: `owner` 经 mailService 字段引用 `target`
fn definitions_with_labels(owner: &str, target: &str) -> Vec<ioc_common::BeanDefinition> {
    let mut owner_definition = ioc_common::BeanDefinition::new(owner, "demo.UserService").unwrap();
    owner_definition.set_reference_property("mailService", target);
    let target_definition = ioc_common::BeanDefinition::new(target, "demo.MailService").unwrap();
    vec![owner_definition, target_definition]
}

fn owner_of(definitions: &[ioc_common::BeanDefinition]) -> String {
    definitions[0].id().to_string()
}

fn target_of(definitions: &[ioc_common::BeanDefinition]) -> String {
    definitions[1].id().to_string()
}

#[test]
fn independent_builds_produce_fresh_instances() {
    let dir = tempfile::tempdir().unwrap();
    sample_documents(dir.path());

    let loader = Arc::new(FileSystemResourceLoader::new(dir.path()));
    let first =
        ApplicationContext::from_xml(loader.clone(), registry(), ["context.xml"]).unwrap();
    let second = ApplicationContext::from_xml(loader, registry(), ["context.xml"]).unwrap();

    assert!(!Arc::ptr_eq(
        &first.bean("mailService").unwrap(),
        &second.bean("mailService").unwrap()
    ));
}
