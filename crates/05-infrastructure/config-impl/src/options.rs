//! 框架选项组
//!
//! 无论调用方是否列出，注册表中总会包含该组。

use config_abstractions::{Property, PropertyGroup};
use once_cell::sync::Lazy;

/// 框架选项组名称
pub const OPTIONS_GROUP_NAME: &str = "lorn.config.Options";

/// 启动成功后是否把示例配置打印到标准输出
pub static CREATE_SAMPLES: Lazy<Property> = Lazy::new(|| {
    Property::flag("CREATE_SAMPLES")
        .default_value(false)
        .description("启动成功后打印示例配置")
        .build()
});

/// 默认属性文件加载器读取的文件路径
pub static PROPERTY_FILE_PATH: Lazy<Property> = Lazy::new(|| {
    Property::string("PROPERTY_FILE_PATH")
        .description("属性文件路径，未设置时不读取任何文件")
        .build()
});

static OPTIONS_GROUP: Lazy<PropertyGroup> = Lazy::new(|| {
    PropertyGroup::new(OPTIONS_GROUP_NAME)
        .with_description("配置框架自身的选项")
        .with_property(CREATE_SAMPLES.clone())
        .with_property(PROPERTY_FILE_PATH.clone())
});

/// 框架选项组
pub fn options_group() -> &'static PropertyGroup {
    &OPTIONS_GROUP
}
