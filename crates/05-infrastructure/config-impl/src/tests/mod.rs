//! 注册表与加载器链的场景测试

mod definition_tests;
mod property_file_tests;
