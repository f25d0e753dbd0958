//! 加载器链

use crate::value_map::LayeredValueMap;
use config_abstractions::{ConstructionDefinition, LoaderHandle, ProblemList};
use tracing::{debug, info, warn};

/// 按顺序运行加载器链
///
/// 每个加载器看到的恰好是排在它之前的加载器已解析的值。单个加载器的问题
/// 不会中断链条，所有加载器都会运行一次，问题按加载器顺序追加到 `problems`。
pub fn run_loader_chain(
    definition: &dyn ConstructionDefinition,
    loaders: &[LoaderHandle],
    problems: &mut ProblemList,
) -> LayeredValueMap {
    let mut values = LayeredValueMap::new();

    for loader in loaders {
        debug!("运行加载器 {} ({})", loader.name(), loader.describe_source());

        let (loaded, loader_problems) = loader.load(definition, &values).into_parts();
        let value_count = loaded.len();
        let merge_problems = values.add_values(loader, loaded, definition);

        for problem in loader_problems.iter().chain(merge_problems.iter()) {
            warn!("{}", problem);
        }
        problems.extend(loader_problems);
        problems.extend(merge_problems);

        debug!("加载器 {} 返回 {} 个值", loader.name(), value_count);
    }

    info!(
        "加载器链运行完成: {} 个加载器, {} 个显式值",
        loaders.len(),
        values.len()
    );

    values
}
