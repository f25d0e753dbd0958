//! 属性文件加载器

use super::apply_named_raw;
use config_abstractions::{
    ConstructionDefinition, Loader, LoaderProblem, LoaderValues, Property, ValueSource,
};
use std::io::ErrorKind;
use tracing::debug;

/// 属性文件加载器
///
/// 从 `key=value` 格式的文本文件读取值。文件路径本身是一个属性，由链中
/// 排在前面的加载器解析；路径未设置时不读取任何文件，也不产生问题。
#[derive(Debug, Clone)]
pub struct PropertyFileLoader {
    path_property: Property,
}

impl PropertyFileLoader {
    /// 创建新的属性文件加载器
    pub fn new(path_property: &Property) -> Self {
        Self {
            path_property: path_property.clone(),
        }
    }

    pub fn path_property(&self) -> &Property {
        &self.path_property
    }
}

impl Loader for PropertyFileLoader {
    fn name(&self) -> &str {
        "PropertyFileLoader"
    }

    fn load(
        &self,
        definition: &dyn ConstructionDefinition,
        existing: &dyn ValueSource,
    ) -> LoaderValues {
        let Some(path) = existing
            .effective_value(&self.path_property)
            .and_then(|value| value.as_str().map(str::to_string))
        else {
            debug!("未设置属性文件路径，跳过");
            return LoaderValues::new();
        };

        debug!("加载属性文件: {}", path);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return LoaderValues::with_problem(LoaderProblem::SourceNotFound {
                    loader: self.name().to_string(),
                    source_description: path,
                });
            }
            Err(e) => {
                return LoaderValues::with_problem(LoaderProblem::Io {
                    loader: self.name().to_string(),
                    source_description: path,
                    message: e.to_string(),
                });
            }
        };

        let mut out = LoaderValues::new();
        for (key, raw) in parse_properties(&content) {
            apply_named_raw(self.name(), definition, &key, &raw, &path, &mut out);
        }
        out
    }

    fn declared_properties(&self) -> Vec<Property> {
        vec![self.path_property.clone()]
    }

    fn describe_source(&self) -> String {
        format!("属性 {} 指定的属性文件", self.path_property.local_name())
    }
}

/// 解析属性文件文本
///
/// 返回按首次出现顺序排列的键值对；重复的键只保留最后一个值。
pub fn parse_properties(text: &str) -> Vec<(String, String)> {
    let mut entries: Vec<(String, String)> = Vec::new();

    for line in logical_lines(text) {
        let (key, value) = split_key_value(&line);
        if key.is_empty() {
            continue;
        }
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    entries
}

/// 合并续行并去掉注释和空行
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for physical in text.lines() {
        let stripped = physical.trim_start();

        let mut current = match pending.take() {
            Some(mut head) => {
                head.push_str(stripped);
                head
            }
            None => {
                if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with('!') {
                    continue;
                }
                stripped.to_string()
            }
        };

        let trailing = current.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.pop();
            pending = Some(current);
        } else {
            lines.push(current);
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }

    lines
}

/// 分隔键和值
///
/// 键在第一个未转义的 `=`、`:` 或空白处结束。其后的空白连同至多一个
/// `=` 或 `:` 都属于分隔符。
fn split_key_value(line: &str) -> (String, String) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = index;
            break;
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map_or(rest, str::trim_start);

    (unescape(&line[..key_end]), unescape(rest))
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_separators_and_comments() {
        let text = "# comment\n! also comment\n\na=1\nb : 2\n  c=three  \nd\n";
        let entries = parse_properties(text);

        assert_eq!(
            entries,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "three  ".to_string()),
                ("d".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_duplicate_keys_last_wins() {
        let entries = parse_properties("k=1\nother=x\nk=2\n");
        assert_eq!(entries[0], ("k".to_string(), "2".to_string()));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_parse_continuation_and_escapes() {
        let text = "long=first \\\n    second\nesc=a\\=b\\:c\\tz\\u0041\nkey\\=x=y\nslash=ends\\\\\n";
        let entries = parse_properties(text);

        assert_eq!(entries[0], ("long".to_string(), "first second".to_string()));
        assert_eq!(entries[1], ("esc".to_string(), "a=b:c\tzA".to_string()));
        assert_eq!(entries[2], ("key=x".to_string(), "y".to_string()));
        assert_eq!(entries[3], ("slash".to_string(), "ends\\".to_string()));
    }

    #[test]
    fn test_parse_whitespace_separator() {
        let text = "host example.org\nport\t8080\nname = a b\nspaced\\ key value\n";
        let entries = parse_properties(text);

        assert_eq!(
            entries,
            vec![
                ("host".to_string(), "example.org".to_string()),
                ("port".to_string(), "8080".to_string()),
                ("name".to_string(), "a b".to_string()),
                ("spaced key".to_string(), "value".to_string()),
            ]
        );
    }
}
