//! 命名策略实现

use config_abstractions::NamingStrategy;

/// 不区分大小写的命名策略
///
/// 查找键为名称的大写形式，`Foo.Bar` 与 `foo.bar` 指向同一属性。
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseInsensitiveNaming;

impl NamingStrategy for CaseInsensitiveNaming {
    fn to_effective_name(&self, name: &str) -> String {
        name.to_uppercase()
    }

    fn naming_notes(&self) -> &str {
        "属性名称不区分大小写，其余部分必须完全匹配"
    }
}

/// 区分大小写的命名策略
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseSensitiveNaming;

impl NamingStrategy for CaseSensitiveNaming {
    fn to_effective_name(&self, name: &str) -> String {
        name.to_string()
    }

    fn naming_notes(&self) -> &str {
        "属性名称区分大小写，必须完全匹配"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config_abstractions::Property;

    #[test]
    fn test_case_insensitive_folding() {
        let naming = CaseInsensitiveNaming;
        assert_eq!(
            naming.to_effective_name("Foo.Bar"),
            naming.to_effective_name("foo.bar")
        );
        assert_ne!(
            CaseSensitiveNaming.to_effective_name("Foo.Bar"),
            CaseSensitiveNaming.to_effective_name("foo.bar")
        );
    }

    #[test]
    fn test_names_for_puts_canonical_first_then_aliases() {
        let property = Property::string("STR_BOB")
            .alias_in("String_Bob")
            .alias_out("bob.out")
            .alias_in_and_out("Stringy.Bob")
            .build();

        let names = CaseInsensitiveNaming.names_for("app.Params.STR_BOB", &property);

        assert_eq!(names.len(), 4);
        assert_eq!(names[0].actual_name, "app.Params.STR_BOB");
        assert_eq!(names[0].effective_name, "APP.PARAMS.STR_BOB");
        assert!(names[0].input && names[0].output);
        assert!(names[1].input && !names[1].output);
        assert!(!names[2].input && names[2].output);
        assert!(names[3].input && names[3].output);
    }
}
