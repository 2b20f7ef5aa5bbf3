// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认，看板工作语言）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 看板渲染一律通过 *_in 显式传入语言，不依赖全局 locale
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

/// 已打包的语言列表
pub fn available_locales() -> Vec<String> {
    rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect()
}

/// 是否为已打包语言
pub fn is_supported(locale: &str) -> bool {
    available_locales().iter().any(|l| l == locale)
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use supermarket_sales::i18n::t_in;
/// let msg = t_in("en", "app.title");
/// ```
pub fn t_in(locale: &str, key: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 翻译消息（带参数，`%{name}` 占位符）
///
/// # 示例
/// ```no_run
/// use supermarket_sales::i18n::t_with_args_in;
/// let msg = t_with_args_in("pt-BR", "app.rows", &[("count", "1000")]);
/// ```
pub fn t_with_args_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    interpolate(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn interpolate(mut template: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        template = template.replace(&placeholder, v);
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_in_explicit_locale() {
        assert_eq!(t_in("en", "calendar.weekday.tuesday"), "Tuesday");
        assert_eq!(t_in("pt-BR", "calendar.weekday.tuesday"), "Terça-feira");
        assert_eq!(t_in("zh-CN", "calendar.weekday.tuesday"), "星期二");
    }

    #[test]
    fn test_translate_with_args() {
        let msg = t_with_args_in("en", "app.rows", &[("count", "1000")]);
        assert!(msg.contains("1000"));
        assert!(!msg.contains("%{count}"));

        let msg = t_with_args_in("pt-BR", "app.rows", &[("count", "1000")]);
        assert!(msg.contains("1000"));
        assert!(msg.contains("registros"));
    }

    #[test]
    fn test_available_locales() {
        assert!(is_supported("pt-BR"));
        assert!(is_supported("en"));
        assert!(is_supported("zh-CN"));
        assert!(!is_supported("xx"));
        assert!(is_supported(DEFAULT_LOCALE));
    }
}
