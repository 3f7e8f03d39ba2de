// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 内容过滤器
//!
//! 把抓取得到的原始 markdown 清洗成适合阅读的正文：
//!
//! 1. 删除导航（链接、图片、导航标题、界面文字）
//! 2. 删除法律声明和版权等样板文字
//! 3. 删除社交平台和应用商店链接
//! 4. 删除重复行（空行保留）
//! 5. 按关键词收窄到相关段落（可选）
//! 6. 规整空白和 markdown 装饰
//!
//! 各阶段顺序固定，后一阶段依赖前一阶段产出的文本形态。
//! 整个过程是纯函数，不做 I/O，也不记录日志。

use crate::domain::models::keyword_set::KeywordSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// 紧跟相关段落之后的段落，去除首尾空白后需超过该长度才会被保留
pub const CARRY_FORWARD_MIN_CHARS: usize = 50;

/// 规则的删除范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// 只删除匹配本身
    Span,
    /// 从匹配处删除到行尾
    ToLineEnd,
    /// 整行（去掉首尾空白后）恰好匹配时删除整行，连同换行符
    Line,
    /// 删除包含匹配的行，以及其后直到空行或文本结尾的所有行
    Block,
}

/// 过滤阶段，用于扩展规则表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStage {
    Navigation,
    Legal,
    Social,
}

/// 删除规则
///
/// 所有规则都按多行、不区分大小写的方式编译
#[derive(Debug, Clone)]
pub struct RemovalRule {
    name: &'static str,
    regex: Regex,
}

impl RemovalRule {
    pub fn new(name: &'static str, pattern: &str, scope: RuleScope) -> Result<Self, regex::Error> {
        let body = match scope {
            RuleScope::Span => format!("(?:{pattern})"),
            RuleScope::ToLineEnd => format!("(?:{pattern})[^\\n]*"),
            RuleScope::Line => format!("^[ \\t]*(?:{pattern})[ \\t]*(?:\\n|$)"),
            RuleScope::Block => {
                format!("^[^\\n]*(?:{pattern})[^\\n]*(?:\\n[ \\t]*\\S[^\\n]*)*")
            }
        };
        Ok(Self {
            name,
            regex: Regex::new(&format!("(?im){body}"))?,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// 删除全部匹配
    pub fn strip(&self, text: &str) -> String {
        self.regex.replace_all(text, "").into_owned()
    }
}

type RuleSpec = (&'static str, &'static str, RuleScope);

const NAVIGATION_RULES: &[RuleSpec] = &[
    // 图片必须先于链接处理，否则 `![alt](src)` 只会剩下一个 `!`
    ("image", r"!\[[^\]\n]*\]\([^)\n]*\)", RuleScope::Span),
    ("link", r"\[[^\]\n]*\]\([^)\n]*\)", RuleScope::Span),
    (
        "navigation_heading",
        r"#{1,6}[ \t]*(?:main menu|menu|menú principal|menú|navigation|navegación|navegacion|about(?: us)?|acerca de(?: nosotros)?|sobre nosotros|qui[eé]nes somos|contact(?: us)?|contacto|cont[aá]ctanos|(?:our )?services|(?:nuestros )?servicios)[ \t]*[:#]*",
        RuleScope::Line,
    ),
    (
        "ui_chrome",
        r"(?:[-*+][ \t]+)?(?:close menu|cerrar men[uú]|open menu|abrir men[uú]|toggle navigation|skip to (?:main )?content|saltar al contenido(?: principal)?|ir al contenido(?: principal)?|language selector|selector de idioma|select language|seleccionar idioma|change language|cambiar idioma)",
        RuleScope::Line,
    ),
];

const LEGAL_RULES: &[RuleSpec] = &[
    (
        "terms",
        r"terms (?:and|&) conditions|terms of (?:service|use)|t[eé]rminos y condiciones|condiciones de uso",
        RuleScope::Block,
    ),
    (
        "privacy",
        r"privacy (?:policy|notice|statement)|pol[ií]tica de privacidad|aviso de privacidad",
        RuleScope::Block,
    ),
    (
        "cookie_banner",
        r"we use cookies|this (?:web)?site uses cookies|cookie (?:policy|settings|preferences|notice)|accept (?:all )?cookies|pol[ií]tica de cookies|usamos cookies|utilizamos cookies|este sitio (?:web )?utiliza cookies|aceptar (?:todas las )?cookies",
        RuleScope::Block,
    ),
    (
        "copyright",
        r"(?:©|&copy;|\(c\)|copyright)[ \t]*(?:©[ \t]*)?\d{4}",
        RuleScope::ToLineEnd,
    ),
    (
        "rights_reserved",
        r"all rights reserved|(?:todos los )?derechos reservados",
        RuleScope::ToLineEnd,
    ),
    ("powered_by", r"powered by|impulsado por", RuleScope::ToLineEnd),
];

const SOCIAL_RULES: &[RuleSpec] = &[(
    "social_link",
    r"\[[^\]\n]*(?:facebook|twitter|youtube|instagram|tumblr|spotify|app store|google play)[^\]\n]*\](?:\([^)\n]*\)|\[[^\]\n]*\])?",
    RuleScope::ToLineEnd,
)];

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));

static BLANK_LINE_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

/// 全局内容过滤器实例
static CONTENT_FILTER: Lazy<ContentFilter> = Lazy::new(ContentFilter::new);

/// 内容过滤器
#[derive(Debug, Clone)]
pub struct ContentFilter {
    navigation: Vec<RemovalRule>,
    legal: Vec<RemovalRule>,
    social: Vec<RemovalRule>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentFilter {
    /// 使用内置规则表创建过滤器
    pub fn new() -> Self {
        Self {
            navigation: compile_rules(NAVIGATION_RULES),
            legal: compile_rules(LEGAL_RULES),
            social: compile_rules(SOCIAL_RULES),
        }
    }

    /// 获取全局过滤器实例
    pub fn global() -> &'static Self {
        &CONTENT_FILTER
    }

    /// 在指定阶段的规则表末尾追加一条规则
    pub fn push_rule(&mut self, stage: FilterStage, rule: RemovalRule) {
        match stage {
            FilterStage::Navigation => self.navigation.push(rule),
            FilterStage::Legal => self.legal.push(rule),
            FilterStage::Social => self.social.push(rule),
        }
    }

    pub fn rules(&self, stage: FilterStage) -> &[RemovalRule] {
        match stage {
            FilterStage::Navigation => &self.navigation,
            FilterStage::Legal => &self.legal,
            FilterStage::Social => &self.social,
        }
    }

    /// 执行完整的清洗流程
    ///
    /// `keywords` 为空或为 `None` 时跳过关键词收窄。
    /// 结果可能为空字符串，是否保留由调用方决定
    pub fn clean(&self, content: &str, keywords: Option<&KeywordSet>) -> String {
        let text = normalize_line_endings(content);
        let text = self.remove_navigation(&text);
        let text = self.remove_legal(&text);
        let text = self.remove_social_links(&text);
        let text = remove_duplicate_lines(&text);
        let text = match keywords {
            Some(keywords) if !keywords.is_empty() => narrow_to_keywords(&text, keywords),
            _ => text,
        };
        normalize_markdown(&text)
    }

    /// 阶段 1：链接、图片、导航标题和界面文字
    pub fn remove_navigation(&self, text: &str) -> String {
        strip_all(text, &self.navigation)
    }

    /// 阶段 2：条款、隐私、cookie 横幅、版权和 "powered by"
    pub fn remove_legal(&self, text: &str) -> String {
        strip_all(text, &self.legal)
    }

    /// 阶段 3：社交平台和应用商店链接
    pub fn remove_social_links(&self, text: &str) -> String {
        strip_all(text, &self.social)
    }
}

fn compile_rules(specs: &[RuleSpec]) -> Vec<RemovalRule> {
    specs
        .iter()
        .map(|&(name, pattern, scope)| {
            RemovalRule::new(name, pattern, scope).expect("built-in removal rule is valid")
        })
        .collect()
}

/// 反复应用整组规则直到文本不再变化
///
/// 删除一处匹配可能拼出新的匹配，例如 `[a][b](c)(d)` 去掉 `[b](c)` 后剩下 `[a](d)`。
/// 规则只做删除，文本长度不变即说明已经稳定
fn strip_all(text: &str, rules: &[RemovalRule]) -> String {
    let mut text = text.to_string();
    loop {
        let before = text.len();
        for rule in rules {
            if rule.is_match(&text) {
                text = rule.strip(&text);
            }
        }
        if text.len() == before {
            return text;
        }
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// 阶段 4：删除重复行
///
/// 自上而下扫描，去除首尾空白后与已出现行相同的非空行被删除，
/// 空行无论重复多少次都保留
pub fn remove_duplicate_lines(text: &str) -> String {
    let mut seen: HashSet<&str> = HashSet::new();
    text.split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || seen.insert(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 阶段 5：按关键词收窄到相关段落
///
/// 段落包含任一关键词时保留；一旦找到第一个相关段落，
/// 之后所有超过 [`CARRY_FORWARD_MIN_CHARS`] 的段落也保留（不要求相邻）。
/// 长度按阶段 6 之后的形态计算，不含装饰行和行尾空白。
/// 没有任何段落命中时原样返回
pub fn narrow_to_keywords(text: &str, keywords: &KeywordSet) -> String {
    if keywords.is_empty() {
        return text.to_string();
    }

    let mut kept: Vec<&str> = Vec::new();
    for paragraph in PARAGRAPH_BREAK.split(text) {
        let relevant = keywords.matches(paragraph);
        // TODO: confirm with product whether carry-forward should only follow the
        // immediately preceding kept paragraph instead of any earlier match
        let carried = !kept.is_empty() && visible_chars(paragraph) > CARRY_FORWARD_MIN_CHARS;
        if relevant || carried {
            kept.push(paragraph);
        }
    }

    if kept.is_empty() {
        text.to_string()
    } else {
        kept.join("\n\n")
    }
}

fn visible_chars(paragraph: &str) -> usize {
    paragraph
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !is_decoration_line(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .chars()
        .count()
}

/// 阶段 6：规整空白和 markdown 装饰
///
/// 每行去除行尾空白，删除只由 `-`、`_`、`=`、`*` 和空白组成的行，
/// 连续空行压缩为一行，最后去除首尾空白
pub fn normalize_markdown(text: &str) -> String {
    let lines = text
        .split('\n')
        .map(str::trim_end)
        .filter(|line| !is_decoration_line(line))
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_LINE_RUNS
        .replace_all(&lines, "\n\n")
        .trim()
        .to_string()
}

fn is_decoration_line(line: &str) -> bool {
    !line.trim().is_empty()
        && line
            .chars()
            .all(|c| matches!(c, '-' | '_' | '=' | '*') || c.is_whitespace())
}

/// 便捷函数：使用全局过滤器清洗内容
pub fn clean_content(content: &str, keywords: Option<&KeywordSet>) -> String {
    ContentFilter::global().clean(content, keywords)
}

#[cfg(test)]
#[path = "content_filter_test.rs"]
mod tests;
