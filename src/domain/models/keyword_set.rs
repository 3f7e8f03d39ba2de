// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 关键词集合
///
/// 由查询字符串按空白切分得到，仅用于相关性过滤。
/// 匹配时不区分大小写，且与顺序无关
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    terms: Vec<String>,
}

impl KeywordSet {
    /// 按空白切分查询字符串
    pub fn from_query(query: &str) -> Self {
        Self::new(query.split_whitespace().map(str::to_string))
    }

    /// 从任意字符串序列构建，空白项会被忽略
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms = terms
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .collect();
        Self { terms }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// 判断文本是否包含任意关键词（大小写不敏感的子串匹配）
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .any(|term| haystack.contains(&term.to_lowercase()))
    }
}
